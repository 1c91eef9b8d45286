/// Whole-scene assembly: lighting, ground, tower and trees
use nalgebra::Point3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::building::{generate_building, BuildingSpec};
use crate::config::*;
use crate::ground::generate_ground_and_roads;
use crate::layout::SceneLayout;
use crate::light::Light;
use crate::trees::generate_trees_with;

/// Parameters for the complete housing complex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexConfig {
    pub building: BuildingSpec,
    pub tree_count: i32,
    pub tree_min_radius: f32,
    pub tree_max_radius: f32,
}

impl Default for ComplexConfig {
    fn default() -> Self {
        Self {
            building: BuildingSpec::tower(),
            tree_count: TREE_COUNT,
            tree_min_radius: TREE_MIN_RADIUS,
            tree_max_radius: TREE_MAX_RADIUS,
        }
    }
}

/// Soft ambient fill plus a shadow-casting sun
pub fn scene_lighting() -> SceneLayout {
    let mut layout = SceneLayout::new();
    layout.add_light(Light::Ambient {
        color: AMBIENT_COLOR,
        intensity: AMBIENT_INTENSITY,
    });
    layout.add_light(Light::Directional {
        color: SUN_COLOR,
        intensity: SUN_INTENSITY,
        position: Point3::from(SUN_POSITION),
        cast_shadow: true,
        shadow_map_size: SHADOW_MAP_SIZE,
    });
    layout
}

/// Full scene in draw-independent order: lighting, ground and roads, the
/// building, then trees drawn from `rng`.
pub fn build_housing_complex<R: Rng + ?Sized>(config: &ComplexConfig, rng: &mut R) -> SceneLayout {
    let mut layout = scene_lighting();
    layout.extend(generate_ground_and_roads());
    layout.extend(generate_building(&config.building));
    layout.extend(generate_trees_with(
        rng,
        config.tree_count,
        config.tree_min_radius,
        config.tree_max_radius,
    ));

    log::info!(
        "housing complex built: {} primitives, {} lights",
        layout.len(),
        layout.lights.len()
    );
    layout
}

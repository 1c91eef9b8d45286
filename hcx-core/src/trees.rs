/// Ring of trees around the complex
use nalgebra::Point3;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::*;
use crate::layout::SceneLayout;
use crate::primitive::{Material, Part, PlacedPrimitive, Shape};

/// Polar placement of one tree around the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePlacement {
    pub angle: f32,
    pub radius: f32,
}

impl TreePlacement {
    pub fn ground_position(&self) -> (f32, f32) {
        (self.angle.cos() * self.radius, self.angle.sin() * self.radius)
    }
}

/// Evenly spaced angles (`2π·i/count`) with radii drawn from `rng`.
///
/// The radius is `min + u·(max - min)` with `u` uniform in [0, 1), so a
/// reversed range still yields values between the two bounds.
pub fn tree_placements<R: Rng + ?Sized>(
    rng: &mut R,
    count: i32,
    min_radius: f32,
    max_radius: f32,
) -> Vec<TreePlacement> {
    let count = count.max(0);
    (0..count)
        .map(|i| {
            let u: f32 = rng.random();
            TreePlacement {
                angle: TAU * i as f32 / count as f32,
                radius: min_radius + u * (max_radius - min_radius),
            }
        })
        .collect()
}

/// Trunk and leaves for each placement.
pub fn generate_trees_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: i32,
    min_radius: f32,
    max_radius: f32,
) -> SceneLayout {
    let placements = tree_placements(rng, count, min_radius, max_radius);
    let mut layout = SceneLayout::with_capacity(placements.len() * 2);

    for placement in &placements {
        let (x, z) = placement.ground_position();
        layout.push(
            PlacedPrimitive::new(
                Part::TreeTrunk,
                Shape::Cylinder {
                    radius_top: TRUNK_RADIUS_TOP,
                    radius_bottom: TRUNK_RADIUS_BOTTOM,
                    height: TRUNK_HEIGHT,
                    radial_segments: CYLINDER_SEGMENTS,
                },
                Material::opaque(TRUNK_COLOR),
                Point3::new(x, TRUNK_HEIGHT / 2.0, z),
            )
            .casting_shadow(),
        );
        layout.push(
            PlacedPrimitive::new(
                Part::TreeLeaves,
                Shape::Sphere {
                    radius: LEAVES_RADIUS,
                    width_segments: SPHERE_WIDTH_SEGMENTS,
                    height_segments: SPHERE_HEIGHT_SEGMENTS,
                },
                Material::opaque(LEAVES_COLOR),
                Point3::new(x, LEAVES_Y, z),
            )
            .casting_shadow(),
        );
    }

    log::debug!("placed {} trees", placements.len());
    layout
}

/// Like [`generate_trees_with`] but draws from the thread-local RNG, so output
/// differs between calls.
#[cfg(feature = "thread-rng")]
pub fn generate_trees(count: i32, min_radius: f32, max_radius: f32) -> SceneLayout {
    generate_trees_with(&mut rand::rng(), count, min_radius, max_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_same_seed_same_trees() {
        let a = generate_trees_with(&mut StdRng::seed_from_u64(7), 8, 25.0, 35.0);
        let b = generate_trees_with(&mut StdRng::seed_from_u64(7), 8, 25.0, 35.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_and_negative_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_trees_with(&mut rng, 0, 25.0, 35.0).is_empty());
        assert!(generate_trees_with(&mut rng, -3, 25.0, 35.0).is_empty());
    }

    #[test]
    fn test_reversed_range_stays_between_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in tree_placements(&mut rng, 16, 35.0, 25.0) {
            assert!(p.radius > 25.0 - 1e-4 && p.radius <= 35.0 + 1e-4);
        }
    }

    #[test]
    fn test_leaves_above_trunk() {
        let layout = generate_trees_with(&mut StdRng::seed_from_u64(11), 1, 30.0, 30.0);
        let trunk = &layout.primitives[0];
        let leaves = &layout.primitives[1];
        assert_eq!(trunk.part, Part::TreeTrunk);
        assert_eq!(leaves.part, Part::TreeLeaves);
        assert_eq!(trunk.position.y, 1.5);
        assert_eq!(leaves.position.y, 3.5);
        assert!((trunk.position.x - 30.0).abs() < 1e-4);
        assert_eq!(trunk.position.x, leaves.position.x);
    }

    #[cfg(feature = "thread-rng")]
    #[test]
    fn test_unseeded_trees_respect_bounds() {
        let layout = generate_trees(8, 25.0, 35.0);
        assert_eq!(layout.len(), 16);
        for trunk in layout.parts(Part::TreeTrunk) {
            let r = (trunk.position.x.powi(2) + trunk.position.z.powi(2)).sqrt();
            assert!(r >= 25.0 - 1e-3 && r <= 35.0 + 1e-3);
        }
    }
}

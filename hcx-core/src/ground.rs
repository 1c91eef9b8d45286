/// Ground planes, road network, sidewalks and street lights
use nalgebra::Point3;
use std::f32::consts::FRAC_PI_2;

use crate::config::*;
use crate::layout::SceneLayout;
use crate::light::Light;
use crate::primitive::{Material, Part, PlacedPrimitive, Shape};
use crate::transform::RotationState;

fn ground_plane(part: Part, width: f32, height: f32, color: u32, x: f32, y: f32, z: f32) -> PlacedPrimitive {
    PlacedPrimitive::new(
        part,
        Shape::Plane { width, height },
        Material::opaque(color),
        Point3::new(x, y, z),
    )
    .rotated(RotationState::ground())
}

/// Grass, courtyard, roads with centre-line markings, sidewalks and the
/// street-light grid. Every ground category sits on its own elevation band.
pub fn generate_ground_and_roads() -> SceneLayout {
    let mut layout = SceneLayout::new();

    layout.push(
        ground_plane(Part::Grass, GROUND_SIZE, GROUND_SIZE, GRASS_COLOR, 0.0, GRASS_ELEVATION, 0.0)
            .receiving_shadow(),
    );
    layout.push(
        ground_plane(
            Part::Courtyard,
            COURTYARD_SIZE,
            COURTYARD_SIZE,
            COURTYARD_COLOR,
            0.0,
            COURTYARD_ELEVATION,
            0.0,
        )
        .receiving_shadow(),
    );

    // Main roads: one along X, one along Z
    layout.push(
        ground_plane(
            Part::Road,
            GROUND_SIZE,
            MAIN_ROAD_WIDTH,
            ROAD_COLOR,
            0.0,
            ROAD_ELEVATION,
            MAIN_ROAD_OFFSET,
        )
        .receiving_shadow(),
    );
    layout.push(
        ground_plane(
            Part::Road,
            MAIN_ROAD_WIDTH,
            GROUND_SIZE,
            ROAD_COLOR,
            MAIN_ROAD_OFFSET,
            ROAD_ELEVATION,
            0.0,
        )
        .receiving_shadow(),
    );

    // Connecting roads from the courtyard out to the main roads
    layout.push(
        ground_plane(
            Part::Road,
            CONNECTING_ROAD_WIDTH,
            CONNECTING_ROAD_LENGTH,
            ROAD_COLOR,
            0.0,
            ROAD_ELEVATION,
            CONNECTING_ROAD_OFFSET,
        )
        .receiving_shadow(),
    );
    layout.push(
        ground_plane(
            Part::Road,
            CONNECTING_ROAD_WIDTH,
            CONNECTING_ROAD_LENGTH,
            ROAD_COLOR,
            CONNECTING_ROAD_OFFSET,
            ROAD_ELEVATION,
            0.0,
        )
        .rotated(RotationState::new(-FRAC_PI_2, 0.0, FRAC_PI_2))
        .receiving_shadow(),
    );

    for offset in marking_offsets() {
        layout.push(ground_plane(
            Part::RoadMarking,
            MARKING_LENGTH,
            MARKING_WIDTH,
            MARKING_COLOR,
            offset,
            MARKING_ELEVATION,
            MAIN_ROAD_OFFSET,
        ));
    }
    for offset in marking_offsets() {
        layout.push(ground_plane(
            Part::RoadMarking,
            MARKING_WIDTH,
            MARKING_LENGTH,
            MARKING_COLOR,
            MAIN_ROAD_OFFSET,
            MARKING_ELEVATION,
            offset,
        ));
    }

    for side in [SIDEWALK_OFFSET, -SIDEWALK_OFFSET] {
        layout.push(
            ground_plane(
                Part::Sidewalk,
                GROUND_SIZE,
                SIDEWALK_WIDTH,
                SIDEWALK_COLOR,
                0.0,
                SIDEWALK_ELEVATION,
                MAIN_ROAD_OFFSET + side,
            )
            .receiving_shadow(),
        );
    }
    for side in [SIDEWALK_OFFSET, -SIDEWALK_OFFSET] {
        layout.push(
            ground_plane(
                Part::Sidewalk,
                SIDEWALK_WIDTH,
                GROUND_SIZE,
                SIDEWALK_COLOR,
                MAIN_ROAD_OFFSET + side,
                SIDEWALK_ELEVATION,
                0.0,
            )
            .receiving_shadow(),
        );
    }

    for (x, z) in street_light_positions() {
        layout.extend(generate_street_light(x, z));
    }

    log::debug!(
        "ground and roads: {} primitives, {} lights",
        layout.len(),
        layout.lights.len()
    );
    layout
}

/// Offsets of the dashed centre-line marks along a main road's axis.
pub fn marking_offsets() -> impl Iterator<Item = f32> {
    let steps = (2.0 * MARKING_EXTENT / MARKING_SPACING).round() as i32;
    (0..=steps).map(|k| -MARKING_EXTENT + k as f32 * MARKING_SPACING)
}

/// Ground coordinates of the 3×4 street-light grid flanking both main roads.
pub fn street_light_positions() -> Vec<(f32, f32)> {
    let near = MAIN_ROAD_OFFSET - STREET_LIGHT_OFFSET;
    let far = MAIN_ROAD_OFFSET + STREET_LIGHT_OFFSET;

    let mut positions = Vec::with_capacity(12);
    for i in -1..=1 {
        let along = i as f32 * STREET_LIGHT_SPACING;
        positions.push((along, far));
        positions.push((along, near));
        positions.push((far, along));
        positions.push((near, along));
    }
    positions
}

/// Pole, glowing fixture and point light standing at ground coordinate (x, z).
pub fn generate_street_light(x: f32, z: f32) -> SceneLayout {
    let mut layout = SceneLayout::with_capacity(2);

    layout.push(
        PlacedPrimitive::new(
            Part::LightPole,
            Shape::Cylinder {
                radius_top: POLE_RADIUS_TOP,
                radius_bottom: POLE_RADIUS_BOTTOM,
                height: POLE_HEIGHT,
                radial_segments: CYLINDER_SEGMENTS,
            },
            Material::opaque(POLE_COLOR),
            Point3::new(x, POLE_CENTER_Y, z),
        )
        .casting_shadow(),
    );
    layout.push(
        PlacedPrimitive::new(
            Part::LightFixture,
            Shape::Sphere {
                radius: FIXTURE_RADIUS,
                width_segments: SPHERE_WIDTH_SEGMENTS,
                height_segments: SPHERE_HEIGHT_SEGMENTS,
            },
            Material::glowing(FIXTURE_COLOR, FIXTURE_EMISSIVE),
            Point3::new(x, FIXTURE_Y, z),
        )
        .casting_shadow(),
    );
    layout.add_light(Light::Point {
        color: STREET_LIGHT_COLOR,
        intensity: STREET_LIGHT_INTENSITY,
        distance: STREET_LIGHT_DISTANCE,
        position: Point3::new(x, STREET_LIGHT_Y, z),
        cast_shadow: true,
    });

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marking_offsets() {
        let offsets: Vec<f32> = marking_offsets().collect();
        assert_eq!(offsets.len(), 9);
        assert_eq!(offsets[0], -40.0);
        assert_eq!(offsets[4], 0.0);
        assert_eq!(offsets[8], 40.0);
    }

    #[test]
    fn test_street_light_grid() {
        let positions = street_light_positions();
        assert_eq!(positions.len(), 12);
        assert!(positions.contains(&(-20.0, 25.0)));
        assert!(positions.contains(&(0.0, 15.0)));
        assert!(positions.contains(&(25.0, 20.0)));
        assert!(positions.contains(&(15.0, -20.0)));
    }

    #[test]
    fn test_street_light_heights() {
        let light = generate_street_light(3.0, -4.0);
        assert_eq!(light.len(), 2);
        assert_eq!(light.lights.len(), 1);

        let pole = &light.primitives[0];
        assert_eq!(pole.part, Part::LightPole);
        assert_eq!(pole.position, Point3::new(3.0, 3.0, -4.0));

        let fixture = &light.primitives[1];
        assert_eq!(fixture.part, Part::LightFixture);
        assert_eq!(fixture.position.y, 5.8);
        assert_eq!(fixture.material.emissive, Some(0x111100));

        match light.lights[0] {
            Light::Point {
                intensity,
                distance,
                position,
                ..
            } => {
                assert_eq!(intensity, 0.5);
                assert_eq!(distance, 15.0);
                assert_eq!(position, Point3::new(3.0, 5.5, -4.0));
            }
            other => panic!("expected point light, got {:?}", other),
        }
    }

    #[test]
    fn test_ground_counts() {
        let layout = generate_ground_and_roads();
        assert_eq!(layout.count(Part::Grass), 1);
        assert_eq!(layout.count(Part::Courtyard), 1);
        assert_eq!(layout.count(Part::Road), 4);
        assert_eq!(layout.count(Part::RoadMarking), 18);
        assert_eq!(layout.count(Part::Sidewalk), 4);
        assert_eq!(layout.count(Part::LightPole), 12);
        assert_eq!(layout.count(Part::LightFixture), 12);
        assert_eq!(layout.lights.len(), 12);
    }

    #[test]
    fn test_sidewalks_flank_main_roads() {
        let layout = generate_ground_and_roads();
        let mut zs: Vec<f32> = layout
            .parts(Part::Sidewalk)
            .filter(|p| p.position.x == 0.0)
            .map(|p| p.position.z)
            .collect();
        zs.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(zs, vec![16.0, 24.0]);
    }
}

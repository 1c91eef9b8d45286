/// Procedural multi-floor buildings: structure, roof and per-floor windows
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::config::*;
use crate::layout::SceneLayout;
use crate::primitive::{Material, Part, PlacedPrimitive, Shape};
use crate::transform::RotationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoofKind {
    Flat,
    Pyramid,
}

/// Parameters for one building, centred on the origin.
///
/// Nothing here is validated. Negative counts behave like zero, and walls too
/// narrow for `windows_per_side` get overlapping windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub width: f32,
    pub depth: f32,
    pub floor_height: f32,
    pub floor_count: i32,
    pub roof: RoofKind,
    pub windows_per_side: i32,
    pub color: u32,
}

impl BuildingSpec {
    pub fn new(width: f32, depth: f32, floor_height: f32, floor_count: i32, roof: RoofKind) -> Self {
        Self {
            width,
            depth,
            floor_height,
            floor_count,
            roof,
            windows_per_side: DEFAULT_WINDOWS_PER_SIDE,
            color: BUILDING_COLOR,
        }
    }

    /// The ten-storey residential tower at the centre of the complex.
    pub fn tower() -> Self {
        Self::new(
            TOWER_WIDTH,
            TOWER_DEPTH,
            TOWER_FLOOR_HEIGHT,
            TOWER_FLOORS,
            RoofKind::Flat,
        )
    }

    pub fn with_windows_per_side(mut self, windows: i32) -> Self {
        self.windows_per_side = windows;
        self
    }

    fn floors(&self) -> i32 {
        self.floor_count.max(0)
    }

    pub fn total_height(&self) -> f32 {
        self.floor_height * self.floors() as f32
    }
}

impl Default for BuildingSpec {
    fn default() -> Self {
        Self::tower()
    }
}

/// The four walls, each with the yaw that turns local +Z onto its outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Front,
    Back,
    Right,
    Left,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Back, Wall::Right, Wall::Left];

    pub fn yaw(&self) -> f32 {
        match self {
            Wall::Front => 0.0,
            Wall::Back => PI,
            Wall::Right => FRAC_PI_2,
            Wall::Left => -FRAC_PI_2,
        }
    }

    /// Point `outset` beyond this wall's face, `lateral` along it, at height `y`.
    fn point(&self, spec: &BuildingSpec, lateral: f32, y: f32, outset: f32) -> Point3<f32> {
        let half_w = spec.width / 2.0;
        let half_d = spec.depth / 2.0;
        match self {
            Wall::Front => Point3::new(lateral, y, half_d + outset),
            Wall::Back => Point3::new(lateral, y, -half_d - outset),
            Wall::Right => Point3::new(half_w + outset, y, lateral),
            Wall::Left => Point3::new(-half_w - outset, y, lateral),
        }
    }
}

/// Lateral offsets of `count` windows, `WINDOW_SPACING` apart and centred on the wall.
pub fn window_offsets(count: i32) -> Vec<f32> {
    let count = count.max(0);
    let centre = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| (i as f32 - centre) * WINDOW_SPACING)
        .collect()
}

/// Structure box, roof and a frame/glass pair for every window on every floor.
pub fn generate_building(spec: &BuildingSpec) -> SceneLayout {
    let floors = spec.floors();
    let offsets = window_offsets(spec.windows_per_side);
    let mut layout = SceneLayout::with_capacity(2 + floors as usize * 4 * offsets.len() * 2);

    let height = spec.total_height();
    layout.push(
        PlacedPrimitive::new(
            Part::Structure,
            Shape::cuboid(spec.width, height, spec.depth),
            Material::opaque(spec.color),
            Point3::new(0.0, height / 2.0, 0.0),
        )
        .casting_shadow(),
    );
    layout.push(roof(spec, height));

    for floor in 0..floors {
        let y = floor as f32 * spec.floor_height + spec.floor_height / 2.0 + WINDOW_SILL_OFFSET;
        for wall in Wall::ALL {
            for &lateral in &offsets {
                layout.push(window_part(
                    Part::WindowFrame,
                    WINDOW_FRAME_SIZE,
                    Material::opaque(WINDOW_FRAME_COLOR),
                    wall,
                    wall.point(spec, lateral, y, WINDOW_FRAME_OUTSET),
                ));
                layout.push(window_part(
                    Part::WindowGlass,
                    WINDOW_GLASS_SIZE,
                    Material::translucent(WINDOW_GLASS_COLOR, WINDOW_GLASS_OPACITY),
                    wall,
                    wall.point(spec, lateral, y, WINDOW_GLASS_OUTSET),
                ));
            }
        }
    }

    log::debug!(
        "building {}x{} with {} floors: {} primitives",
        spec.width,
        spec.depth,
        floors,
        layout.len()
    );
    layout
}

fn roof(spec: &BuildingSpec, height: f32) -> PlacedPrimitive {
    match spec.roof {
        RoofKind::Flat => PlacedPrimitive::new(
            Part::Roof,
            Shape::cuboid(
                spec.width + FLAT_ROOF_OVERHANG,
                FLAT_ROOF_THICKNESS,
                spec.depth + FLAT_ROOF_OVERHANG,
            ),
            Material::opaque(FLAT_ROOF_COLOR),
            Point3::new(0.0, height + FLAT_ROOF_THICKNESS / 2.0, 0.0),
        ),
        RoofKind::Pyramid => PlacedPrimitive::new(
            Part::Roof,
            Shape::Cone {
                radius: spec.width.max(spec.depth) / 2.0,
                height: PYRAMID_ROOF_HEIGHT,
                radial_segments: PYRAMID_ROOF_SEGMENTS,
            },
            Material::opaque(PYRAMID_ROOF_COLOR),
            Point3::new(0.0, height + PYRAMID_ROOF_HEIGHT / 2.0, 0.0),
        )
        // square base aligned with the walls
        .rotated(RotationState::yaw(FRAC_PI_4)),
    }
    .casting_shadow()
}

fn window_part(
    part: Part,
    size: [f32; 3],
    material: Material,
    wall: Wall,
    position: Point3<f32>,
) -> PlacedPrimitive {
    PlacedPrimitive::new(part, Shape::cuboid(size[0], size[1], size[2]), material, position)
        .rotated(RotationState::yaw(wall.yaw()))
        .casting_shadow()
        .receiving_shadow()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_offsets() {
        assert_eq!(window_offsets(2), vec![-2.0, 2.0]);
        assert_eq!(window_offsets(1), vec![0.0]);
        assert_eq!(window_offsets(3), vec![-4.0, 0.0, 4.0]);
        assert!(window_offsets(0).is_empty());
        assert!(window_offsets(-3).is_empty());
    }

    #[test]
    fn test_flat_roof_seats_on_top() {
        let layout = generate_building(&BuildingSpec::new(8.0, 6.0, 2.5, 4, RoofKind::Flat));
        let roof = &layout.primitives[1];
        assert_eq!(roof.part, Part::Roof);
        assert_eq!(roof.shape, Shape::cuboid(8.5, 0.5, 6.5));
        assert_eq!(roof.position.y, 10.25);
    }

    #[test]
    fn test_pyramid_roof() {
        let layout = generate_building(&BuildingSpec::new(8.0, 10.0, 3.0, 2, RoofKind::Pyramid));
        let roof = &layout.primitives[1];
        assert_eq!(
            roof.shape,
            Shape::Cone {
                radius: 5.0,
                height: 2.0,
                radial_segments: 4
            }
        );
        assert_eq!(roof.position.y, 7.0);
        assert_eq!(roof.rotation, RotationState::yaw(FRAC_PI_4));
        assert_eq!(roof.material.color, PYRAMID_ROOF_COLOR);
    }

    #[test]
    fn test_negative_floors_behave_like_zero() {
        let layout = generate_building(&BuildingSpec::new(12.0, 12.0, 3.0, -5, RoofKind::Flat));
        assert_eq!(layout.len(), 2);
        assert_eq!(layout.primitives[0].position.y, 0.0);
    }

    #[test]
    fn test_windows_face_outward() {
        let layout = generate_building(&BuildingSpec::new(12.0, 12.0, 3.0, 1, RoofKind::Flat));
        for frame in layout.parts(Part::WindowFrame) {
            let p = frame.position;
            let yaw = frame.rotation.y;
            if p.z > 6.0 {
                assert_eq!(yaw, 0.0);
            } else if p.z < -6.0 {
                assert_eq!(yaw, PI);
            } else if p.x > 6.0 {
                assert_eq!(yaw, FRAC_PI_2);
            } else {
                assert!(p.x < -6.0);
                assert_eq!(yaw, -FRAC_PI_2);
            }
        }
    }

    #[test]
    fn test_glass_sits_outside_frame() {
        let layout = generate_building(&BuildingSpec::new(12.0, 12.0, 3.0, 1, RoofKind::Flat));
        let frames: Vec<_> = layout.parts(Part::WindowFrame).collect();
        let glass: Vec<_> = layout.parts(Part::WindowGlass).collect();
        assert_eq!(frames.len(), glass.len());
        for (frame, pane) in frames.iter().zip(glass.iter()) {
            let frame_out = frame.position.x.abs().max(frame.position.z.abs());
            let pane_out = pane.position.x.abs().max(pane.position.z.abs());
            assert!((frame_out - 6.2).abs() < 1e-5);
            assert!((pane_out - 6.3).abs() < 1e-5);
            assert!(pane.material.is_transparent());
        }
    }
}

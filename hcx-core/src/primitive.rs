//! Placed primitive descriptors: the unit of output handed to renderers.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::transform::RotationState;

/// Tag for the five supported primitive shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Box,
    Cylinder,
    Cone,
    Sphere,
    Plane,
}

/// Shape geometry. Every shape is centred on its local origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Vertical along local Y.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
    },
    /// Apex at +height/2, base at -height/2.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Lies in local XY with its normal along +Z.
    Plane { width: f32, height: f32 },
}

impl Shape {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box {
            width,
            height,
            depth,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Box { .. } => ShapeKind::Box,
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
            Shape::Cone { .. } => ShapeKind::Cone,
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Plane { .. } => ShapeKind::Plane,
        }
    }

    /// Geometry parameters as an ordered sequence; meaning depends on [`Shape::kind`].
    pub fn params(&self) -> Vec<f32> {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => vec![radius_top, radius_bottom, height, radial_segments as f32],
            Shape::Cone {
                radius,
                height,
                radial_segments,
            } => vec![radius, height, radial_segments as f32],
            Shape::Sphere {
                radius,
                width_segments,
                height_segments,
            } => vec![radius, width_segments as f32, height_segments as f32],
            Shape::Plane { width, height } => vec![width, height],
        }
    }
}

/// Surface appearance. Colours are packed 0xRRGGBB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: u32,
    pub opacity: f32,
    pub emissive: Option<u32>,
}

impl Material {
    pub fn opaque(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            emissive: None,
        }
    }

    pub fn translucent(color: u32, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
            emissive: None,
        }
    }

    pub fn glowing(color: u32, emissive: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            emissive: Some(emissive),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Colour as linear-ish RGB components in [0, 1].
    pub fn rgb(&self) -> [f32; 3] {
        rgb(self.color)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(0xFFFFFF)
    }
}

/// Unpack 0xRRGGBB into float components.
pub fn rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

/// What a primitive represents in the complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Part {
    Grass,
    Courtyard,
    Road,
    RoadMarking,
    Sidewalk,
    LightPole,
    LightFixture,
    Structure,
    Roof,
    WindowFrame,
    WindowGlass,
    TreeTrunk,
    TreeLeaves,
}

impl Part {
    /// Flat features lying on the ground plane, subject to elevation banding.
    pub fn is_ground_level(&self) -> bool {
        matches!(
            self,
            Part::Grass | Part::Courtyard | Part::Road | Part::RoadMarking | Part::Sidewalk
        )
    }
}

/// One renderable shape with its material, transform and shadow flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPrimitive {
    pub shape: Shape,
    pub part: Part,
    pub material: Material,
    pub position: Point3<f32>,
    pub rotation: RotationState,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl PlacedPrimitive {
    /// Unrotated primitive with no shadow flags set.
    pub fn new(part: Part, shape: Shape, material: Material, position: Point3<f32>) -> Self {
        Self {
            shape,
            part,
            material,
            position,
            rotation: RotationState::zero(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn rotated(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn elevation(&self) -> f32 {
        self.position.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_follow_shape_order() {
        assert_eq!(Shape::cuboid(1.0, 2.0, 3.0).params(), vec![1.0, 2.0, 3.0]);
        let cone = Shape::Cone {
            radius: 6.0,
            height: 2.0,
            radial_segments: 4,
        };
        assert_eq!(cone.kind(), ShapeKind::Cone);
        assert_eq!(cone.params(), vec![6.0, 2.0, 4.0]);
    }

    #[test]
    fn test_material_opacity() {
        assert!(!Material::opaque(0x123456).is_transparent());
        assert!(Material::translucent(0x87CEEB, 0.8).is_transparent());
        assert_eq!(Material::translucent(0, 3.0).opacity, 1.0);
        assert_eq!(Material::glowing(0xFFFACD, 0x111100).emissive, Some(0x111100));
    }

    #[test]
    fn test_rgb_unpacks_channels() {
        assert_eq!(rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(rgb(0x0000FF), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_builder_flags() {
        let prim = PlacedPrimitive::new(
            Part::Roof,
            Shape::cuboid(1.0, 1.0, 1.0),
            Material::default(),
            Point3::new(0.0, 4.0, 0.0),
        )
        .casting_shadow();
        assert!(prim.cast_shadow);
        assert!(!prim.receive_shadow);
        assert_eq!(prim.elevation(), 4.0);
        assert!(!prim.part.is_ground_level());
    }
}

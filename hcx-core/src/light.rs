/// Light descriptors emitted alongside primitives
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Light {
    Ambient {
        color: u32,
        intensity: f32,
    },
    Directional {
        color: u32,
        intensity: f32,
        position: Point3<f32>,
        cast_shadow: bool,
        shadow_map_size: u32,
    },
    /// `distance` is the falloff radius; zero means no falloff.
    Point {
        color: u32,
        intensity: f32,
        distance: f32,
        position: Point3<f32>,
        cast_shadow: bool,
    },
}

impl Light {
    pub fn color(&self) -> u32 {
        match *self {
            Light::Ambient { color, .. }
            | Light::Directional { color, .. }
            | Light::Point { color, .. } => color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity, .. }
            | Light::Directional { intensity, .. }
            | Light::Point { intensity, .. } => intensity,
        }
    }

    /// Ambient light has no position.
    pub fn position(&self) -> Option<Point3<f32>> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Directional { position, .. } | Light::Point { position, .. } => Some(position),
        }
    }
}

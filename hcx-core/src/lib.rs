/// HCX Core Library - Procedural housing complex layout
///
/// This library produces the scene as plain data: placed primitives and light
/// descriptors. It owns no rendering handles. Renderers tessellate, project and
/// animate the layout using the geometry, projection and animation helpers.

pub mod animation;
pub mod building;
pub mod config;
pub mod geometry;
pub mod ground;
pub mod layout;
pub mod light;
pub mod primitive;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod trees;

// Re-export commonly used types
pub use animation::{orbit_position, AnimationState};
pub use building::{generate_building, BuildingSpec, RoofKind, Wall};
pub use geometry::{Mesh, Triangle, Vertex};
pub use ground::{generate_ground_and_roads, generate_street_light};
pub use layout::SceneLayout;
pub use light::Light;
pub use primitive::{Material, Part, PlacedPrimitive, Shape, ShapeKind};
pub use projection::Camera;
pub use scene::{build_housing_complex, scene_lighting, ComplexConfig};
pub use transform::{RotationState, Transform};
#[cfg(feature = "thread-rng")]
pub use trees::generate_trees;
pub use trees::{generate_trees_with, tree_placements, TreePlacement};

/// Flat, ordered scene description produced by the generators
use serde::{Deserialize, Serialize};

use crate::light::Light;
use crate::primitive::{Part, PlacedPrimitive};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub primitives: Vec<PlacedPrimitive>,
    pub lights: Vec<Light>,
}

impl SceneLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(primitives: usize) -> Self {
        Self {
            primitives: Vec::with_capacity(primitives),
            lights: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: PlacedPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Append another layout, keeping both orders.
    pub fn extend(&mut self, other: SceneLayout) {
        self.primitives.extend(other.primitives);
        self.lights.extend(other.lights);
    }

    /// Number of primitives; lights are not counted.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.lights.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedPrimitive> {
        self.primitives.iter()
    }

    pub fn parts(&self, part: Part) -> impl Iterator<Item = &PlacedPrimitive> {
        self.primitives.iter().filter(move |p| p.part == part)
    }

    pub fn count(&self, part: Part) -> usize {
        self.parts(part).count()
    }
}

impl<'a> IntoIterator for &'a SceneLayout {
    type Item = &'a PlacedPrimitive;
    type IntoIter = std::slice::Iter<'a, PlacedPrimitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

impl FromIterator<PlacedPrimitive> for SceneLayout {
    fn from_iter<I: IntoIterator<Item = PlacedPrimitive>>(iter: I) -> Self {
        Self {
            primitives: iter.into_iter().collect(),
            lights: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Material, Shape};
    use nalgebra::Point3;

    fn prim(part: Part) -> PlacedPrimitive {
        PlacedPrimitive::new(
            part,
            Shape::cuboid(1.0, 1.0, 1.0),
            Material::default(),
            Point3::origin(),
        )
    }

    #[test]
    fn test_extend_preserves_order() {
        let mut a: SceneLayout = vec![prim(Part::Grass)].into_iter().collect();
        let mut b = SceneLayout::new();
        b.push(prim(Part::Road));
        b.add_light(Light::Ambient {
            color: 0x404040,
            intensity: 0.6,
        });
        a.extend(b);

        assert_eq!(a.len(), 2);
        assert_eq!(a.lights.len(), 1);
        assert_eq!(a.primitives[0].part, Part::Grass);
        assert_eq!(a.primitives[1].part, Part::Road);
    }

    #[test]
    fn test_count_by_part() {
        let layout: SceneLayout = [Part::Road, Part::Road, Part::Sidewalk]
            .into_iter()
            .map(prim)
            .collect();
        assert_eq!(layout.count(Part::Road), 2);
        assert_eq!(layout.count(Part::Sidewalk), 1);
        assert_eq!(layout.count(Part::Grass), 0);
    }

    #[test]
    fn test_empty_layout() {
        let layout = SceneLayout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.len(), 0);
    }
}

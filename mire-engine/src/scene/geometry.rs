// geometry.rs - Renderer-side resources
//
// Descriptors for everything the page has to allocate on the GPU. Setup
// registers each one in a ResourceTable; teardown hands the same table back
// to the renderer so every acquisition has a matching release.

use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    Sphere { radius: f32 },
    Dodecahedron { radius: f32 },
    Cylinder { top: f32, bottom: f32, height: f32, radial: u32 },
    Cone { radius: f32, height: f32, radial: u32 },
    Cuboid { width: f32, height: f32, depth: f32 },
    Torus { radius: f32, tube: f32, radial: u32, tubular: u32, arc: f32 },
    /// Flat polygon in the XY plane.
    Outline { points: Vec<[f32; 2]> },
    /// Swept circle along pre-sampled path points.
    Tube { path: Vec<Vec3>, radius: f32, radial: u32 },
    Sprite,
}

/// Geometry plus a translation baked into its vertices, used to move a
/// limb's pivot to its base.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    #[serde(flatten)]
    pub geometry: Geometry,
    pub offset: Vec3,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    Standard {
        color: u32,
        roughness: f32,
        metalness: f32,
        emissive: u32,
        emissive_intensity: f32,
        double_sided: bool,
    },
    Sprite {
        texture: ResourceId,
        opacity: f32,
    },
}

impl Material {
    pub fn standard(color: u32, roughness: f32, metalness: f32) -> Self {
        Self::Standard {
            color,
            roughness,
            metalness,
            emissive: 0,
            emissive_intensity: 0.0,
            double_sided: false,
        }
    }
}

/// Colour stop of a radial gradient: (offset, rgba).
pub type GradientStop = (f32, [u8; 4]);

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Texture {
    RadialGradient { size: u32, stops: Vec<GradientStop> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum Resource {
    Geometry(Shape),
    Material(Material),
    Texture(Texture),
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ResourceTable {
    entries: Vec<(ResourceId, Resource)>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, res: Resource) -> ResourceId {
        let id = ResourceId(self.entries.len() as u32);
        self.entries.push((id, res));
        id
    }

    pub fn geometry(&mut self, geometry: Geometry) -> ResourceId {
        self.shifted(geometry, Vec3::ZERO)
    }

    pub fn shifted(&mut self, geometry: Geometry, offset: Vec3) -> ResourceId {
        self.push(Resource::Geometry(Shape { geometry, offset }))
    }

    pub fn material(&mut self, material: Material) -> ResourceId {
        self.push(Resource::Material(material))
    }

    pub fn texture(&mut self, texture: Texture) -> ResourceId {
        self.push(Resource::Texture(texture))
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.entries.get(id.0 as usize).map(|(_, r)| r)
    }

    pub fn ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_resolvable() {
        let mut table = ResourceTable::new();
        let g = table.geometry(Geometry::Sphere { radius: 1.0 });
        let m = table.material(Material::standard(0x887777, 0.4, 0.1));
        assert_eq!((g, m), (ResourceId(0), ResourceId(1)));
        assert!(matches!(table.get(m), Some(Resource::Material(_))));
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![g, m]);
        assert!(table.get(ResourceId(9)).is_none());
    }

    #[test]
    fn shapes_serialize_flat() {
        let mut table = ResourceTable::new();
        let id = table.shifted(
            Geometry::Cone { radius: 0.1, height: 1.0, radial: 5 },
            Vec3::new(0.0, 0.5, 0.0),
        );
        let json = serde_json::to_value(table.get(id).unwrap()).unwrap();
        assert_eq!(json["resource"], "geometry");
        assert_eq!(json["shape"], "cone");
        assert_eq!(json["offset"][1], 0.5);
    }
}

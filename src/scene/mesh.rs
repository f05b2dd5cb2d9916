use glam::Vec3;

use crate::math::AABB;

/// How a material reacts to scene lighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Lit (PBR metallic-roughness)
    Standard,
    /// Flat colour, ignores lights
    Unlit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    pub shading: Shading,
    pub base_color: [f32; 4],
    /// Index into the owning model's texture list
    pub base_color_texture: Option<usize>,
}

impl Material {
    pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

    pub fn standard(base_color: [f32; 4]) -> Self {
        Self {
            name: None,
            shading: Shading::Standard,
            base_color,
            base_color_texture: None,
        }
    }

    pub fn is_light_reactive(&self) -> bool {
        self.shading == Shading::Standard
    }

    /// Lit equivalent keeping colour and texture map
    pub fn into_light_reactive(self) -> Self {
        Self {
            shading: Shading::Standard,
            ..self
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Self::DEFAULT_COLOR)
    }
}

/// Indexed triangle mesh in object-local space
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    bounds: AABB,
    pub material: Material,
}

impl Mesh {
    /// Triangles referencing missing vertices are dropped
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>, material: Material) -> Self {
        let vertex_count = positions.len();
        let indices: Vec<[u32; 3]> = indices
            .into_iter()
            .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
            .collect();
        let bounds =
            AABB::from_points(&positions).unwrap_or_else(|| AABB::new(Vec3::ZERO, Vec3::ZERO));

        Self {
            positions,
            indices,
            bounds,
            material,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.iter().map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_positions() {
        let mesh = Mesh::new(
            vec![Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 0.0), Vec3::Z],
            vec![[0, 1, 2]],
            Material::default(),
        );
        assert_eq!(mesh.bounds().min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(mesh.bounds().max, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn out_of_range_triangles_are_dropped() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2], [0, 1, 9]],
            Material::default(),
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn unlit_becomes_standard_keeping_color_and_texture() {
        let unlit = Material {
            name: Some("flat".into()),
            shading: Shading::Unlit,
            base_color: [0.1, 0.2, 0.3, 1.0],
            base_color_texture: Some(2),
        };
        let lit = unlit.into_light_reactive();
        assert!(lit.is_light_reactive());
        assert_eq!(lit.base_color, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(lit.base_color_texture, Some(2));
        assert_eq!(lit.name.as_deref(), Some("flat"));
    }
}

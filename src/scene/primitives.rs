use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mesh::{Material, Mesh};

pub const CUBE_SIZE: f32 = 1.0;
pub const PLANE_SIZE: f32 = 1.0;
pub const CAPSULE_RADIUS: f32 = 1.0;
pub const CAPSULE_LENGTH: f32 = 1.0;
pub const CAPSULE_CAP_SEGMENTS: usize = 4;
pub const CAPSULE_RADIAL_SEGMENTS: usize = 8;
pub const CONE_RADIUS: f32 = 1.0;
pub const CONE_HEIGHT: f32 = 1.0;
pub const CYLINDER_RADIUS: f32 = 1.0;
pub const CYLINDER_HEIGHT: f32 = 1.0;
pub const ROUND_RADIAL_SEGMENTS: usize = 32;

/// Procedural shapes the editor can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Cube,
    Plane,
    Capsule,
    Cone,
    Cylinder,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Cube,
        PrimitiveKind::Plane,
        PrimitiveKind::Capsule,
        PrimitiveKind::Cone,
        PrimitiveKind::Cylinder,
    ];

    /// Display name given to new objects of this kind
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Cube => "Cube",
            PrimitiveKind::Plane => "Plane",
            PrimitiveKind::Capsule => "Capsule",
            PrimitiveKind::Cone => "Cone",
            PrimitiveKind::Cylinder => "Cylinder",
        }
    }

    pub fn build_mesh(self) -> Mesh {
        let (positions, indices) = match self {
            PrimitiveKind::Cube => box_geometry(CUBE_SIZE),
            PrimitiveKind::Plane => plane_geometry(PLANE_SIZE),
            PrimitiveKind::Capsule => lathe(
                &capsule_profile(CAPSULE_RADIUS, CAPSULE_LENGTH, CAPSULE_CAP_SEGMENTS),
                CAPSULE_RADIAL_SEGMENTS,
            ),
            PrimitiveKind::Cone => lathe(
                &[
                    (0.0, -CONE_HEIGHT / 2.0),
                    (CONE_RADIUS, -CONE_HEIGHT / 2.0),
                    (0.0, CONE_HEIGHT / 2.0),
                ],
                ROUND_RADIAL_SEGMENTS,
            ),
            PrimitiveKind::Cylinder => lathe(
                &[
                    (0.0, -CYLINDER_HEIGHT / 2.0),
                    (CYLINDER_RADIUS, -CYLINDER_HEIGHT / 2.0),
                    (CYLINDER_RADIUS, CYLINDER_HEIGHT / 2.0),
                    (0.0, CYLINDER_HEIGHT / 2.0),
                ],
                ROUND_RADIAL_SEGMENTS,
            ),
        };

        Mesh::new(positions, indices, Material::default())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Geometry = (Vec<Vec3>, Vec<[u32; 3]>);

fn box_geometry(size: f32) -> Geometry {
    let h = size / 2.0;
    let positions = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { -h } else { h },
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            )
        })
        .collect();

    // Two triangles per face, corners indexed by bit pattern zyx
    let indices = vec![
        [0, 2, 1], [1, 2, 3], // -z
        [4, 5, 6], [5, 7, 6], // +z
        [0, 1, 4], [1, 5, 4], // -y
        [2, 6, 3], [3, 6, 7], // +y
        [0, 4, 2], [2, 4, 6], // -x
        [1, 3, 5], [3, 7, 5], // +x
    ];

    (positions, indices)
}

/// Square in the XY plane facing +Z
fn plane_geometry(size: f32) -> Geometry {
    let h = size / 2.0;
    let positions = vec![
        Vec3::new(-h, -h, 0.0),
        Vec3::new(h, -h, 0.0),
        Vec3::new(-h, h, 0.0),
        Vec3::new(h, h, 0.0),
    ];
    (positions, vec![[0, 1, 2], [2, 1, 3]])
}

/// (radius, y) pairs from the bottom pole to the top pole
fn capsule_profile(radius: f32, length: f32, cap_segments: usize) -> Vec<(f32, f32)> {
    let half = length / 2.0;
    let cap_segments = cap_segments.max(1);

    let bottom = (0..=cap_segments).map(move |i| {
        let theta = -FRAC_PI_2 + FRAC_PI_2 * i as f32 / cap_segments as f32;
        (radius * theta.cos(), -half + radius * theta.sin())
    });
    let top = (0..=cap_segments).map(move |i| {
        let theta = FRAC_PI_2 * i as f32 / cap_segments as f32;
        (radius * theta.cos(), half + radius * theta.sin())
    });

    bottom.chain(top).collect()
}

/// Revolve a profile around the Y axis
fn lathe(profile: &[(f32, f32)], radial_segments: usize) -> Geometry {
    let radial = radial_segments.max(3);

    let positions: Vec<Vec3> = profile
        .iter()
        .flat_map(|&(r, y)| {
            (0..radial).map(move |j| {
                let phi = TAU * j as f32 / radial as f32;
                Vec3::new(r * phi.sin(), y, r * phi.cos())
            })
        })
        .collect();

    let ring = |i: usize, j: usize| (i * radial + j % radial) as u32;
    let indices = (0..profile.len().saturating_sub(1))
        .flat_map(|i| {
            (0..radial).flat_map(move |j| {
                let (a, b) = (ring(i, j), ring(i, j + 1));
                let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
                [[a, c, b], [b, c, d]]
            })
        })
        .collect();

    (positions, indices)
}

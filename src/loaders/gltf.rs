use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glam::Vec3;

use crate::scene::{Material, Mesh, Shading, Transform};

/// Where a model comes from: a file on disk or an uploaded blob
#[derive(Debug, Clone)]
pub enum ModelSource {
    Path(PathBuf),
    Bytes { name: String, data: Vec<u8> },
}

impl ModelSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ModelSource::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        ModelSource::Bytes {
            name: name.into(),
            data,
        }
    }

    /// Fallback display name when the glTF scene is unnamed
    pub fn fallback_name(&self) -> String {
        match self {
            ModelSource::Path(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ModelSource::Bytes { name, .. } => name.clone(),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Path(path) => write!(f, "{}", path.display()),
            ModelSource::Bytes { name, data } => write!(f, "{} ({} bytes)", name, data.len()),
        }
    }
}

/// Decoded node hierarchy of one glTF scene
#[derive(Debug, Clone)]
pub struct ModelData {
    pub name: String,
    pub nodes: Vec<ModelNode>,
}

#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub children: Vec<ModelNode>,
}

impl ModelData {
    /// Depth-first visit of every node
    pub fn for_each_node_mut(&mut self, mut visit: impl FnMut(&mut ModelNode)) {
        let mut stack: Vec<&mut ModelNode> = self.nodes.iter_mut().collect();
        while let Some(node) = stack.pop() {
            visit(node);
            stack.extend(node.children.iter_mut());
        }
    }

    pub fn node_count(&self) -> usize {
        fn count(nodes: &[ModelNode]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.children)).sum()
        }
        count(&self.nodes)
    }

    /// Replace every flat material with a lit one of the same colour and
    /// texture, returns how many were replaced
    pub fn promote_unlit_materials(&mut self) -> usize {
        let mut promoted = 0;
        self.for_each_node_mut(|node| {
            if let Some(mesh) = node.mesh.as_mut() {
                if !mesh.material.is_light_reactive() {
                    mesh.material = mesh.material.clone().into_light_reactive();
                    promoted += 1;
                }
            }
        });
        promoted
    }
}

/// Decode a glTF/GLB model into a node hierarchy
pub fn decode(source: &ModelSource) -> Result<ModelData> {
    let (document, buffers, _images) = match source {
        ModelSource::Path(path) => gltf::import(path)
            .with_context(|| format!("Failed to load glTF file: {:?}", path))?,
        ModelSource::Bytes { name, data } => gltf::import_slice(data)
            .with_context(|| format!("Failed to decode glTF data: {}", name))?,
    };

    log::debug!(
        "glTF decoded: {} scenes, {} nodes, {} meshes, {} materials",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.materials().count()
    );

    let scene = match document.default_scene() {
        Some(scene) => scene,
        None => match document.scenes().next() {
            Some(scene) => scene,
            None => bail!("glTF source {} contains no scenes", source),
        },
    };

    let name = scene
        .name()
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| source.fallback_name());

    let nodes = scene
        .nodes()
        .map(|node| convert_node(&node, &buffers))
        .collect::<Result<Vec<_>>>()?;

    Ok(ModelData { name, nodes })
}

/// Convenience wrapper for callers holding a path
pub fn decode_file(path: impl AsRef<Path>) -> Result<ModelData> {
    decode(&ModelSource::path(path.as_ref()))
}

fn convert_node(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> Result<ModelNode> {
    let name = node.name().unwrap_or_default().to_string();
    let (translation, rotation, scale) = node.transform().decomposed();
    let transform = Transform::from_trs(translation, rotation, scale);

    let mut children = Vec::new();
    let mut mesh = None;

    if let Some(gltf_mesh) = node.mesh() {
        let mut primitives = gltf_mesh
            .primitives()
            .filter_map(|primitive| convert_primitive(&primitive, buffers).transpose())
            .collect::<Result<Vec<_>>>()?;

        // Multi-primitive meshes become one child per primitive
        if primitives.len() == 1 {
            mesh = primitives.pop();
        } else {
            let mesh_name = gltf_mesh.name().unwrap_or(&name).to_string();
            children.extend(primitives.into_iter().enumerate().map(|(i, primitive)| {
                ModelNode {
                    name: format!("{}_{}", mesh_name, i),
                    transform: Transform::IDENTITY,
                    mesh: Some(primitive),
                    children: Vec::new(),
                }
            }));
        }
    }

    for child in node.children() {
        children.push(convert_node(&child, buffers)?);
    }

    Ok(ModelNode {
        name,
        transform,
        mesh,
        children,
    })
}

fn convert_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> Result<Option<Mesh>> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!(
            "Skipping primitive {} with unsupported mode {:?}",
            primitive.index(),
            primitive.mode()
        );
        return Ok(None);
    }

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .context("Mesh primitive has no positions")?
        .map(Vec3::from_array)
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let triangles = indices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect();

    Ok(Some(Mesh::new(
        positions,
        triangles,
        convert_material(&primitive.material()),
    )))
}

fn convert_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    Material {
        name: material.name().map(String::from),
        shading: if material.unlit() {
            Shading::Unlit
        } else {
            Shading::Standard
        },
        base_color: pbr.base_color_factor(),
        base_color_texture: pbr.base_color_texture().map(|info| info.texture().index()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CART: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/cart.gltf");

    #[test]
    fn decodes_node_hierarchy() {
        let model = decode_file(CART).unwrap();
        assert_eq!(model.name, "Cart");
        assert_eq!(model.nodes.len(), 1);

        let body = &model.nodes[0];
        assert_eq!(body.name, "Body");
        let axle = &body.children[0];
        assert_eq!(axle.name, "Axle");

        let wheel = &axle.children[0];
        assert!(wheel.mesh.is_none());
        assert_eq!(wheel.children.len(), 2);

        let hub = &axle.children[1];
        assert_eq!(hub.mesh.as_ref().unwrap().triangle_count(), 1);
        // Body, Axle, Wheel, 2 primitives, Hub
        assert_eq!(model.node_count(), 6);
    }

    #[test]
    fn reads_unlit_materials() {
        let model = decode_file(CART).unwrap();
        let wheel = &model.nodes[0].children[0].children[0];
        let flat = &wheel.children[0].mesh.as_ref().unwrap().material;
        assert_eq!(flat.shading, Shading::Unlit);
        assert_eq!(flat.base_color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn promotes_unlit_materials() {
        let mut model = decode_file(CART).unwrap();
        assert_eq!(model.promote_unlit_materials(), 1);
        assert_eq!(model.promote_unlit_materials(), 0);

        let wheel = &model.nodes[0].children[0].children[0];
        let material = &wheel.children[0].mesh.as_ref().unwrap().material;
        assert!(material.is_light_reactive());
        assert_eq!(material.base_color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn decodes_from_bytes() {
        let data = std::fs::read(CART).unwrap();
        let model = decode(&ModelSource::bytes("upload.gltf", data)).unwrap();
        assert_eq!(model.name, "Cart");
    }

    #[test]
    fn rejects_garbage() {
        let result = decode(&ModelSource::bytes("broken.glb", b"not a model".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_file() {
        assert!(decode_file("does/not/exist.gltf").is_err());
    }

    #[test]
    fn fallback_names() {
        assert_eq!(ModelSource::path("models/duck.glb").fallback_name(), "duck");
        assert_eq!(ModelSource::bytes("blob", Vec::new()).fallback_name(), "blob");
    }
}

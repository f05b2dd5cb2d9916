pub mod gltf;

pub use self::gltf::{decode, decode_file, ModelData, ModelNode, ModelSource};

pub mod graph;
pub mod mesh;
pub mod object;
pub mod primitives;

pub use graph::SceneGraph;
pub use mesh::{Material, Mesh, Shading};
pub use object::{ObjectId, SceneObject, Transform};
pub use primitives::PrimitiveKind;

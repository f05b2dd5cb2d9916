mod events;
mod observer;

pub use events::{EditorEvents, ListEntry, MeshListUpdate, SceneListRemove, SelectUpdate};
pub use observer::{Observer, Subscription};

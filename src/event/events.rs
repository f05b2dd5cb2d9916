use serde::{Deserialize, Serialize};

use super::Observer;
use crate::scene::ObjectId;

/// Row shown in the object list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub id: ObjectId,
    pub name: String,
}

/// A new top-level object entered the world
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshListUpdate {
    pub entry: ListEntry,
}

/// A top-level object left the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneListRemove {
    pub id: ObjectId,
}

/// Selection changed; subscribers re-query the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectUpdate;

/// The editor's event streams
#[derive(Debug, Default)]
pub struct EditorEvents {
    pub mesh_list_update: Observer<MeshListUpdate>,
    pub scene_list_remove: Observer<SceneListRemove>,
    pub select_update: Observer<SelectUpdate>,
}

impl EditorEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

use std::collections::HashMap;

use glam::Mat4;

use super::object::{ObjectId, SceneObject};

/// Owns every object in the world
///
/// Objects without a parent are direct children of the world root and are
/// kept in insertion order; ids are handed out monotonically and never
/// reused.
#[derive(Debug)]
pub struct SceneGraph {
    objects: HashMap<ObjectId, SceneObject>,
    roots: Vec<ObjectId>,
    next_id: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert as a direct child of the world root
    pub fn add(&mut self, mut object: SceneObject) -> ObjectId {
        let id = self.allocate_id();
        object.id = id;
        object.parent = None;
        object.children.clear();
        self.objects.insert(id, object);
        self.roots.push(id);
        id
    }

    /// Insert under an existing parent, `None` if the parent is gone
    pub fn add_child(&mut self, parent: ObjectId, mut object: SceneObject) -> Option<ObjectId> {
        if !self.objects.contains_key(&parent) {
            return None;
        }

        let id = self.allocate_id();
        object.id = id;
        object.parent = Some(parent);
        object.children.clear();
        self.objects.insert(id, object);

        if let Some(parent) = self.objects.get_mut(&parent) {
            parent.children.push(id);
        }
        Some(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Direct children of the world root in insertion order
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .values()
            .find(|object| object.name == name)
            .map(|object| object.id)
    }

    /// Remove an object together with its descendants
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id)?;

        match removed.parent {
            Some(parent_id) => {
                if let Some(parent) = self.objects.get_mut(&parent_id) {
                    parent.children.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        let mut pending = removed.children.clone();
        while let Some(child_id) = pending.pop() {
            if let Some(child) = self.objects.remove(&child_id) {
                pending.extend(child.children);
            }
        }

        Some(removed)
    }

    /// Walk up the parent chain to the direct child of the world root
    pub fn top_level_ancestor(&self, id: ObjectId) -> Option<ObjectId> {
        let mut current = self.objects.get(&id)?;
        while let Some(parent_id) = current.parent {
            current = self.objects.get(&parent_id)?;
        }
        Some(current.id)
    }

    /// True when `id` is `ancestor` or lies somewhere below it
    pub fn is_within(&self, id: ObjectId, ancestor: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == ancestor {
                return true;
            }
            current = self.objects.get(&current_id).and_then(|object| object.parent);
        }
        false
    }

    /// Object-to-world matrix composed through every ancestor
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let mut object = self.objects.get(&id)?;
        let mut matrix = object.transform.local_matrix();
        while let Some(parent_id) = object.parent {
            object = self.objects.get(&parent_id)?;
            matrix = object.transform.local_matrix() * matrix;
        }
        Some(matrix)
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

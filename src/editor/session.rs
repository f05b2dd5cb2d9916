use glam::Vec2;

use super::picking::{self, PickHit};
use super::selection::Selection;
use super::transform_sync::TransformSnapshot;
use crate::camera::Camera;
use crate::event::{EditorEvents, ListEntry, MeshListUpdate, SceneListRemove, SelectUpdate};
use crate::frame::{Frame, FrameClock};
use crate::loaders::{ModelData, ModelNode};
use crate::scene::{ObjectId, PrimitiveKind, SceneGraph, SceneObject};
use crate::viewport::{Viewport, ViewportRect};

/// One editing session: the world, what is selected, and the event streams
/// UI panels listen on
///
/// Event handlers run while the session is mutably borrowed, so they must
/// not reach back into it; they record what changed and re-query later.
#[derive(Debug)]
pub struct EditorSession {
    graph: SceneGraph,
    selection: Selection,
    highlighted: Option<ObjectId>,
    events: EditorEvents,
    camera: Camera,
    viewport: Viewport,
    clock: FrameClock,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            selection: Selection::Empty,
            highlighted: None,
            events: EditorEvents::new(),
            camera: Camera::new(),
            viewport: Viewport::new(),
            clock: FrameClock::new(),
        }
    }

    pub fn events(&self) -> &EditorEvents {
        &self.events
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selection.id()
    }

    /// Object the renderer should outline
    pub fn highlighted(&self) -> Option<ObjectId> {
        self.highlighted
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.graph.get(id)
    }

    pub fn object_count(&self) -> usize {
        self.graph.len()
    }

    /// Top-level objects in the order they were added
    pub fn list_entries(&self) -> Vec<ListEntry> {
        self.graph
            .roots()
            .iter()
            .filter_map(|&id| self.graph.get(id))
            .map(|object| ListEntry {
                id: object.id(),
                name: object.name.clone(),
            })
            .collect()
    }

    // === Scene registry ===

    pub fn add_primitive(&mut self, kind: PrimitiveKind) -> ListEntry {
        let id = self
            .graph
            .add(SceneObject::with_mesh(kind.name(), kind.build_mesh()));
        log::debug!("Added {} as {}", kind, id);
        self.announce(id)
    }

    /// Insert a decoded model under a new top-level group
    pub fn insert_model(&mut self, mut model: ModelData) -> ListEntry {
        let promoted = model.promote_unlit_materials();
        if promoted > 0 {
            log::debug!("Replaced {} unlit materials in {:?}", promoted, model.name);
        }

        let root = self.graph.add(SceneObject::group(model.name));
        for node in model.nodes {
            self.insert_node(root, node);
        }

        log::info!(
            "Inserted model {} with {} objects",
            root,
            self.count_subtree(root)
        );
        self.announce(root)
    }

    fn insert_node(&mut self, parent: ObjectId, node: ModelNode) {
        let mut object = SceneObject::group(node.name).with_transform(node.transform);
        object.mesh = node.mesh;

        if let Some(id) = self.graph.add_child(parent, object) {
            for child in node.children {
                self.insert_node(id, child);
            }
        }
    }

    fn count_subtree(&self, id: ObjectId) -> usize {
        self.graph
            .get(id)
            .map(|object| {
                1 + object
                    .children()
                    .iter()
                    .map(|&child| self.count_subtree(child))
                    .sum::<usize>()
            })
            .unwrap_or(0)
    }

    fn announce(&self, id: ObjectId) -> ListEntry {
        let entry = ListEntry {
            id,
            name: self
                .graph
                .get(id)
                .map(|object| object.name.clone())
                .unwrap_or_default(),
        };
        self.events.mesh_list_update.emit(MeshListUpdate {
            entry: entry.clone(),
        });
        entry
    }

    /// Remove an object and its descendants; false if the id is unknown
    pub fn remove_by_id(&mut self, id: ObjectId) -> bool {
        if !self.graph.contains(id) {
            log::debug!("Remove requested for unknown object {}", id);
            return false;
        }

        self.graph.remove(id);
        log::debug!("Removed {}", id);

        // Selection never outlives its object, even one removed with an ancestor
        if let Some(selected) = self.selection.id() {
            if !self.graph.contains(selected) {
                self.selection = Selection::Empty;
            }
        }
        if let Some(highlighted) = self.highlighted {
            if !self.graph.contains(highlighted) {
                self.highlighted = None;
            }
        }

        self.events.scene_list_remove.emit(SceneListRemove { id });
        true
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selection.id() {
            Some(id) => self.remove_by_id(id),
            None => false,
        }
    }

    // === Selection ===

    /// Select from the object list; unknown ids clear the selection
    pub fn select_by_id(&mut self, id: ObjectId) -> bool {
        let found = self.graph.contains(id);
        self.set_selection(if found { Some(id) } else { None });
        found
    }

    /// Pick at a point in normalized device coordinates
    ///
    /// A miss leaves the current selection untouched.
    pub fn click(&mut self, ndc: Vec2) -> Option<ObjectId> {
        let ray = self.camera.ray_from_ndc(ndc);
        let PickHit {
            object,
            top_level,
            distance,
        } = picking::pick(&self.graph, &ray)?;

        log::debug!(
            "Picked {} at distance {:.3}, selecting {}",
            object,
            distance,
            top_level
        );
        self.set_selection(Some(top_level));
        Some(top_level)
    }

    /// Pick at a pixel position inside the host window
    pub fn click_at(&mut self, x: f32, y: f32) -> Option<ObjectId> {
        let ndc = self.viewport.to_ndc(x, y)?;
        self.click(ndc)
    }

    fn set_selection(&mut self, id: Option<ObjectId>) {
        self.selection = Selection::from(id);
        self.highlighted = id;
        self.events.select_update.emit(SelectUpdate);
    }

    // === Transform synchronizer ===

    pub fn read_snapshot(&self) -> TransformSnapshot {
        self.selection
            .id()
            .and_then(|id| self.graph.get(id))
            .map(|object| TransformSnapshot::from_transform(&object.transform))
            .unwrap_or_default()
    }

    /// Replace the selected object's whole transform; emits nothing so the
    /// panel that wrote it is not fed its own edit back
    pub fn write_snapshot(&mut self, snapshot: &TransformSnapshot) {
        let Some(id) = self.selection.id() else {
            return;
        };
        if let Some(object) = self.graph.get_mut(id) {
            object.transform = snapshot.to_transform();
        }
    }

    // === Viewport ===

    pub fn mount(&mut self, rect: ViewportRect) {
        self.viewport.mount(rect);
        self.camera.set_viewport_size(rect.width, rect.height);
    }

    pub fn unmount(&mut self) {
        self.viewport.unmount();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some((w, h)) = self.viewport.resize(width, height) {
            self.camera.set_viewport_size(w, h);
        }
    }

    /// Per-frame update; does nothing while the viewport is detached
    pub fn tick(&mut self) -> Option<Frame> {
        if !self.viewport.is_mounted() {
            return None;
        }

        Some(Frame {
            info: self.clock.advance(),
            view_projection: self.camera.view_projection(),
            highlighted: self.highlighted,
        })
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

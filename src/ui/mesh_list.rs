use std::cell::RefCell;
use std::rc::Rc;

use crate::editor::EditorSession;
use crate::event::{EditorEvents, ListEntry, Subscription};
use crate::scene::ObjectId;

/// Object list kept in sync through the add/remove streams
#[derive(Debug)]
pub struct MeshListPanel {
    entries: Rc<RefCell<Vec<ListEntry>>>,
    _subscriptions: [Subscription; 2],
}

impl MeshListPanel {
    pub fn new(events: &EditorEvents) -> Self {
        let entries = Rc::new(RefCell::new(Vec::new()));

        let on_add = {
            let entries = Rc::clone(&entries);
            events
                .mesh_list_update
                .subscribe(move |update| entries.borrow_mut().push(update.entry.clone()))
        };
        let on_remove = {
            let entries = Rc::clone(&entries);
            events.scene_list_remove.subscribe(move |removed| {
                entries.borrow_mut().retain(|entry| entry.id != removed.id)
            })
        };

        Self {
            entries,
            _subscriptions: [on_add, on_remove],
        }
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.borrow().iter().any(|entry| entry.id == id)
    }

    /// Row click
    pub fn select(&self, session: &mut EditorSession, id: ObjectId) -> bool {
        session.select_by_id(id)
    }

    /// "-" button
    pub fn remove_selected(&self, session: &mut EditorSession) -> bool {
        session.remove_selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveKind;

    #[test]
    fn follows_adds_and_removes() {
        let mut session = EditorSession::new();
        let panel = MeshListPanel::new(session.events());

        let cube = session.add_primitive(PrimitiveKind::Cube);
        let plane = session.add_primitive(PrimitiveKind::Plane);
        assert_eq!(panel.entries(), vec![cube.clone(), plane.clone()]);

        assert!(panel.select(&mut session, cube.id));
        assert!(panel.remove_selected(&mut session));
        assert_eq!(panel.entries(), vec![plane]);
        assert!(!panel.contains(cube.id));
    }

    #[test]
    fn dropping_panel_unsubscribes() {
        let mut session = EditorSession::new();
        let panel = MeshListPanel::new(session.events());
        assert_eq!(session.events().mesh_list_update.subscriber_count(), 1);

        drop(panel);
        assert_eq!(session.events().mesh_list_update.subscriber_count(), 0);
        session.add_primitive(PrimitiveKind::Cone);
    }
}

use std::cell::Cell;
use std::rc::Rc;

use crate::editor::{parse_field, Axis, EditorSession, TransformField, TransformSnapshot};
use crate::event::{EditorEvents, Subscription};

/// Position/rotation/scale form for the selected object
///
/// Selection and removal events only mark the form stale; `refresh`
/// re-reads the session afterwards.
#[derive(Debug)]
pub struct TransformPanel {
    snapshot: TransformSnapshot,
    enabled: bool,
    stale: Rc<Cell<bool>>,
    _subscriptions: [Subscription; 2],
}

impl TransformPanel {
    pub fn new(events: &EditorEvents) -> Self {
        let stale = Rc::new(Cell::new(false));

        let on_select = {
            let stale = Rc::clone(&stale);
            events.select_update.subscribe(move |_| stale.set(true))
        };
        let on_remove = {
            let stale = Rc::clone(&stale);
            events.scene_list_remove.subscribe(move |_| stale.set(true))
        };

        Self {
            snapshot: TransformSnapshot::default(),
            enabled: false,
            stale,
            _subscriptions: [on_select, on_remove],
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.stale.get()
    }

    /// Re-query the session if anything changed since the last refresh
    pub fn refresh(&mut self, session: &EditorSession) {
        if !self.stale.replace(false) {
            return;
        }

        self.enabled = session.selected().is_some();
        self.snapshot = if self.enabled {
            session.read_snapshot()
        } else {
            TransformSnapshot::default()
        };
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn snapshot(&self) -> TransformSnapshot {
        self.snapshot
    }

    pub fn field_text(&self, field: TransformField, axis: Axis) -> String {
        self.snapshot.field(field, axis).to_string()
    }

    /// Field edit; malformed text counts as zero. The whole form is
    /// written back in one go, re-read first if the selection moved on.
    pub fn edit(
        &mut self,
        session: &mut EditorSession,
        field: TransformField,
        axis: Axis,
        text: &str,
    ) {
        self.refresh(session);
        if !self.enabled {
            return;
        }
        self.snapshot = self.snapshot.with_field(field, axis, parse_field(text));
        session.write_snapshot(&self.snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PrimitiveKind;

    #[test]
    fn disabled_until_something_is_selected() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        session.add_primitive(PrimitiveKind::Cube);

        panel.edit(&mut session, TransformField::Position, Axis::X, "3");
        panel.refresh(&session);
        assert!(!panel.is_enabled());
        assert_eq!(panel.snapshot(), TransformSnapshot::default());
    }

    #[test]
    fn edit_writes_to_selected_object() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let entry = session.add_primitive(PrimitiveKind::Capsule);

        session.select_by_id(entry.id);
        assert!(panel.needs_refresh());
        panel.refresh(&session);
        assert!(panel.is_enabled());

        panel.edit(&mut session, TransformField::Scale, Axis::Y, "2.5");
        panel.edit(&mut session, TransformField::Position, Axis::Z, "oops");
        let transform = session.object(entry.id).unwrap().transform;
        assert_eq!(transform.scale.y, 2.5);
        assert_eq!(transform.position.z, 0.0);
        assert!(!panel.needs_refresh());
    }

    #[test]
    fn edit_after_selection_change_uses_new_object() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let cube = session.add_primitive(PrimitiveKind::Cube);
        let cone = session.add_primitive(PrimitiveKind::Cone);

        session.select_by_id(cube.id);
        panel.edit(&mut session, TransformField::Position, Axis::X, "7");

        session.select_by_id(cone.id);
        panel.edit(&mut session, TransformField::Position, Axis::Y, "1");

        let cube_position = session.object(cube.id).unwrap().transform.position;
        let cone_position = session.object(cone.id).unwrap().transform.position;
        assert_eq!(cube_position, glam::Vec3::new(7.0, 0.0, 0.0));
        assert_eq!(cone_position, glam::Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(panel.snapshot().position.y, 1.0);
    }

    #[test]
    fn edit_after_removal_is_ignored() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let cube = session.add_primitive(PrimitiveKind::Cube);
        session.select_by_id(cube.id);
        panel.refresh(&session);

        session.remove_selected();
        panel.edit(&mut session, TransformField::Scale, Axis::X, "3");
        assert!(!panel.is_enabled());
        assert_eq!(panel.snapshot(), TransformSnapshot::default());
    }

    #[test]
    fn field_text_shows_degrees() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let entry = session.add_primitive(PrimitiveKind::Cube);
        session.select_by_id(entry.id);
        panel.refresh(&session);

        panel.edit(&mut session, TransformField::Rotation, Axis::X, "45");
        assert_eq!(panel.field_text(TransformField::Rotation, Axis::X), "45");
        let rotation = session.object(entry.id).unwrap().transform.rotation;
        assert!((rotation.x - 45f32.to_radians()).abs() < 1e-6);
    }
}

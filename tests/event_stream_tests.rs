use scene_editor::editor::{Axis, EditorSession, TransformField};
use scene_editor::event::{ListEntry, Observer};
use scene_editor::loaders::{ModelData, ModelNode};
use scene_editor::scene::{ObjectId, PrimitiveKind, Transform};
use scene_editor::ui::{MeshListPanel, TransformPanel};
use std::cell::RefCell;
use std::rc::Rc;

fn node(name: &str, children: Vec<ModelNode>) -> ModelNode {
    ModelNode {
        name: name.into(),
        transform: Transform::IDENTITY,
        mesh: Some(PrimitiveKind::Cube.build_mesh()),
        children,
    }
}

/// Cart -> Body -> Axle -> Wheel
fn cart() -> ModelData {
    ModelData {
        name: "Cart".into(),
        nodes: vec![node("Body", vec![node("Axle", vec![node("Wheel", Vec::new())])])],
    }
}

#[cfg(test)]
mod event_stream_tests {
    use super::*;

    #[test]
    fn test_add_and_remove_streams_carry_ids() {
        let mut session = EditorSession::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let _added = {
            let log = Rc::clone(&log);
            session
                .events()
                .mesh_list_update
                .subscribe(move |update| log.borrow_mut().push(format!("+{}", update.entry.id)))
        };
        let _removed = {
            let log = Rc::clone(&log);
            session
                .events()
                .scene_list_remove
                .subscribe(move |removed| log.borrow_mut().push(format!("-{}", removed.id)))
        };

        let cube = session.add_primitive(PrimitiveKind::Cube);
        let plane = session.add_primitive(PrimitiveKind::Plane);
        session.remove_by_id(cube.id);
        assert!(!session.remove_by_id(cube.id));

        assert_eq!(
            *log.borrow(),
            vec![
                format!("+{}", cube.id),
                format!("+{}", plane.id),
                format!("-{}", cube.id)
            ]
        );
    }

    #[test]
    fn test_remove_clears_selection_before_notifying() {
        let mut session = EditorSession::new();
        let cube = session.add_primitive(PrimitiveKind::Cube);
        session.select_by_id(cube.id);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let _removed = {
            let seen = Rc::clone(&seen);
            session
                .events()
                .scene_list_remove
                .subscribe(move |removed| seen.borrow_mut().push(removed.id))
        };

        assert!(session.remove_selected());
        assert_eq!(*seen.borrow(), vec![cube.id]);
        assert_eq!(session.selected(), None);
        assert_eq!(session.highlighted(), None);
        assert!(!session.remove_selected());
    }

    #[test]
    fn test_late_subscriber_sees_only_new_events() {
        let mut session = EditorSession::new();
        session.add_primitive(PrimitiveKind::Cone);

        let entries: Rc<RefCell<Vec<ListEntry>>> = Rc::default();
        let _sub = {
            let entries = Rc::clone(&entries);
            session
                .events()
                .mesh_list_update
                .subscribe(move |update| entries.borrow_mut().push(update.entry.clone()))
        };
        let cylinder = session.add_primitive(PrimitiveKind::Cylinder);

        assert_eq!(*entries.borrow(), vec![cylinder]);
        assert_eq!(session.list_entries().len(), 2);
    }

    #[test]
    fn test_ids_stay_unique_across_removals() {
        let mut session = EditorSession::new();
        let mut seen = Vec::new();

        for round in 0..20 {
            let entry = session.add_primitive(PrimitiveKind::ALL[round % 5]);
            assert!(!seen.contains(&entry.id));
            seen.push(entry.id);
            if round % 3 == 0 {
                session.remove_by_id(entry.id);
            }
        }

        assert_eq!(seen.last(), Some(&ObjectId(20)));
    }

    #[test]
    fn test_observer_is_usable_standalone() {
        let observer: Observer<String> = Observer::new();
        let heard = Rc::new(RefCell::new(String::new()));
        let mut sub = {
            let heard = Rc::clone(&heard);
            observer.subscribe(move |text: &String| heard.borrow_mut().push_str(text))
        };

        observer.emit("a".into());
        sub.unsubscribe();
        observer.emit("b".into());

        assert_eq!(*heard.borrow(), "a");
    }

    #[test]
    fn test_removing_child_keeps_top_level_entry() {
        let mut session = EditorSession::new();
        let list = MeshListPanel::new(session.events());
        let removed = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let removed = Rc::clone(&removed);
            session
                .events()
                .scene_list_remove
                .subscribe(move |event| removed.borrow_mut().push(event.id))
        };

        let root = session.insert_model(cart());
        let axle = session.graph().find_by_name("Axle").unwrap();

        assert!(session.remove_by_id(axle));
        assert_eq!(*removed.borrow(), vec![axle]);
        assert_eq!(list.entries(), vec![root.clone()]);
        assert!(session.graph().find_by_name("Wheel").is_none());
        assert!(session.graph().find_by_name("Body").is_some());
    }

    #[test]
    fn test_removing_ancestor_drops_nested_selection() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let root = session.insert_model(cart());
        let wheel = session.graph().find_by_name("Wheel").unwrap();

        assert!(session.select_by_id(wheel));
        panel.refresh(&session);
        assert!(panel.is_enabled());

        assert!(session.remove_by_id(root.id));
        assert_eq!(session.selected(), None);
        assert_eq!(session.highlighted(), None);
        assert!(!session.remove_selected());

        panel.refresh(&session);
        assert!(!panel.is_enabled());
    }

    #[test]
    fn test_edit_follows_selection_without_refresh() {
        let mut session = EditorSession::new();
        let mut panel = TransformPanel::new(session.events());
        let first = session.add_primitive(PrimitiveKind::Cylinder);
        let second = session.add_primitive(PrimitiveKind::Plane);

        session.select_by_id(first.id);
        panel.edit(&mut session, TransformField::Scale, Axis::Z, "3");

        // Selection moves while the panel still holds the first snapshot
        session.select_by_id(second.id);
        panel.edit(&mut session, TransformField::Position, Axis::X, "-2");

        let first_transform = session.object(first.id).unwrap().transform;
        let second_transform = session.object(second.id).unwrap().transform;
        assert_eq!(first_transform.scale.z, 3.0);
        assert_eq!(first_transform.position.x, 0.0);
        assert_eq!(second_transform.scale.z, 1.0);
        assert_eq!(second_transform.position.x, -2.0);
    }
}

use std::path::PathBuf;

use super::{MeshListPanel, PrimitiveToolbar, TransformPanel};
use crate::editor::{Axis, EditorSession, TransformField};
use crate::event::EditorEvents;
use crate::loaders::ModelSource;
use crate::scene::{ObjectId, PrimitiveKind};

/// What a panel widget asked for during one UI pass
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    AddPrimitive(PrimitiveKind),
    Select(ObjectId),
    RemoveSelected,
    Load(PathBuf),
    Edit {
        field: TransformField,
        axis: Axis,
        text: String,
    },
}

/// All editor panels, wired to one session's event streams
#[derive(Debug)]
pub struct EditorPanels {
    pub mesh_list: MeshListPanel,
    pub transform: TransformPanel,
    pub toolbar: PrimitiveToolbar,
}

impl EditorPanels {
    pub fn new(events: &EditorEvents) -> Self {
        Self {
            mesh_list: MeshListPanel::new(events),
            transform: TransformPanel::new(events),
            toolbar: PrimitiveToolbar,
        }
    }

    pub fn refresh(&mut self, session: &EditorSession) {
        self.transform.refresh(session);
    }

    /// Apply one action; loads are handed back since they finish later
    pub fn apply(&mut self, session: &mut EditorSession, action: PanelAction) -> Option<ModelSource> {
        match action {
            PanelAction::AddPrimitive(kind) => {
                self.toolbar.press(session, kind);
            }
            PanelAction::Select(id) => {
                self.mesh_list.select(session, id);
            }
            PanelAction::RemoveSelected => {
                self.mesh_list.remove_selected(session);
            }
            PanelAction::Load(path) => return Some(ModelSource::path(path)),
            PanelAction::Edit { field, axis, text } => {
                self.transform.edit(session, field, axis, &text);
            }
        }
        self.refresh(session);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_drive_the_session() {
        let mut session = EditorSession::new();
        let mut panels = EditorPanels::new(session.events());

        panels.apply(&mut session, PanelAction::AddPrimitive(PrimitiveKind::Cylinder));
        let id = panels.mesh_list.entries()[0].id;
        panels.apply(&mut session, PanelAction::Select(id));
        assert!(panels.transform.is_enabled());

        panels.apply(
            &mut session,
            PanelAction::Edit {
                field: TransformField::Scale,
                axis: Axis::X,
                text: "4".into(),
            },
        );
        assert_eq!(session.object(id).unwrap().transform.scale.x, 4.0);

        panels.apply(&mut session, PanelAction::RemoveSelected);
        assert!(panels.mesh_list.is_empty());
        assert!(!panels.transform.is_enabled());
    }

    #[test]
    fn load_is_returned_to_caller() {
        let mut session = EditorSession::new();
        let mut panels = EditorPanels::new(session.events());

        let source = panels.apply(&mut session, PanelAction::Load("cart.glb".into()));
        assert_eq!(source.map(|s| s.to_string()), Some("cart.glb".to_string()));
        assert_eq!(session.object_count(), 0);
    }
}

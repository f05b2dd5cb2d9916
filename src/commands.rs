use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editor::{load_from_source, Axis, EditorSession, TransformField, TransformSnapshot};
use crate::event::ListEntry;
use crate::loaders::ModelSource;
use crate::scene::{ObjectId, PrimitiveKind};
use crate::ui::{MeshListPanel, PrimitiveToolbar, TransformPanel};

/// One user intent, as written in a JSON script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    AddPrimitive { kind: PrimitiveKind },
    Load { path: PathBuf },
    Select { id: ObjectId },
    /// Pixel position inside the viewport
    Click { x: f32, y: f32 },
    SetField {
        field: TransformField,
        axis: Axis,
        value: String,
    },
    SetTransform { snapshot: TransformSnapshot },
    Remove { id: ObjectId },
    RemoveSelected,
    Resize { width: u32, height: u32 },
}

impl EditorCommand {
    pub fn parse_script(json: &str) -> Result<Vec<EditorCommand>> {
        serde_json::from_str(json).context("Invalid command script")
    }
}

/// State of the editor after a script ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptReport {
    pub entries: Vec<ListEntry>,
    pub selected: Option<ObjectId>,
    pub transform: TransformSnapshot,
    pub transform_enabled: bool,
    /// Actions that failed, in order; the script keeps going after each
    pub failures: Vec<String>,
}

/// Drives a session through the same panels a UI would use
pub struct ScriptRunner<'a> {
    session: &'a RefCell<EditorSession>,
    list: MeshListPanel,
    transform: TransformPanel,
    toolbar: PrimitiveToolbar,
    failures: Vec<String>,
}

impl<'a> ScriptRunner<'a> {
    pub fn new(session: &'a RefCell<EditorSession>) -> Self {
        let (list, transform) = {
            let session = session.borrow();
            (
                MeshListPanel::new(session.events()),
                TransformPanel::new(session.events()),
            )
        };

        Self {
            session,
            list,
            transform,
            toolbar: PrimitiveToolbar,
            failures: Vec::new(),
        }
    }

    pub fn run(&mut self, commands: &[EditorCommand]) {
        for command in commands {
            self.apply(command);
            self.transform.refresh(&self.session.borrow());
        }
    }

    pub fn apply(&mut self, command: &EditorCommand) {
        log::debug!("Applying {:?}", command);

        match command {
            EditorCommand::AddPrimitive { kind } => {
                self.toolbar.press(&mut self.session.borrow_mut(), *kind);
            }
            EditorCommand::Load { path } => {
                let load = load_from_source(self.session, ModelSource::path(path));
                if let Err(err) = futures::executor::block_on(load) {
                    self.fail(format!("load {}: {}", path.display(), err));
                }
            }
            EditorCommand::Select { id } => {
                if !self.list.select(&mut self.session.borrow_mut(), *id) {
                    self.fail(format!("select {}: no such object", id));
                }
            }
            EditorCommand::Click { x, y } => {
                if self.session.borrow_mut().click_at(*x, *y).is_none() {
                    log::info!("Click at ({}, {}) hit nothing", x, y);
                }
            }
            EditorCommand::SetField { field, axis, value } => {
                self.transform
                    .edit(&mut self.session.borrow_mut(), *field, *axis, value);
            }
            EditorCommand::SetTransform { snapshot } => {
                self.session.borrow_mut().write_snapshot(snapshot);
            }
            EditorCommand::Remove { id } => {
                if !self.session.borrow_mut().remove_by_id(*id) {
                    self.fail(format!("remove {}: no such object", id));
                }
            }
            EditorCommand::RemoveSelected => {
                if !self.list.remove_selected(&mut self.session.borrow_mut()) {
                    self.fail("remove selected: nothing selected".to_string());
                }
            }
            EditorCommand::Resize { width, height } => {
                self.session.borrow_mut().resize(*width, *height);
            }
        }
    }

    fn fail(&mut self, message: String) {
        log::warn!("{}", message);
        self.failures.push(message);
    }

    pub fn list(&self) -> &MeshListPanel {
        &self.list
    }

    pub fn transform_panel(&self) -> &TransformPanel {
        &self.transform
    }

    pub fn report(&self) -> ScriptReport {
        ScriptReport {
            entries: self.list.entries(),
            selected: self.session.borrow().selected(),
            transform: self.transform.snapshot(),
            transform_enabled: self.transform.is_enabled(),
            failures: self.failures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportRect;

    fn mounted() -> RefCell<EditorSession> {
        let mut session = EditorSession::new();
        session.mount(ViewportRect::sized(800, 600));
        RefCell::new(session)
    }

    #[test]
    fn parses_tagged_commands() {
        let script = r#"[
            {"op": "add_primitive", "kind": "cube"},
            {"op": "select", "id": 1},
            {"op": "set_field", "field": "position", "axis": "x", "value": "5"},
            {"op": "remove_selected"}
        ]"#;
        let commands = EditorCommand::parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                EditorCommand::AddPrimitive {
                    kind: PrimitiveKind::Cube
                },
                EditorCommand::Select { id: ObjectId(1) },
                EditorCommand::SetField {
                    field: TransformField::Position,
                    axis: Axis::X,
                    value: "5".into()
                },
                EditorCommand::RemoveSelected,
            ]
        );
    }

    #[test]
    fn rejects_unknown_ops() {
        assert!(EditorCommand::parse_script(r#"[{"op": "explode"}]"#).is_err());
    }

    #[test]
    fn runs_script_and_reports() {
        let session = mounted();
        let mut runner = ScriptRunner::new(&session);
        runner.run(&[
            EditorCommand::AddPrimitive {
                kind: PrimitiveKind::Cube,
            },
            EditorCommand::Select { id: ObjectId(1) },
            EditorCommand::SetField {
                field: TransformField::Position,
                axis: Axis::X,
                value: "5".into(),
            },
        ]);

        let report = runner.report();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.selected, Some(ObjectId(1)));
        assert!(report.transform_enabled);
        assert_eq!(report.transform.position.x, 5.0);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn failures_are_collected() {
        let session = mounted();
        let mut runner = ScriptRunner::new(&session);
        runner.run(&[
            EditorCommand::Remove { id: ObjectId(7) },
            EditorCommand::RemoveSelected,
            EditorCommand::Load {
                path: "missing/model.glb".into(),
            },
        ]);

        let report = runner.report();
        assert_eq!(report.failures.len(), 3);
        assert!(report.entries.is_empty());
    }
}

use crate::editor::EditorSession;
use crate::event::ListEntry;
use crate::scene::PrimitiveKind;

/// "Add ..." buttons
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimitiveToolbar;

impl PrimitiveToolbar {
    pub fn buttons(&self) -> impl Iterator<Item = (String, PrimitiveKind)> {
        PrimitiveKind::ALL
            .into_iter()
            .map(|kind| (format!("Add {}", kind.name()), kind))
    }

    pub fn press(&self, session: &mut EditorSession, kind: PrimitiveKind) -> ListEntry {
        session.add_primitive(kind)
    }
}

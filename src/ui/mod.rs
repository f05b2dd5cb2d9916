mod mesh_list;
mod panels;
mod toolbar;
mod transform_panel;

pub use mesh_list::MeshListPanel;
pub use panels::{EditorPanels, PanelAction};
pub use toolbar::PrimitiveToolbar;
pub use transform_panel::TransformPanel;

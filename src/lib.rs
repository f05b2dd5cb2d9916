pub mod camera;
pub mod cli;
pub mod commands;
pub mod editor;
pub mod event;
pub mod frame;
pub mod input;
pub mod loaders;
pub mod math;
pub mod renderer;
pub mod scene;
pub mod ui;
pub mod viewport;

pub use editor::{load_from_source, EditorError, EditorSession};
pub use scene::{ObjectId, PrimitiveKind};

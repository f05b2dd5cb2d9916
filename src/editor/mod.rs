pub mod error;
pub mod load;
pub mod picking;
pub mod selection;
pub mod session;
pub mod transform_sync;

pub use error::EditorError;
pub use load::{decode_in_background, load_from_source, load_with};
pub use picking::{pick, PickHit};
pub use selection::Selection;
pub use session::EditorSession;
pub use transform_sync::{parse_field, Axes, Axis, TransformField, TransformSnapshot};

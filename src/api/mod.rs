pub mod mask;
pub mod paint;
pub mod session;
pub mod upload;

pub use mask::{__path_handle_mask, handle_mask, MaskRequest};
pub use paint::{__path_handle_paint, handle_paint, PaintQuery};
pub use session::{__path_handle_session, handle_session, SessionResponse};
pub use upload::{__path_handle_upload, handle_upload};

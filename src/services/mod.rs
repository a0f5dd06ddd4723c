pub mod imaging;
pub mod mask_client;
pub mod mask_provider;
pub mod session;

pub use mask_client::SegmentationClient;
pub use mask_provider::MaskProvider;
pub use session::{LoadedImage, MaskTarget, PaintJob, Session, SessionState};

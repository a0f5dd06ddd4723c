pub mod config;
pub mod scene;

pub use config::{AppConfig, CanvasOptions, MaskChannelSetting, MaskOptions, SegmentationConfig};
pub use scene::SceneType;

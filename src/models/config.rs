use paint_recolor::MaskChannel;
use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// External segmentation service
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Working canvas size limits for uploaded photos
    #[serde(default)]
    pub canvas: CanvasOptions,

    /// Mask post-processing
    #[serde(default)]
    pub mask: MaskOptions,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Largest accepted photo upload in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

/// Configuration for the segmentation endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// URL the multipart mask request is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8000/segment".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Largest canvas an uploaded photo is scaled down to.
///
/// Photos within both limits keep their native size.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    #[serde(default = "default_max_side")]
    pub max_width: u32,
    #[serde(default = "default_max_side")]
    pub max_height: u32,
}

fn default_max_side() -> u32 {
    1600
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            max_width: default_max_side(),
            max_height: default_max_side(),
        }
    }
}

/// How a returned mask image is turned into paint weights
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MaskOptions {
    /// Gaussian sigma in pixels for edge feathering (0 disables)
    #[serde(default = "default_feather_sigma")]
    pub feather_sigma: f32,

    /// Channel of the mask image that encodes paintability
    #[serde(default)]
    pub channel: MaskChannelSetting,
}

fn default_feather_sigma() -> f32 {
    2.0
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            feather_sigma: default_feather_sigma(),
            channel: MaskChannelSetting::default(),
        }
    }
}

/// Serialized form of [`MaskChannel`]
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaskChannelSetting {
    #[default]
    Alpha,
    Luminance,
}

impl From<MaskChannelSetting> for MaskChannel {
    fn from(setting: MaskChannelSetting) -> Self {
        match setting {
            MaskChannelSetting::Alpha => MaskChannel::Alpha,
            MaskChannelSetting::Luminance => MaskChannel::Luminance,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    ///
    /// A missing path means defaults. Unreadable or invalid files are logged
    /// and also yield defaults, so a bad config never stops the server.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        endpoint = %config.segmentation.endpoint,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Apply `SEGMENTATION_URL` and `BIND_ADDR` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup("SEGMENTATION_URL").filter(|v| !v.is_empty()) {
            self.segmentation.endpoint = endpoint;
        }
        if let Some(addr) = lookup("BIND_ADDR").filter(|v| !v.is_empty()) {
            self.bind_addr = addr;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            canvas: CanvasOptions::default(),
            mask: MaskOptions::default(),
            bind_addr: default_bind_addr(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

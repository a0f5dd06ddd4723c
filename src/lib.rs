//! Wallpaint - preview a paint color on a photographed wall
//!
//! Uploads a photo to an external segmentation service for a mask of the
//! paintable surface, then repaints that surface with a chosen color while
//! keeping the photo's shading. Pixel math lives in the `paint-recolor`
//! crate; this library adds the service client, the session state machine
//! and the HTTP API. Modules are public for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;

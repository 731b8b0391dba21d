//! pinforge renders finished social-media graphics from a base photo, a
//! title, and optional branding text, across five fixed visual templates.
//!
//! The core is a deterministic compositing pipeline over owned raster
//! buffers: font resolution with fallback, greedy wrapping with auto-shrink,
//! decorative mask generation, and ordered multi-layer blending. Boundary
//! collaborators (base-image generation, output persistence, configuration)
//! sit behind seams so the core never performs I/O.
//!
//! - Build a [`RenderRequest`] and call [`pipeline::render_png`] directly, or
//! - construct a [`service::RenderService`] for the full generate → render →
//!   persist flow.
#![forbid(unsafe_code)]

pub mod config;
pub mod foundation;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod raster;
pub mod service;
pub mod style;
pub mod text;
pub mod upstream;

pub use config::Config;
pub use foundation::error::{PinError, PinResult};
pub use model::{RenderInput, RenderRequest, StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use output::{OutputSink, StoredImage};
pub use pipeline::{render_canvas, render_png};
pub use service::{RenderOutcome, RenderService};
pub use text::font::{FontResolver, FontSpec, Typeface};
pub use upstream::BaseImageSource;
#[cfg(feature = "upstream")]
pub use upstream::UpstreamImageClient;

//! Boarding pass rendering: style resolution, layouts, barcodes and
//! PNG/PDF output.

pub mod assets;
pub mod barcode;
pub mod compositor;
pub mod error;
pub mod export;
pub mod format;
pub mod layout;
pub mod registry;
pub mod service;
pub mod styles;

pub use assets::{AssetStore, FontPainter, TextPainter};
pub use compositor::Compositor;
pub use error::{PassError, RenderError};
pub use export::OutputFormat;
pub use layout::{LayoutRenderer, PassLayout};
pub use registry::{RendererHandle, StyleRegistry};
pub use service::{BoardingPassService, RenderedPass, StyleCatalogue};

use runway_core::{CoreError, RenderField};

/// Failures while drawing or serializing a boarding pass.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Booking is missing fields required by style {style}: {}", join_fields(.fields))]
    MissingFields {
        style: String,
        fields: Vec<RenderField>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No usable template among: {}", .0.join(", "))]
    TemplateNotFound(Vec<String>),

    #[error("Template {name} could not be loaded: {source}")]
    Template {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render worker failed: {0}")]
    Worker(String),
}

fn join_fields(fields: &[RenderField]) -> String {
    fields
        .iter()
        .map(RenderField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures surfaced by [`crate::BoardingPassService`].
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, thiserror::Error)]
pub enum BarcodeError {
    #[error("Barcode payload is empty")]
    EmptyPayload,

    #[error("Barcode size {0}x{1} is not drawable")]
    InvalidSize(u32, u32),

    #[error("Code 128 encoding failed: {0}")]
    Symbology(String),
}

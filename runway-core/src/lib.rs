pub mod booking;
pub mod repository;
pub mod style;

pub use booking::{BookingPassRecord, BookingRenderInfo, RenderField};
pub use style::{StyleConfigSummary, StyleParams, StyleReference};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Missing booking field: {0}")]
    MissingField(RenderField),
}

pub type CoreResult<T> = Result<T, CoreError>;

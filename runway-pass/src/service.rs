use std::sync::Arc;

use runway_core::repository::{BookingRepository, StyleConfigRepository};
use runway_core::{BookingRenderInfo, StyleConfigSummary, StyleReference};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::compositor::Compositor;
use crate::error::{PassError, RenderError};
use crate::export::OutputFormat;
use crate::registry::{RendererHandle, StyleRegistry};

/// Encoded boarding pass ready to be sent.
#[derive(Debug, Clone)]
pub struct RenderedPass {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Styles a caller can ask for.
#[derive(Debug, Clone, Serialize)]
pub struct StyleCatalogue {
    pub styles: Vec<String>,
    pub configs: Vec<StyleConfigSummary>,
}

/// Load booking, resolve style, draw, serialize.
#[derive(Clone)]
pub struct BoardingPassService {
    bookings: Arc<dyn BookingRepository>,
    style_configs: Arc<dyn StyleConfigRepository>,
    registry: Arc<StyleRegistry>,
    compositor: Arc<Compositor>,
}

impl BoardingPassService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        style_configs: Arc<dyn StyleConfigRepository>,
        registry: Arc<StyleRegistry>,
        compositor: Arc<Compositor>,
    ) -> Self {
        Self {
            bookings,
            style_configs,
            registry,
            compositor,
        }
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    async fn load_info(&self, booking_id: &str) -> Result<(BookingRenderInfo, String), PassError> {
        let record = self
            .bookings
            .find_pass_record(booking_id)
            .await
            .map_err(|e| {
                error!(booking_id, error = %e, "Booking lookup failed");
                PassError::Storage(e.to_string())
            })?
            .ok_or_else(|| PassError::NotFound(booking_id.to_string()))?;

        let preferred = record.preferred_style().to_string();
        Ok((BookingRenderInfo::from_record(booking_id, record), preferred))
    }

    /// Renders the boarding pass of `booking_id` in the requested style.
    pub async fn render(
        &self,
        booking_id: &str,
        style: &StyleReference,
        format: OutputFormat,
    ) -> Result<RenderedPass, PassError> {
        let (info, _) = self.load_info(booking_id).await?;
        self.render_info(info, style, format).await
    }

    /// Renders with the style stored on the booking, else the flight's
    /// default style, else the built-in layout.
    pub async fn render_preferred(
        &self,
        booking_id: &str,
        format: OutputFormat,
    ) -> Result<RenderedPass, PassError> {
        let (info, preferred) = self.load_info(booking_id).await?;
        let style = StyleReference::parse(&preferred);
        self.render_info(info, &style, format).await
    }

    async fn render_info(
        &self,
        info: BookingRenderInfo,
        style: &StyleReference,
        format: OutputFormat,
    ) -> Result<RenderedPass, PassError> {
        let handle = self.registry.resolve(style, self.style_configs.as_ref()).await;

        let missing = info.missing_fields(handle.renderer.required_fields());
        if !missing.is_empty() {
            warn!(booking_id = %info.booking_id, style = %style, ?missing, "Booking cannot be rendered");
            return Err(RenderError::MissingFields {
                style: handle.name().to_string(),
                fields: missing,
            }
            .into());
        }

        let booking_id = info.booking_id.clone();
        let compositor = self.compositor.clone();
        let bytes = tokio::task::spawn_blocking(move || draw_and_encode(&compositor, &handle, &info, format))
            .await
            .map_err(|e| RenderError::Worker(e.to_string()))?
            .inspect_err(|e| {
                error!(booking_id = %booking_id, style = %style, error = %e, "Boarding pass rendering failed");
            })?;

        info!(booking_id = %booking_id, style = %style, format = format.extension(), size = bytes.len(), "Boarding pass rendered");

        Ok(RenderedPass {
            bytes,
            content_type: format.content_type(),
            filename: format!("boarding_pass_{}.{}", booking_id, format.extension()),
        })
    }

    /// Registered style names and active stored boarding style configs.
    pub async fn available_styles(&self) -> Result<StyleCatalogue, PassError> {
        let configs = self
            .style_configs
            .list_boarding_styles()
            .await
            .map_err(|e| PassError::Storage(e.to_string()))?;

        Ok(StyleCatalogue {
            styles: self.registry.names(),
            configs,
        })
    }
}

fn draw_and_encode(
    compositor: &Compositor,
    handle: &RendererHandle,
    info: &BookingRenderInfo,
    format: OutputFormat,
) -> Result<Vec<u8>, RenderError> {
    let image = compositor.draw(handle, info)?;
    format.encode(&image)
}

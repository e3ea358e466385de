use image::Rgba;
use runway_core::booking::STANDARD_FIELDS;
use runway_core::{BookingRenderInfo, RenderField, StyleParams};

use crate::error::RenderError;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const PALE_BLUE: Rgba<u8> = Rgba([0x9e, 0xc5, 0xff, 255]);

/// A single line of text placed on the template.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: i32,
    pub y: i32,
    /// Font size in pixels per em
    pub size: f32,
    pub color: Rgba<u8>,
    pub text: String,
}

/// Where the scan code goes and what it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeOp {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    pub payload: String,
}

/// Structured draw instructions for one boarding pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PassLayout {
    /// Template file names, tried in order
    pub templates: Vec<String>,
    pub texts: Vec<TextOp>,
    pub barcode: Option<BarcodeOp>,
}

impl PassLayout {
    pub fn with_templates<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            templates: templates.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn text(&mut self, x: i32, y: i32, size: f32, color: Rgba<u8>, text: impl Into<String>) {
        self.texts.push(TextOp {
            x,
            y,
            size,
            color,
            text: text.into(),
        });
    }

    pub fn barcode(&mut self, x: i64, y: i64, width: u32, height: u32, payload: String) {
        self.barcode = Some(BarcodeOp {
            x,
            y,
            width,
            height,
            payload,
        });
    }

    /// Every text line, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.texts.iter().map(|op| op.text.as_str())
    }
}

/// A boarding pass style.
///
/// Implementations describe where things go; [`crate::Compositor`] turns the
/// description into pixels. They must hold no mutable state so one instance
/// can serve concurrent requests.
pub trait LayoutRenderer: Send + Sync {
    /// Name the style is registered under.
    fn name(&self) -> &'static str;

    /// Fields that must be present before [`LayoutRenderer::layout`] is called.
    fn required_fields(&self) -> &'static [RenderField] {
        STANDARD_FIELDS
    }

    fn layout(&self, info: &BookingRenderInfo, params: &StyleParams) -> Result<PassLayout, RenderError>;
}

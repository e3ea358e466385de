//! Code 128 barcodes for boarding passes.
//!
//! Bars only: no human readable line is drawn, the scan payload is printed
//! elsewhere on the pass by the layout itself.

use barcoders::sym::code128::Code128;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use tracing::warn;

use crate::error::BarcodeError;

/// Width of the boarding pass barcode box in pixels.
pub const BARCODE_WIDTH: u32 = 730;
/// Height of the boarding pass barcode box in pixels.
pub const BARCODE_HEIGHT: u32 = 220;
/// Blank modules added on each side of the symbol.
pub const QUIET_ZONE_MODULES: usize = 10;
/// Separator between the parts of the scan payload. Not escaped.
pub const PAYLOAD_DELIMITER: char = '_';

/// Marker selecting Code 128 character set B (printable ASCII).
const CHARSET_B: char = '\u{0181}';

const BAR: Luma<u8> = Luma([0]);
const SPACE: Luma<u8> = Luma([255]);

/// Scan payload printed on every pass: booking id, flight number and
/// passenger name joined by [`PAYLOAD_DELIMITER`].
pub fn pass_payload(booking_id: &str, flight_number: &str, passenger_name: &str) -> String {
    format!(
        "{booking_id}{d}{flight_number}{d}{passenger_name}",
        d = PAYLOAD_DELIMITER
    )
}

/// Code 128 modules for `payload`: 1 for a bar, 0 for a space, without quiet zone.
///
/// Only printable ASCII is accepted. Anything else either has no set B
/// symbol or is taken by the encoder as a character set switch.
pub fn symbol_modules(payload: &str) -> Result<Vec<u8>, BarcodeError> {
    if payload.is_empty() {
        return Err(BarcodeError::EmptyPayload);
    }
    if let Some(c) = payload.chars().find(|c| !(' '..='~').contains(c)) {
        return Err(BarcodeError::Symbology(format!(
            "character {c:?} has no Code 128 set B symbol"
        )));
    }
    let symbol = Code128::new(format!("{CHARSET_B}{payload}"))
        .map_err(|e| BarcodeError::Symbology(format!("{e:?}")))?;
    Ok(symbol.encode())
}

/// Draws the barcode for `payload` resampled to exactly `width` x `height`.
pub fn try_encode(payload: &str, width: u32, height: u32) -> Result<RgbaImage, BarcodeError> {
    if width == 0 || height == 0 {
        return Err(BarcodeError::InvalidSize(width, height));
    }
    let modules = symbol_modules(payload)?;

    let total = modules.len() + QUIET_ZONE_MODULES * 2;
    let mut bars = GrayImage::from_pixel(total as u32, height, SPACE);
    for (i, module) in modules.iter().enumerate() {
        if *module == 1 {
            let x = (i + QUIET_ZONE_MODULES) as u32;
            for y in 0..height {
                bars.put_pixel(x, y, BAR);
            }
        }
    }

    let scaled = imageops::resize(&bars, width, height, FilterType::Lanczos3);
    Ok(DynamicImage::ImageLuma8(scaled).to_rgba8())
}

/// Like [`try_encode`], but never fails: any error yields a blank white box
/// of the requested size.
pub fn encode(payload: &str, width: u32, height: u32) -> RgbaImage {
    match try_encode(payload, width, height) {
        Ok(img) => img,
        Err(e) => {
            warn!(error = %e, payload, "Barcode generation failed, using blank placeholder");
            RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
        }
    }
}

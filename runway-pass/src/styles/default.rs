use runway_core::style::DEFAULT_STYLE;
use runway_core::{BookingRenderInfo, RenderField, StyleParams};

use crate::barcode::{pass_payload, BARCODE_HEIGHT, BARCODE_WIDTH};
use crate::error::RenderError;
use crate::format::{flight_date_time, serve_class_slug, split_location};
use crate::layout::{LayoutRenderer, PassLayout, PALE_BLUE, WHITE};

/// Template used when no serve-class specific one exists.
pub const FALLBACK_TEMPLATE: &str = "default_economy.png";

const HUGE: f32 = 216.0;
const LARGE: f32 = 128.0;
const MEDIUM: f32 = 64.0;
const SMALL: f32 = 24.0;

/// Note placeholder when the booking has none.
pub const EMPTY_NOTE: &str = "--";

/// Built-in layout: large flight number, airport codes and a barcode on a
/// dark template chosen by serve class.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStyle;

impl DefaultStyle {
    fn templates(serve_class: &str) -> Vec<String> {
        let specific = format!("default_{}.png", serve_class_slug(serve_class));
        if specific == FALLBACK_TEMPLATE {
            vec![specific]
        } else {
            vec![specific, FALLBACK_TEMPLATE.to_string()]
        }
    }
}

impl LayoutRenderer for DefaultStyle {
    fn name(&self) -> &'static str {
        DEFAULT_STYLE
    }

    fn layout(&self, info: &BookingRenderInfo, _params: &StyleParams) -> Result<PassLayout, RenderError> {
        let booking_id = info.text(RenderField::BookingId)?;
        let flight_number = info.text(RenderField::FlightNumber)?;
        let seat = info.text(RenderField::Seat)?;
        let serve_class = info.text(RenderField::ServeClass)?;
        let departure = info.text(RenderField::Departure)?.to_uppercase();
        let arrival = info.text(RenderField::Arrival)?.to_uppercase();
        let passenger = info.text(RenderField::PassengerName)?;
        let (date, time) = flight_date_time(info.departure_time()?);

        let note = info
            .note
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(EMPTY_NOTE);

        let (_, departure_code) = split_location(&departure);
        let (_, arrival_code) = split_location(&arrival);

        let mut layout = PassLayout::with_templates(Self::templates(serve_class));

        layout.text(30, 30, HUGE, WHITE, flight_number.to_uppercase());

        layout.text(30, 300, SMALL, WHITE, "Seat");
        layout.text(30, 330, MEDIUM, WHITE, seat.to_uppercase());

        layout.text(400, 300, SMALL, WHITE, "Date/time");
        layout.text(400, 330, MEDIUM, WHITE, format!("{} {}", date, time));
        layout.text(400, 400, SMALL, PALE_BLUE, "* time in UTC");

        layout.text(1080, 300, SMALL, WHITE, "Passenger name");
        layout.text(1080, 330, MEDIUM, WHITE, passenger.to_uppercase());

        layout.text(1080, 30, SMALL, WHITE, departure);
        layout.text(1080, 60, LARGE, WHITE, departure_code);
        layout.text(1580, 30, SMALL, WHITE, arrival);
        layout.text(1580, 60, LARGE, WHITE, arrival_code);

        layout.text(30, 450, SMALL, PALE_BLUE, "Additional info");
        layout.text(30, 480, SMALL, PALE_BLUE, note);

        layout.text(1580, 300, SMALL, WHITE, "Booking ID");
        layout.text(1580, 330, MEDIUM, WHITE, booking_id.to_uppercase());

        layout.barcode(
            1075,
            450,
            BARCODE_WIDTH,
            BARCODE_HEIGHT,
            pass_payload(booking_id, flight_number, passenger),
        );

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::tests::sample_info;

    #[test]
    fn test_default_layout_contents() {
        let layout = DefaultStyle.layout(&sample_info(), &StyleParams::default()).unwrap();
        let lines: Vec<&str> = layout.lines().collect();

        for expected in ["KL1234", "12A", "AMSTERDAM AMS", "AMS", "JAKARTA CGK", "CGK", "JOHN SMITH", "AB12", "14 NOV 22:13", "--"] {
            assert!(lines.contains(&expected), "missing {expected:?} in {lines:?}");
        }

        let barcode = layout.barcode.as_ref().unwrap();
        assert_eq!(barcode.payload, "AB12_KL1234_JOHN SMITH");
        assert_eq!((barcode.x, barcode.y), (1075, 450));
        assert_eq!((barcode.width, barcode.height), (BARCODE_WIDTH, BARCODE_HEIGHT));
    }

    #[test]
    fn test_template_follows_serve_class() {
        let mut info = sample_info();
        let layout = DefaultStyle.layout(&info, &StyleParams::default()).unwrap();
        assert_eq!(layout.templates, vec!["default_economy-class.png", FALLBACK_TEMPLATE]);

        info.serve_class = Some("Economy".to_string());
        let layout = DefaultStyle.layout(&info, &StyleParams::default()).unwrap();
        assert_eq!(layout.templates, vec![FALLBACK_TEMPLATE]);
    }

    #[test]
    fn test_note_is_kept_verbatim() {
        let mut info = sample_info();
        info.note = Some("Window please".to_string());
        let layout = DefaultStyle.layout(&info, &StyleParams::default()).unwrap();
        assert!(layout.lines().any(|l| l == "Window please"));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let info = sample_info();
        let first = DefaultStyle.layout(&info, &StyleParams::default()).unwrap();
        let second = DefaultStyle.layout(&info, &StyleParams::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_seat_is_an_error() {
        let mut info = sample_info();
        info.seat = None;
        let err = DefaultStyle.layout(&info, &StyleParams::default()).unwrap_err();
        assert!(matches!(err, RenderError::Core(runway_core::CoreError::MissingField(RenderField::Seat))));
    }
}

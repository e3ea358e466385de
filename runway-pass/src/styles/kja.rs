use runway_core::{BookingRenderInfo, RenderField, StyleParams};

use crate::barcode::{pass_payload, BARCODE_HEIGHT, BARCODE_WIDTH};
use crate::error::RenderError;
use crate::format::{flight_date_time, serve_class_abbrev, split_flight_number};
use crate::layout::{LayoutRenderer, PassLayout, BLACK};

pub const KJA_STYLE: &str = "kja";
pub const KJA_TEMPLATE: &str = "kja_bp.png";

const TEXT: f32 = 30.0;
const BOOKING_ID: f32 = 32.0;

/// Two-part light ticket: main coupon on the left, stub on the right.
/// Every value is printed twice, once on each part.
#[derive(Debug, Default, Clone, Copy)]
pub struct KjaStyle;

impl LayoutRenderer for KjaStyle {
    fn name(&self) -> &'static str {
        KJA_STYLE
    }

    fn layout(&self, info: &BookingRenderInfo, params: &StyleParams) -> Result<PassLayout, RenderError> {
        let booking_id = info.text(RenderField::BookingId)?;
        let flight_number = info.text(RenderField::FlightNumber)?;
        let passenger = info.text(RenderField::PassengerName)?.to_uppercase();
        let departure = info.text(RenderField::Departure)?.to_uppercase();
        let arrival = info.text(RenderField::Arrival)?.to_uppercase();
        let seat = info.text(RenderField::Seat)?.to_uppercase();
        let class = serve_class_abbrev(info.text(RenderField::ServeClass)?);
        let gate = info.optional_text(RenderField::Gate).to_uppercase();
        let boarding_till = info.optional_text(RenderField::BoardingTill).to_uppercase();
        let (date, time) = flight_date_time(info.departure_time()?);
        let (carrier, number) = split_flight_number(flight_number);
        let (carrier, number) = (carrier.to_uppercase(), number.to_uppercase());

        let templates = params
            .background
            .iter()
            .map(String::as_str)
            .chain([KJA_TEMPLATE]);
        let mut layout = PassLayout::with_templates(templates);

        twice(&mut layout, &passenger, (192, 340), (1524, 309));
        twice(&mut layout, &departure, (192, 485), (1664, 372));
        twice(&mut layout, &arrival, (192, 603), (1664, 433));
        twice(&mut layout, &class, (616, 750), (1685, 576));
        twice(&mut layout, &date, (1044, 513), (1798, 576));
        twice(&mut layout, &time, (1259, 513), (1935, 576));
        twice(&mut layout, &seat, (832, 752), (1937, 722));
        twice(&mut layout, &gate, (191, 750), (1523, 722));
        twice(&mut layout, &boarding_till, (403, 750), (1726, 722));

        layout.text(620, 513, TEXT, BLACK, carrier.as_str());
        layout.text(832, 513, TEXT, BLACK, number.as_str());
        layout.text(1523, 576, TEXT, BLACK, format!("{} {}", carrier, number));
        layout.text(1980, 252, BOOKING_ID, BLACK, booking_id.to_uppercase());

        layout.barcode(
            660,
            190,
            BARCODE_WIDTH,
            BARCODE_HEIGHT,
            pass_payload(booking_id, flight_number, info.text(RenderField::PassengerName)?),
        );

        Ok(layout)
    }
}

/// Prints `value` on the coupon and again on the stub.
fn twice(layout: &mut PassLayout, value: &str, coupon: (i32, i32), stub: (i32, i32)) {
    layout.text(coupon.0, coupon.1, TEXT, BLACK, value);
    layout.text(stub.0, stub.1, TEXT, BLACK, value);
}

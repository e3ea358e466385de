use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Placeholder printed when a booking carries no passenger name.
pub const UNKNOWN_PASSENGER: &str = "unknown";

/// Booking joined with its scheduled flight, as returned by storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingPassRecord {
    pub flight_number: String,
    pub seat: Option<String>,
    pub serve_class: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    /// Scheduled departure, seconds since epoch (UTC)
    pub flight_datetime: Option<i64>,
    pub note: Option<String>,
    pub user_id: Option<String>,
    pub passenger_name: Option<String>,
    /// Style chosen when the booking was made
    pub boarding_style: Option<String>,
    /// Style configured on the flight itself
    pub flight_default_style: Option<String>,
}

impl BookingPassRecord {
    /// Style to use when the caller did not ask for one: the booking's own
    /// choice, then the flight default, then the built-in layout.
    pub fn preferred_style(&self) -> &str {
        [&self.boarding_style, &self.flight_default_style]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(crate::style::DEFAULT_STYLE)
    }
}

/// Fields a layout can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderField {
    BookingId,
    FlightNumber,
    Seat,
    ServeClass,
    Departure,
    Arrival,
    FlightDatetime,
    PassengerName,
    Note,
    Gate,
    BoardingTill,
}

impl RenderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderField::BookingId => "booking_id",
            RenderField::FlightNumber => "flight_number",
            RenderField::Seat => "seat",
            RenderField::ServeClass => "serve_class",
            RenderField::Departure => "departure",
            RenderField::Arrival => "arrival",
            RenderField::FlightDatetime => "flight_datetime",
            RenderField::PassengerName => "passenger_name",
            RenderField::Note => "note",
            RenderField::Gate => "gate",
            RenderField::BoardingTill => "boarding_till",
        }
    }
}

impl fmt::Display for RenderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every boarding pass layout prints.
pub const STANDARD_FIELDS: &[RenderField] = &[
    RenderField::BookingId,
    RenderField::FlightNumber,
    RenderField::Seat,
    RenderField::ServeClass,
    RenderField::Departure,
    RenderField::Arrival,
    RenderField::FlightDatetime,
    RenderField::PassengerName,
];

/// Everything a renderer may print, assembled fresh for each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRenderInfo {
    pub booking_id: String,
    pub flight_number: String,
    pub seat: Option<String>,
    pub serve_class: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub flight_datetime: Option<i64>,
    pub passenger_name: String,
    pub note: Option<String>,
    pub gate: Option<String>,
    pub boarding_till: Option<String>,
    pub user_id: Option<String>,
}

impl BookingRenderInfo {
    /// Builds render info from a storage record. A missing or blank passenger
    /// name becomes [`UNKNOWN_PASSENGER`] regardless of output format.
    pub fn from_record(booking_id: &str, record: BookingPassRecord) -> Self {
        let passenger_name = record
            .passenger_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PASSENGER.to_string());

        Self {
            booking_id: booking_id.to_string(),
            flight_number: record.flight_number,
            seat: record.seat,
            serve_class: record.serve_class,
            departure: record.departure,
            arrival: record.arrival,
            flight_datetime: record.flight_datetime,
            passenger_name,
            note: record.note,
            gate: None,
            boarding_till: None,
            user_id: record.user_id,
        }
    }

    fn raw(&self, field: RenderField) -> Option<&str> {
        match field {
            RenderField::BookingId => Some(self.booking_id.as_str()),
            RenderField::FlightNumber => Some(self.flight_number.as_str()),
            RenderField::Seat => self.seat.as_deref(),
            RenderField::ServeClass => self.serve_class.as_deref(),
            RenderField::Departure => self.departure.as_deref(),
            RenderField::Arrival => self.arrival.as_deref(),
            RenderField::PassengerName => Some(self.passenger_name.as_str()),
            RenderField::Note => self.note.as_deref(),
            RenderField::Gate => self.gate.as_deref(),
            RenderField::BoardingTill => self.boarding_till.as_deref(),
            RenderField::FlightDatetime => None,
        }
    }

    pub fn is_present(&self, field: RenderField) -> bool {
        match field {
            RenderField::FlightDatetime => self.flight_datetime.is_some(),
            other => self.raw(other).is_some_and(|v| !v.trim().is_empty()),
        }
    }

    /// Required fields that are absent or blank, in the order requested.
    pub fn missing_fields(&self, required: &[RenderField]) -> Vec<RenderField> {
        required
            .iter()
            .copied()
            .filter(|field| !self.is_present(*field))
            .collect()
    }

    /// Text value of a field the layout cannot do without.
    pub fn text(&self, field: RenderField) -> CoreResult<&str> {
        self.raw(field)
            .filter(|v| !v.trim().is_empty())
            .ok_or(CoreError::MissingField(field))
    }

    /// Text value of an optional field; absent renders as an empty string.
    pub fn optional_text(&self, field: RenderField) -> &str {
        self.raw(field).unwrap_or("")
    }

    pub fn departure_time(&self) -> CoreResult<DateTime<Utc>> {
        let secs = self
            .flight_datetime
            .ok_or(CoreError::MissingField(RenderField::FlightDatetime))?;
        DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            CoreError::ValidationError(format!("flight datetime {} is out of range", secs))
        })
    }
}

use chrono::{DateTime, Utc};

/// Longest serve class abbreviation printed on compact layouts.
pub const SERVE_CLASS_ABBREV_LEN: usize = 5;

/// Splits a departure instant into an upper-cased `DD MON` date and a
/// 24-hour `HH:MM` time, both in UTC.
pub fn flight_date_time(instant: DateTime<Utc>) -> (String, String) {
    let date = instant.format("%d %b").to_string().to_uppercase();
    let time = instant.format("%H:%M").to_string();
    (date, time)
}

/// Compacts a serve class name: first two characters of every word,
/// upper-cased, concatenated and cut to [`SERVE_CLASS_ABBREV_LEN`].
pub fn serve_class_abbrev(serve_class: &str) -> String {
    serve_class
        .split_whitespace()
        .flat_map(|word| word.chars().take(2))
        .flat_map(char::to_uppercase)
        .take(SERVE_CLASS_ABBREV_LEN)
        .collect()
}

/// Splits a location display string such as `"Amsterdam AMS"` into the
/// place name and the trailing airport code.
pub fn split_location(display: &str) -> (String, String) {
    let mut words: Vec<&str> = display.split_whitespace().collect();
    match words.pop() {
        Some(code) => (words.join(" "), code.to_string()),
        None => (String::new(), String::new()),
    }
}

/// Splits a flight number into carrier code and number (`"KL1234"` -> `("KL", "1234")`).
pub fn split_flight_number(flight_number: &str) -> (String, String) {
    let carrier: String = flight_number.chars().take(2).collect();
    let number: String = flight_number.chars().skip(2).collect();
    (carrier, number)
}

/// File-name friendly form of a serve class (`"Business Class"` -> `"business-class"`).
pub fn serve_class_slug(serve_class: &str) -> String {
    serve_class.trim().to_lowercase().replace(' ', "-")
}

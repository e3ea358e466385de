use async_trait::async_trait;
use runway_core::repository::BookingRepository;
use runway_core::BookingPassRecord;
use std::error::Error;

pub struct PostgresBookingRepository {
    pub pool: sqlx::PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingPassRow {
    flight_number: String,
    seat: Option<String>,
    serve_class: Option<String>,
    departure: Option<String>,
    arrival: Option<String>,
    flight_datetime: Option<i64>,
    note: Option<String>,
    user_id: Option<String>,
    passenger_name: Option<String>,
    boarding_pass: Option<String>,
    boarding_pass_default: Option<String>,
}

impl From<BookingPassRow> for BookingPassRecord {
    fn from(row: BookingPassRow) -> Self {
        BookingPassRecord {
            flight_number: row.flight_number,
            seat: row.seat,
            serve_class: row.serve_class,
            departure: row.departure,
            arrival: row.arrival,
            flight_datetime: row.flight_datetime,
            note: row.note,
            user_id: row.user_id,
            passenger_name: row.passenger_name,
            boarding_style: row.boarding_pass,
            flight_default_style: row.boarding_pass_default,
        }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_pass_record(
        &self,
        booking_id: &str,
    ) -> Result<Option<BookingPassRecord>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query_as::<_, BookingPassRow>(
            r#"
            SELECT
                b.flight_number, b.seat, b.serve_class,
                s.departure, s.arrival, s.datetime AS flight_datetime,
                b.note, b.user_id::TEXT AS user_id, b.passenger_name,
                b.boarding_pass, s.boarding_pass_default
            FROM bookings b
            JOIN schedule s ON b.flight_number = s.flight_number
            WHERE b.id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BookingPassRecord::from))
    }
}

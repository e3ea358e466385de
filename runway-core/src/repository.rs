use async_trait::async_trait;

use crate::booking::BookingPassRecord;
use crate::style::StyleConfigSummary;

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Booking joined with its flight, or `None` when the booking does not exist.
    async fn find_pass_record(
        &self,
        booking_id: &str,
    ) -> Result<Option<BookingPassRecord>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for boarding style configs
#[async_trait]
pub trait StyleConfigRepository: Send + Sync {
    /// Raw JSON payload of the active boarding style config with this id.
    async fn find_boarding_style(
        &self,
        id: i64,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_boarding_styles(
        &self,
    ) -> Result<Vec<StyleConfigSummary>, Box<dyn std::error::Error + Send + Sync>>;
}

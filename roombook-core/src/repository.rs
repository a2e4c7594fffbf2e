use async_trait::async_trait;
use crate::booking::{Booking, BookingId, NewBooking};
use crate::StoreResult;

/// Repository trait for booking persistence.
///
/// Each call is exactly one round trip to the store. Dropping the returned
/// future abandons the call.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking and return the id the store assigned to it.
    async fn insert(&self, booking: &NewBooking) -> StoreResult<BookingId>;

    /// Every stored booking, in whatever order the store yields them.
    async fn find_all(&self) -> StoreResult<Vec<Booking>>;

    /// `StoreError::NotFound` when nothing matches, including ids the store
    /// could never have issued.
    async fn find_by_id(&self, id: &str) -> StoreResult<Booking>;

    /// `StoreError::NotFound` when zero records were removed.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;
}

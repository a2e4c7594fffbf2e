use async_trait::async_trait;
use bson::oid::ObjectId;
use roombook_core::{Booking, BookingId, BookingRepository, NewBooking, StoreError, StoreResult};
use tokio::sync::RwLock;

/// Process-local booking store, kept in insertion order.
///
/// Ids are fresh ObjectId hex strings and lookups parse the requested id the
/// same way the document store does, so both backends agree on which ids
/// match.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Canonical (lowercase hex) form of a requested id. Anything that is not an
/// ObjectId cannot match.
fn canonical_id(id: &str) -> StoreResult<BookingId> {
    ObjectId::parse_str(id)
        .map(|oid| oid.to_hex())
        .map_err(|_| StoreError::NotFound(id.to_string()))
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> StoreResult<BookingId> {
        let id = ObjectId::new().to_hex();
        self.bookings.write().await.push(booking.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Booking> {
        let wanted = canonical_id(id)?;

        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == wanted)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let wanted = canonical_id(id)?;

        let mut bookings = self.bookings.write().await;
        let position = bookings
            .iter()
            .position(|b| b.id == wanted)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        bookings.remove(position);
        Ok(())
    }
}

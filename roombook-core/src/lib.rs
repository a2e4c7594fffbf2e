pub mod booking;
pub mod repository;

pub use booking::{Booking, BookingId, NewBooking};
pub use repository::BookingRepository;

/// Outcome of a failed store round trip.
///
/// Callers match on the kind; the payload is the store's own message and is
/// only meant for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no booking matches id {0}")]
    NotFound(String),
    #[error("store failure: {0}")]
    Other(String),
}

impl StoreError {
    pub fn other(err: impl std::fmt::Display) -> Self {
        StoreError::Other(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_kind() {
        let missing = StoreError::NotFound("abc".to_string());
        assert_eq!(missing.to_string(), "no booking matches id abc");

        let broken = StoreError::other("connection reset");
        assert_eq!(broken, StoreError::Other("connection reset".to_string()));
    }
}

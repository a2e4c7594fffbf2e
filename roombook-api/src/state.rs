use std::sync::Arc;
use std::time::Duration;
use roombook_core::BookingRepository;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(bookings: Arc<dyn BookingRepository>, store_timeout: Duration) -> Self {
        Self { bookings, store_timeout }
    }
}

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Seconds from the Unix epoch back to 0001-01-01T00:00:00Z.
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

/// Store-assigned identifier, opaque to everything above the adapter.
pub type BookingId = String;

/// A reservation of a room over a time interval.
///
/// No ordering is enforced between `start` and `end`, and two bookings may
/// overlap for the same room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub name: String,
    pub room: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Inbound create payload. Any `id` sent by the client is dropped here.
///
/// Absent fields bind to their zero value: empty strings, and
/// 0001-01-01T00:00:00Z for timestamps. Timestamps are cut to milliseconds,
/// the finest precision the document store keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room: String,
    #[serde(default = "zero_instant", deserialize_with = "millisecond_instant")]
    pub start: DateTime<Utc>,
    #[serde(default = "zero_instant", deserialize_with = "millisecond_instant")]
    pub end: DateTime<Utc>,
}

fn zero_instant() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ZERO_INSTANT_SECS, 0).unwrap_or_default()
}

fn millisecond_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer).map(|instant| instant.trunc_subsecs(3))
}

impl NewBooking {
    /// Attach the id handed back by the store.
    pub fn with_id(self, id: BookingId) -> Booking {
        Booking {
            id,
            name: self.name,
            room: self.room,
            start: self.start,
            end: self.end,
        }
    }
}

impl From<Booking> for NewBooking {
    fn from(booking: Booking) -> Self {
        NewBooking {
            name: booking.name,
            room: booking.room,
            start: booking.start,
            end: booking.end,
        }
    }
}

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use bson::doc;
use mongodb::Collection;
use roombook_core::{Booking, BookingId, BookingRepository, NewBooking, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DbClient;

/// Document layout of the `booking` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    room: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    start: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    end: DateTime<Utc>,
}

impl From<&NewBooking> for BookingDocument {
    fn from(booking: &NewBooking) -> Self {
        BookingDocument {
            id: None,
            name: booking.name.clone(),
            room: booking.room.clone(),
            start: booking.start,
            end: booking.end,
        }
    }
}

impl TryFrom<BookingDocument> for Booking {
    type Error = StoreError;

    fn try_from(document: BookingDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .ok_or_else(|| StoreError::Other("stored booking has no _id".to_string()))?;

        Ok(Booking {
            id: id.to_hex(),
            name: document.name,
            room: document.room,
            start: document.start,
            end: document.end,
        })
    }
}

/// Ids that are not valid ObjectIds cannot match any stored record.
fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))
}

pub struct MongoBookingRepository {
    collection: Collection<BookingDocument>,
}

impl MongoBookingRepository {
    pub fn new(db: &DbClient, collection_name: &str) -> Self {
        Self {
            collection: db.collection(collection_name),
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn insert(&self, booking: &NewBooking) -> StoreResult<BookingId> {
        let result = self
            .collection
            .insert_one(BookingDocument::from(booking))
            .await
            .map_err(StoreError::other)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Other(format!("unexpected inserted id {}", result.inserted_id)))?;

        debug!("Inserted booking document {}", id);
        Ok(id.to_hex())
    }

    async fn find_all(&self) -> StoreResult<Vec<Booking>> {
        let cursor = self.collection.find(doc! {}).await.map_err(StoreError::other)?;
        let documents: Vec<BookingDocument> = cursor.try_collect().await.map_err(StoreError::other)?;

        documents.into_iter().map(Booking::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Booking> {
        let oid = parse_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(StoreError::other)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
            .and_then(Booking::try_from)
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let oid = parse_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(StoreError::other)?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        debug!("Deleted booking document {}", oid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> NewBooking {
        NewBooking {
            name: "Alice".to_string(),
            room: "101".to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        assert_eq!(parse_id("not-an-object-id"), Err(StoreError::NotFound("not-an-object-id".to_string())));
        assert!(parse_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
        assert_eq!(parse_id("65A1F0C2E4B0A1B2C3D4E5F6"), parse_id("65a1f0c2e4b0a1b2c3d4e5f6"));
    }

    #[test]
    fn test_new_document_has_no_id() {
        let document = bson::to_document(&BookingDocument::from(&sample())).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("room").unwrap(), "101");
        assert!(document.get_datetime("start").is_ok());
    }

    #[test]
    fn test_document_to_booking() {
        let oid = ObjectId::new();
        let mut document = BookingDocument::from(&sample());
        document.id = Some(oid);

        let booking = Booking::try_from(document).unwrap();
        assert_eq!(booking.id, oid.to_hex());
        assert_eq!(NewBooking::from(booking), sample());
    }

    #[test]
    fn test_bound_timestamps_survive_storage() {
        let payload = r#"{
            "name": "Alice",
            "room": "101",
            "start": "2024-01-01T10:00:00.123456Z",
            "end": "2024-01-01T11:00:00.987654Z"
        }"#;
        let new: NewBooking = serde_json::from_str(payload).unwrap();

        let stored = bson::to_document(&BookingDocument::from(&new)).unwrap();
        let mut document: BookingDocument = bson::from_document(stored).unwrap();
        document.id = Some(ObjectId::new());

        let fetched = Booking::try_from(document).unwrap();
        assert_eq!(NewBooking::from(fetched), new);
    }

    #[tokio::test]
    #[ignore = "needs a MongoDB reachable at DATABASE_URL"]
    async fn test_mongo_lifecycle() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let db = DbClient::connect(&url, "roombook_test").await.unwrap();
        let repo = MongoBookingRepository::new(&db, &format!("booking_{}", ObjectId::new()));

        let id = repo.insert(&sample()).await.unwrap();
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);

        let fetched = repo.find_by_id(&id.to_uppercase()).await.unwrap();
        assert_eq!(NewBooking::from(fetched), sample());

        let unknown = ObjectId::new().to_hex();
        assert_eq!(repo.find_by_id(&unknown).await, Err(StoreError::NotFound(unknown.clone())));
        assert_eq!(repo.delete_by_id("bogus").await, Err(StoreError::NotFound("bogus".to_string())));

        repo.delete_by_id(&id).await.unwrap();
        assert_eq!(repo.delete_by_id(&id).await, Err(StoreError::NotFound(id.clone())));
        assert!(repo.find_all().await.unwrap().is_empty());

        repo.collection.drop().await.unwrap();
    }

    #[test]
    fn test_document_without_id_is_internal() {
        let result = Booking::try_from(BookingDocument::from(&sample()));
        assert!(matches!(result, Err(StoreError::Other(_))));
    }
}

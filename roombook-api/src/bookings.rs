use std::future::Future;

use axum::{
    extract::{Json, Path, State},
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;
use roombook_core::{Booking, NewBooking, StoreResult};
use tracing::info;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/{id}", get(get_booking).delete(delete_booking))
}

/// Run one store call under the configured deadline. The call is dropped,
/// and so abandoned, once the deadline passes.
async fn store_call<T>(
    state: &AppState,
    call: impl Future<Output = StoreResult<T>>,
) -> Result<T, AppError> {
    match tokio::time::timeout(state.store_timeout, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AppError::InternalServerError(format!(
            "store call did not complete within {:?}",
            state.store_timeout
        ))),
    }
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<NewBooking>, AppError>,
) -> Result<Json<Booking>, AppError> {
    let id = store_call(&state, state.bookings.insert(&req)).await?;

    info!("Booking created: {} (room {})", id, req.room);

    Ok(Json(req.with_id(id)))
}

/// GET /bookings
/// Ordered by start time; bookings sharing a start keep the store's order.
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let mut bookings = store_call(&state, state.bookings.find_all()).await?;
    bookings.sort_by_key(|b| b.start);

    Ok(Json(bookings))
}

/// GET /bookings/{id}
async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let booking = store_call(&state, state.bookings.find_by_id(&id)).await?;
    Ok(Json(booking))
}

/// DELETE /bookings/{id}
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    store_call(&state, state.bookings.delete_by_id(&id)).await?;

    info!("Booking deleted: {}", id);

    Ok(Json(""))
}

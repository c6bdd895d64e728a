use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingRequest};
use crate::services::booking;
use crate::state::AppState;

// POST /bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let created = {
        let db = state.conn()?;
        booking::create_booking(&db, req)?
    };

    Ok((StatusCode::CREATED, Json(created)))
}

// GET /bookings
#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub date: Option<String>,
    pub room: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let bookings = {
        let db = state.conn()?;
        booking::list_bookings(&db, query.date.as_deref(), query.room.as_deref())?
    };

    Ok(Json(bookings))
}

// DELETE /bookings/:id
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cancelled = {
        let db = state.conn()?;
        booking::cancel_booking(&db, &id)?
    };

    Ok(Json(serde_json::json!({
        "message": "Booking cancelled successfully.",
        "id": cancelled.id,
    })))
}

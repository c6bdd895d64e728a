use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Period, SlotGrid};
use crate::services::booking;
use crate::state::AppState;

// GET /rooms
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.config.rooms.clone())
}

// GET /slots
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub room: Option<String>,
    pub date: Option<String>,
    pub period: Option<Period>,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SlotsQuery>, QueryRejection>,
) -> Result<Json<SlotGrid>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let grid = {
        let db = state.conn()?;
        booking::slot_grid(&db, query.room.as_deref(), query.date.as_deref(), query.period)?
    };

    Ok(Json(grid))
}

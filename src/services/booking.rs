use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingFilter, BookingRequest, NewBooking, Period, SlotGrid, TimeSlot};

pub fn validate_request(req: BookingRequest) -> Result<NewBooking, AppError> {
    let fields = [
        ("name", req.name),
        ("email", req.email),
        ("phone", req.phone),
        ("purpose", req.purpose),
        ("room", req.room),
        ("date", req.date),
        ("timeSlot", req.time_slot),
    ];

    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| non_empty(value.as_deref()).is_none())
        .map(|(field, _)| *field)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "All fields are required. Missing: {}",
            missing.join(", ")
        )));
    }

    let [name, email, phone, purpose, room, date, time_slot] =
        fields.map(|(_, value)| value.unwrap_or_default().trim().to_string());

    Ok(NewBooking {
        date: parse_date(&date)?,
        time_slot: time_slot
            .parse::<TimeSlot>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
        name,
        email,
        phone,
        purpose,
        room,
    })
}

pub fn create_booking(conn: &Connection, req: BookingRequest) -> Result<Booking, AppError> {
    let new = validate_request(req)?;

    match queries::insert_booking(conn, &new) {
        Ok(booking) => {
            tracing::info!(
                id = %booking.id,
                room = %booking.room,
                date = %booking.date,
                slot = %booking.time_slot,
                "booking created"
            );
            Ok(booking)
        }
        Err(e) => {
            let err = AppError::from(e);
            if matches!(err, AppError::Conflict) {
                tracing::info!(room = %new.room, date = %new.date, slot = %new.time_slot, "slot already booked");
            }
            Err(err)
        }
    }
}

/// Empty filter values are treated as absent.
pub fn list_bookings(
    conn: &Connection,
    date: Option<&str>,
    room: Option<&str>,
) -> Result<Vec<Booking>, AppError> {
    let filter = BookingFilter {
        date: non_empty(date).map(parse_date).transpose()?,
        room: non_empty(room).map(str::to_string),
    };

    Ok(queries::find_bookings(conn, &filter)?)
}

pub fn cancel_booking(conn: &Connection, id: &str) -> Result<Booking, AppError> {
    let booking = queries::delete_booking(conn, id)?;
    tracing::info!(
        id = %booking.id,
        room = %booking.room,
        date = %booking.date,
        slot = %booking.time_slot,
        "booking cancelled"
    );
    Ok(booking)
}

pub fn slot_grid(
    conn: &Connection,
    room: Option<&str>,
    date: Option<&str>,
    period: Option<Period>,
) -> Result<SlotGrid, AppError> {
    let (Some(room), Some(date)) = (non_empty(room), non_empty(date)) else {
        return Err(AppError::Validation("room and date are required.".to_string()));
    };

    let date = parse_date(date)?;
    let filter = BookingFilter {
        date: Some(date),
        room: Some(room.to_string()),
    };
    let bookings = queries::find_bookings(conn, &filter)?;

    Ok(SlotGrid::build(room.to_string(), date, &bookings, period))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("invalid date {value:?}, expected YYYY-MM-DD")))
}

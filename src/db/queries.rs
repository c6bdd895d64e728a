use chrono::{NaiveDate, NaiveDateTime, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{Booking, BookingFilter, NewBooking};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, name, email, phone, purpose, room, date, time_slot, created_at";

// ── Bookings ──

/// Stores a new booking. The unique index on (room, date, time_slot) is the
/// only conflict check; a violation comes back as `StoreError::Conflict`.
pub fn insert_booking(conn: &Connection, new: &NewBooking) -> Result<Booking, StoreError> {
    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        name: new.name.clone(),
        email: new.email.clone(),
        phone: new.phone.clone(),
        purpose: new.purpose.clone(),
        room: new.room.clone(),
        date: new.date,
        time_slot: new.time_slot,
        // Stored at second precision.
        created_at: Utc::now().trunc_subsecs(0),
    };

    let result = conn.execute(
        "INSERT INTO bookings (id, name, email, phone, purpose, room, date, time_slot, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            booking.id,
            booking.name,
            booking.email,
            booking.phone,
            booking.purpose,
            booking.room,
            booking.date.format(DATE_FORMAT).to_string(),
            booking.time_slot,
            booking.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    );

    match result {
        Ok(_) => Ok(booking),
        Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict),
        Err(e) => Err(e.into()),
    }
}

pub fn find_bookings(conn: &Connection, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
    let date = filter.date.map(|d| d.format(DATE_FORMAT).to_string());

    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE (?1 IS NULL OR date = ?1) AND (?2 IS NULL OR room = ?2)
         ORDER BY date ASC, time_slot ASC, room ASC"
    ))?;

    let rows = stmt.query_map(params![date, filter.room], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> Result<Option<Booking>, StoreError> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Removes a booking and returns what was removed.
pub fn delete_booking(conn: &Connection, id: &str) -> Result<Booking, StoreError> {
    let result = conn.query_row(
        &format!("DELETE FROM bookings WHERE id = ?1 RETURNING {BOOKING_COLUMNS}"),
        params![id],
        parse_booking_row,
    );

    match result {
        Ok(booking) => Ok(booking),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let date_str: String = row.get(6)?;
    let created_at_str: String = row.get(8)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e)))?
        .and_utc();

    Ok(Booking {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        purpose: row.get(4)?,
        room: row.get(5)?,
        date,
        time_slot: row.get(7)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::TimeSlot;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_booking(room: &str, day: &str, slot: &str) -> NewBooking {
        NewBooking {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            phone: "555".to_string(),
            purpose: "meeting".to_string(),
            room: room.to_string(),
            date: date(day),
            time_slot: slot.parse().unwrap(),
        }
    }

    fn filter(day: Option<&str>, room: Option<&str>) -> BookingFilter {
        BookingFilter {
            date: day.map(date),
            room: room.map(str::to_string),
        }
    }

    #[test]
    fn test_distinct_slots_get_unique_ids() {
        let conn = setup_db();
        let mut ids = HashSet::new();
        for room in ["Room A", "Room B"] {
            for slot in TimeSlot::all() {
                let booking =
                    insert_booking(&conn, &new_booking(room, "2024-06-01", &slot.label())).unwrap();
                assert!(ids.insert(booking.id));
            }
        }
        assert_eq!(ids.len(), 48);
        assert_eq!(find_bookings(&conn, &BookingFilter::default()).unwrap().len(), 48);
    }

    #[test]
    fn test_duplicate_slot_conflicts() {
        let conn = setup_db();
        let first = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();

        let mut second = new_booking("Room A", "2024-06-01", "10:00 AM");
        second.name = "Bob".to_string();
        let err = insert_booking(&conn, &second).unwrap_err();
        assert!(matches!(err, StoreError::Conflict));

        let all = find_bookings(&conn, &BookingFilter::default()).unwrap();
        assert_eq!(all, vec![first]);
    }

    #[test]
    fn test_same_slot_other_room_or_day_is_fine() {
        let conn = setup_db();
        insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();
        insert_booking(&conn, &new_booking("Room B", "2024-06-01", "10:00 AM")).unwrap();
        insert_booking(&conn, &new_booking("Room A", "2024-06-02", "10:00 AM")).unwrap();
    }

    #[test]
    fn test_find_orders_slots_chronologically() {
        let conn = setup_db();
        let b2 = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "02:00 PM")).unwrap();
        let b1 = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "09:00 AM")).unwrap();
        insert_booking(&conn, &new_booking("Room B", "2024-06-01", "09:00 AM")).unwrap();

        let found = find_bookings(&conn, &filter(Some("2024-06-01"), Some("Room A"))).unwrap();
        assert_eq!(found, vec![b1, b2]);
    }

    #[test]
    fn test_find_orders_by_date_first() {
        let conn = setup_db();
        let later = insert_booking(&conn, &new_booking("Room A", "2024-06-02", "01:00 AM")).unwrap();
        let earlier = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "11:00 PM")).unwrap();

        let found = find_bookings(&conn, &filter(None, Some("Room A"))).unwrap();
        assert_eq!(found, vec![earlier, later]);
    }

    #[test]
    fn test_find_by_date_only() {
        let conn = setup_db();
        insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();
        insert_booking(&conn, &new_booking("Room B", "2024-06-01", "10:00 AM")).unwrap();
        insert_booking(&conn, &new_booking("Room A", "2024-06-02", "10:00 AM")).unwrap();

        let found = find_bookings(&conn, &filter(Some("2024-06-01"), None)).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].room, "Room A");
        assert_eq!(found[1].room, "Room B");
    }

    #[test]
    fn test_find_no_matches_is_empty() {
        let conn = setup_db();
        insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();

        let found = find_bookings(&conn, &filter(Some("2024-06-01"), Some("Room C"))).unwrap();
        assert!(found.is_empty());
        let found = find_bookings(&setup_db(), &BookingFilter::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_delete_once_then_not_found() {
        let conn = setup_db();
        let booking = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();

        let deleted = delete_booking(&conn, &booking.id).unwrap();
        assert_eq!(deleted, booking);
        assert!(matches!(delete_booking(&conn, &booking.id), Err(StoreError::NotFound)));
        assert!(get_booking_by_id(&conn, &booking.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_frees_the_slot() {
        let conn = setup_db();
        let booking = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();
        delete_booking(&conn, &booking.id).unwrap();

        let again = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM")).unwrap();
        assert_ne!(again.id, booking.id);
    }

    #[test]
    fn test_get_booking_by_id_round_trips_fields() {
        let conn = setup_db();
        let booking = insert_booking(&conn, &new_booking("Room A", "2024-06-01", "12:00 AM")).unwrap();

        let loaded = get_booking_by_id(&conn, &booking.id).unwrap().unwrap();
        assert_eq!(loaded, booking);
        assert_eq!(loaded.time_slot.hour(), 0);
    }

    #[test]
    fn test_separate_connections_cannot_double_book() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookings.db");
        let path = path.to_str().unwrap().to_string();

        // Apply migrations once before racing.
        drop(db::init_db(&path).unwrap());

        let barrier = Arc::new(Barrier::new(2));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let path = path.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let conn = db::init_db(&path).unwrap();
                    barrier.wait();
                    insert_booking(&conn, &new_booking("Room A", "2024-06-01", "10:00 AM"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::Conflict)))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 1);

        let conn = db::init_db(&path).unwrap();
        assert_eq!(find_bookings(&conn, &BookingFilter::default()).unwrap().len(), 1);
    }
}

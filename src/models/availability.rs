use chrono::NaiveDate;
use serde::Serialize;

use super::{Booking, Period, TimeSlot};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub time_slot: TimeSlot,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

/// Occupancy of one room for one day.
#[derive(Debug, Clone, Serialize)]
pub struct SlotGrid {
    pub room: String,
    pub date: NaiveDate,
    pub slots: Vec<SlotStatus>,
}

impl SlotGrid {
    /// `bookings` must already be restricted to `room` and `date`.
    pub fn build(room: String, date: NaiveDate, bookings: &[Booking], period: Option<Period>) -> Self {
        let slots = TimeSlot::all()
            .filter(|slot| period.map_or(true, |p| slot.period() == p))
            .map(|slot| {
                let booking = bookings.iter().find(|b| b.time_slot == slot);
                SlotStatus {
                    time_slot: slot,
                    occupied: booking.is_some(),
                    booking_id: booking.map(|b| b.id.clone()),
                }
            })
            .collect();

        Self { room, date, slots }
    }
}

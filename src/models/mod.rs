pub mod availability;
pub mod booking;
pub mod slot;

pub use availability::{SlotGrid, SlotStatus};
pub use booking::{Booking, BookingFilter, BookingRequest, NewBooking};
pub use slot::{InvalidTimeSlot, Period, TimeSlot};

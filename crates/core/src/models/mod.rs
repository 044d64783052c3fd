//! Shared domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A traveller requesting a seat.
///
/// The name is the only identity a passenger carries; age and gender are
/// stored as given and never validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Name used to match name-based cancellations.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Free-form gender label.
    pub gender: String,
}

impl Passenger {
    /// Build a passenger record.
    pub fn new(name: impl Into<String>, age: i32, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
        }
    }
}

/// Reference handed out for every successful booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{:06}", self.0)
    }
}

impl From<u64> for BookingId {
    fn from(n: u64) -> Self {
        BookingId(n)
    }
}

/// A seat held on one train by a copy of the passenger's details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// System-assigned booking reference.
    pub id: BookingId,
    /// Passenger details captured at booking time.
    pub passenger: Passenger,
    /// When the seat was reserved.
    pub booked_at: DateTime<Utc>,
}

/// One row of a day's availability listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Train number, unique within its day.
    pub number: u32,
    /// Service name.
    pub name: String,
    /// Total seats.
    pub capacity: u32,
    /// Seats still free.
    pub available: u32,
}

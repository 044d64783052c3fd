//! Failures returned by reservation operations.
//!
//! Every variant is recoverable: callers report it and carry on. None of
//! them leave partial state behind.

use thiserror::Error;

use crate::models::BookingId;

/// Result alias for reservation operations.
pub type Result<T> = std::result::Result<T, ReservationError>;

/// Why a reservation operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// No day with this name has been added.
    #[error("Day not found.")]
    DayNotFound {
        /// Requested day name.
        day: String,
    },

    /// The day exists but has no train with this number.
    #[error("Train with number {number} not found.")]
    TrainNotFound {
        /// Day that was searched.
        day: String,
        /// Requested train number.
        number: u32,
    },

    /// The train is already at capacity.
    #[error("No available seats in train {number} for {passenger} on {day}")]
    NoSeatsAvailable {
        /// Day of the full train.
        day: String,
        /// Full train number.
        number: u32,
        /// Passenger who could not be seated.
        passenger: String,
    },

    /// No booking on the train carries this passenger name.
    #[error("Passenger {passenger} not found in train {number} on {day}")]
    PassengerNotFound {
        /// Day of the train.
        day: String,
        /// Train number searched.
        number: u32,
        /// Passenger name searched for.
        passenger: String,
    },

    /// No booking on the train carries this reference.
    #[error("Booking {id} not found in train {number} on {day}")]
    BookingNotFound {
        /// Day of the train.
        day: String,
        /// Train number searched.
        number: u32,
        /// Booking reference searched for.
        id: BookingId,
    },

    /// A day with this name already exists.
    #[error("Day {day} already exists.")]
    DuplicateDay {
        /// Conflicting day name.
        day: String,
    },

    /// The day already has a train with this number.
    #[error("Train with number {number} already exists on {day}.")]
    DuplicateTrain {
        /// Day holding the existing train.
        day: String,
        /// Conflicting train number.
        number: u32,
    },
}

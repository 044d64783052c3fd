use chrono::{DateTime, Utc};

use crate::models::{Booking, BookingId, Passenger, TrainSummary};

/// A scheduled service with a fixed number of seats.
///
/// Bookings are kept in the order they were made. The list only grows
/// through [`Train::reserve_seat`], which never lets it exceed capacity.
#[derive(Debug, Clone)]
pub struct Train {
    number: u32,
    name: String,
    capacity: u32,
    bookings: Vec<Booking>,
}

impl Train {
    /// Create an empty train.
    pub fn new(number: u32, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            number,
            name: name.into(),
            capacity,
            bookings: Vec::new(),
        }
    }

    /// Train number, unique within its day.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Service name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total seats.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of seats currently held.
    pub fn booked(&self) -> usize {
        self.bookings.len()
    }

    /// Seats still free.
    pub fn available_seats(&self) -> u32 {
        let booked = u32::try_from(self.bookings.len()).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(booked)
    }

    /// Whether another seat can be reserved.
    pub fn is_available(&self) -> bool {
        self.bookings.len() < self.capacity as usize
    }

    /// Bookings in the order they were made.
    pub fn passengers(&self) -> &[Booking] {
        &self.bookings
    }

    /// Availability row for listings.
    pub fn summary(&self) -> TrainSummary {
        TrainSummary {
            number: self.number,
            name: self.name.clone(),
            capacity: self.capacity,
            available: self.available_seats(),
        }
    }

    /// Store a copy of `passenger` under `id`, or return `None` when the
    /// train is full. A full train is left untouched.
    pub fn reserve_seat(
        &mut self,
        passenger: &Passenger,
        id: BookingId,
        booked_at: DateTime<Utc>,
    ) -> Option<&Booking> {
        if !self.is_available() {
            return None;
        }
        self.bookings.push(Booking {
            id,
            passenger: passenger.clone(),
            booked_at,
        });
        self.bookings.last()
    }

    /// Remove the earliest booking whose passenger name equals `name`.
    pub fn cancel_reservation(&mut self, name: &str) -> Option<Booking> {
        let index = self
            .bookings
            .iter()
            .position(|booking| booking.passenger.name == name)?;
        Some(self.bookings.remove(index))
    }

    /// Remove the booking carrying `id`.
    pub fn cancel_booking(&mut self, id: BookingId) -> Option<Booking> {
        let index = self.bookings.iter().position(|booking| booking.id == id)?;
        Some(self.bookings.remove(index))
    }
}

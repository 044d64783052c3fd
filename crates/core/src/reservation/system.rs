use std::collections::{btree_map::Entry, BTreeMap};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::models::{Booking, BookingId, Passenger, TrainSummary};

use super::{
    day::Day,
    error::{ReservationError, Result},
    train::Train,
};

/// Root owner of every day, train and booking.
///
/// Lookups resolve the day by name, then the train by number, and hand the
/// actual work to [`Train`]. Nothing is shared or global; callers construct
/// a system and pass it where it is needed.
#[derive(Debug, Clone)]
pub struct ReservationSystem {
    days: BTreeMap<String, Day>,
    next_booking: u64,
}

impl Default for ReservationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationSystem {
    /// Create a system with no days.
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
            next_booking: 1,
        }
    }

    /// Add a day. A day with the same name is kept and the new one rejected.
    pub fn add_day(&mut self, name: impl Into<String>) -> Result<&mut Day> {
        let name = name.into();
        match self.days.entry(name) {
            Entry::Occupied(entry) => Err(ReservationError::DuplicateDay {
                day: entry.key().clone(),
            }),
            Entry::Vacant(slot) => {
                debug!(day = %slot.key(), "Day added");
                let day = Day::new(slot.key().clone());
                Ok(slot.insert(day))
            }
        }
    }

    /// Add a train to an existing day.
    pub fn add_train(
        &mut self,
        day_name: &str,
        number: u32,
        name: impl Into<String>,
        capacity: u32,
    ) -> Result<&mut Train> {
        let train = self.day_mut(day_name)?.add_train(number, name, capacity)?;
        debug!(day = day_name, number, capacity, "Train added");
        Ok(train)
    }

    /// Look up a day by name.
    pub fn day(&self, name: &str) -> Result<&Day> {
        self.days
            .get(name)
            .ok_or_else(|| ReservationError::DayNotFound {
                day: name.to_string(),
            })
    }

    fn day_mut(&mut self, name: &str) -> Result<&mut Day> {
        self.days
            .get_mut(name)
            .ok_or_else(|| ReservationError::DayNotFound {
                day: name.to_string(),
            })
    }

    fn train_mut(&mut self, day_name: &str, number: u32) -> Result<&mut Train> {
        self.day_mut(day_name)?.train_mut(number)
    }

    /// Days in ascending name order.
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.days.values()
    }

    /// Availability rows for every train running on `day_name`, ordered by
    /// train number.
    pub fn train_details(&self, day_name: &str) -> Result<Vec<TrainSummary>> {
        let day = self.day(day_name)?;
        Ok(day.trains().map(Train::summary).collect())
    }

    /// Bookings on one train in the order they were made.
    pub fn passenger_details(&self, day_name: &str, number: u32) -> Result<&[Booking]> {
        Ok(self.day(day_name)?.train(number)?.passengers())
    }

    /// Reserve a seat for `passenger`, returning the new booking.
    pub fn book_ticket(
        &mut self,
        day_name: &str,
        number: u32,
        passenger: &Passenger,
    ) -> Result<Booking> {
        let id = BookingId(self.next_booking);
        let train = self.train_mut(day_name, number)?;
        let booking = match train.reserve_seat(passenger, id, Utc::now()) {
            Some(booking) => booking.clone(),
            None => {
                warn!(day = day_name, number, passenger = %passenger.name, "Train full");
                return Err(ReservationError::NoSeatsAvailable {
                    day: day_name.to_string(),
                    number,
                    passenger: passenger.name.clone(),
                });
            }
        };
        self.next_booking += 1;
        info!(day = day_name, number, passenger = %passenger.name, booking = %booking.id, "Seat reserved");
        Ok(booking)
    }

    /// Cancel the earliest booking on the train made under `passenger_name`.
    pub fn cancel_ticket(
        &mut self,
        day_name: &str,
        number: u32,
        passenger_name: &str,
    ) -> Result<Booking> {
        let train = self.train_mut(day_name, number)?;
        match train.cancel_reservation(passenger_name) {
            Some(booking) => {
                info!(day = day_name, number, passenger = passenger_name, booking = %booking.id, "Reservation cancelled");
                Ok(booking)
            }
            None => {
                warn!(day = day_name, number, passenger = passenger_name, "No booking to cancel");
                Err(ReservationError::PassengerNotFound {
                    day: day_name.to_string(),
                    number,
                    passenger: passenger_name.to_string(),
                })
            }
        }
    }

    /// Cancel the booking carrying `id`.
    pub fn cancel_booking(&mut self, day_name: &str, number: u32, id: BookingId) -> Result<Booking> {
        let train = self.train_mut(day_name, number)?;
        match train.cancel_booking(id) {
            Some(booking) => {
                info!(day = day_name, number, booking = %id, "Booking cancelled");
                Ok(booking)
            }
            None => {
                warn!(day = day_name, number, booking = %id, "No booking with this reference");
                Err(ReservationError::BookingNotFound {
                    day: day_name.to_string(),
                    number,
                    id,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Result<ReservationSystem> {
        let mut system = ReservationSystem::new();
        system.add_day("Monday")?;
        system.add_day("Tuesday")?;
        system.add_train("Monday", 1, "Express", 100)?;
        system.add_train("Monday", 2, "Local", 50)?;
        system.add_train("Tuesday", 3, "Super", 120)?;
        Ok(system)
    }

    #[test]
    fn local_train_fills_at_fifty() -> Result<()> {
        let mut system = seeded()?;
        for i in 0..50 {
            system.book_ticket("Monday", 2, &Passenger::new(format!("P{i}"), 20, "M"))?;
        }

        let err = system
            .book_ticket("Monday", 2, &Passenger::new("Late", 40, "F"))
            .unwrap_err();
        assert!(matches!(err, ReservationError::NoSeatsAvailable { number: 2, .. }));
        assert_eq!(system.passenger_details("Monday", 2)?.len(), 50);

        let rows = system.train_details("Monday")?;
        assert_eq!(rows[1].available, 0);
        Ok(())
    }

    #[test]
    fn booked_passenger_is_listed() -> Result<()> {
        let mut system = seeded()?;
        system.book_ticket("Monday", 1, &Passenger::new("Alice", 30, "F"))?;

        let passengers = system.passenger_details("Monday", 1)?;
        assert_eq!(passengers.len(), 1);
        assert_eq!(passengers[0].passenger, Passenger::new("Alice", 30, "F"));
        Ok(())
    }

    #[test]
    fn unknown_day_and_train_are_reported() -> Result<()> {
        let mut system = seeded()?;
        let err = system
            .book_ticket("Friday", 1, &Passenger::new("Alice", 30, "F"))
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::DayNotFound {
                day: "Friday".to_string()
            }
        );

        let err = system.cancel_ticket("Tuesday", 1, "Alice").unwrap_err();
        assert!(matches!(err, ReservationError::TrainNotFound { number: 1, .. }));
        assert!(system.train_details("Sunday").is_err());
        assert!(system.passenger_details("Monday", 9).is_err());
        Ok(())
    }

    #[test]
    fn cancel_removes_first_matching_name() -> Result<()> {
        let mut system = seeded()?;
        let first = system.book_ticket("Tuesday", 3, &Passenger::new("Bob", 25, "M"))?;
        let second = system.book_ticket("Tuesday", 3, &Passenger::new("Bob", 52, "M"))?;

        let removed = system.cancel_ticket("Tuesday", 3, "Bob")?;
        assert_eq!(removed.id, first.id);

        let remaining = system.passenger_details("Tuesday", 3)?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
        assert_eq!(remaining[0].passenger.age, 52);
        Ok(())
    }

    #[test]
    fn cancel_unknown_passenger_fails_cleanly() -> Result<()> {
        let mut system = seeded()?;
        system.book_ticket("Monday", 1, &Passenger::new("Alice", 30, "F"))?;
        let err = system.cancel_ticket("Monday", 1, "Mallory").unwrap_err();
        assert!(matches!(err, ReservationError::PassengerNotFound { .. }));
        assert_eq!(system.passenger_details("Monday", 1)?.len(), 1);
        Ok(())
    }

    #[test]
    fn booking_ids_increase_and_skip_failures() -> Result<()> {
        let mut system = ReservationSystem::new();
        system.add_day("Monday")?;
        system.add_train("Monday", 1, "Tiny", 1)?;

        let first = system.book_ticket("Monday", 1, &Passenger::new("A", 1, "F"))?;
        assert!(system
            .book_ticket("Monday", 1, &Passenger::new("B", 1, "F"))
            .is_err());
        system.cancel_booking("Monday", 1, first.id)?;
        let next = system.book_ticket("Monday", 1, &Passenger::new("C", 1, "F"))?;

        assert_eq!(first.id, BookingId(1));
        assert_eq!(next.id, BookingId(2));
        assert!(matches!(
            system.cancel_booking("Monday", 1, first.id),
            Err(ReservationError::BookingNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn unknown_booking_reference_leaves_train_untouched() -> Result<()> {
        let mut system = seeded()?;
        let kept = system.book_ticket("Monday", 2, &Passenger::new("Dana", 33, "F"))?;

        let err = system
            .cancel_booking("Monday", 2, BookingId(99))
            .unwrap_err();
        assert_eq!(
            err,
            ReservationError::BookingNotFound {
                day: "Monday".to_string(),
                number: 2,
                id: BookingId(99),
            }
        );
        let remaining = system.passenger_details("Monday", 2)?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, kept.id);
        Ok(())
    }

    #[test]
    fn duplicate_day_is_rejected() -> Result<()> {
        let mut system = seeded()?;
        let err = system.add_day("Monday").unwrap_err();
        assert_eq!(
            err,
            ReservationError::DuplicateDay {
                day: "Monday".to_string()
            }
        );
        assert_eq!(system.train_details("Monday")?.len(), 2);
        Ok(())
    }

    #[test]
    fn train_details_report_remaining_seats() -> Result<()> {
        let mut system = seeded()?;
        system.book_ticket("Monday", 1, &Passenger::new("Alice", 30, "F"))?;

        let rows = system.train_details("Monday")?;
        assert_eq!(
            rows,
            vec![
                TrainSummary {
                    number: 1,
                    name: "Express".to_string(),
                    capacity: 100,
                    available: 99,
                },
                TrainSummary {
                    number: 2,
                    name: "Local".to_string(),
                    capacity: 50,
                    available: 50,
                },
            ]
        );
        let days: Vec<&str> = system.days().map(Day::name).collect();
        assert_eq!(days, vec!["Monday", "Tuesday"]);
        Ok(())
    }
}

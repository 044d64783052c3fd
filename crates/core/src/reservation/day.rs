use std::collections::{btree_map::Entry, BTreeMap};

use super::{error::ReservationError, error::Result, train::Train};

/// Named scheduling bucket holding the trains that run that day.
#[derive(Debug, Clone)]
pub struct Day {
    name: String,
    trains: BTreeMap<u32, Train>,
}

impl Day {
    /// Create a day with no trains.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trains: BTreeMap::new(),
        }
    }

    /// Day name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a train. An existing train with the same number is kept and the
    /// new one is rejected.
    pub fn add_train(
        &mut self,
        number: u32,
        name: impl Into<String>,
        capacity: u32,
    ) -> Result<&mut Train> {
        match self.trains.entry(number) {
            Entry::Occupied(_) => Err(ReservationError::DuplicateTrain {
                day: self.name.clone(),
                number,
            }),
            Entry::Vacant(slot) => Ok(slot.insert(Train::new(number, name, capacity))),
        }
    }

    /// Look up a train by number.
    pub fn train(&self, number: u32) -> Result<&Train> {
        self.trains
            .get(&number)
            .ok_or_else(|| train_not_found(&self.name, number))
    }

    /// Mutable lookup of a train by number.
    pub fn train_mut(&mut self, number: u32) -> Result<&mut Train> {
        let day = &self.name;
        self.trains
            .get_mut(&number)
            .ok_or_else(|| train_not_found(day, number))
    }

    /// Trains in ascending number order.
    pub fn trains(&self) -> impl Iterator<Item = &Train> {
        self.trains.values()
    }
}

fn train_not_found(day: &str, number: u32) -> ReservationError {
    ReservationError::TrainNotFound {
        day: day.to_string(),
        number,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trains_iterate_by_number() -> Result<()> {
        let mut day = Day::new("Monday");
        day.add_train(5, "Late", 10)?;
        day.add_train(1, "Express", 100)?;
        day.add_train(2, "Local", 50)?;

        let numbers: Vec<u32> = day.trains().map(Train::number).collect();
        assert_eq!(numbers, vec![1, 2, 5]);
        Ok(())
    }

    #[test]
    fn duplicate_number_keeps_existing_train() -> Result<()> {
        let mut day = Day::new("Monday");
        day.add_train(1, "Express", 100)?;

        let err = day.add_train(1, "Impostor", 3).unwrap_err();
        assert_eq!(
            err,
            ReservationError::DuplicateTrain {
                day: "Monday".to_string(),
                number: 1,
            }
        );
        let train = day.train(1)?;
        assert_eq!(train.name(), "Express");
        assert_eq!(train.capacity(), 100);
        Ok(())
    }

    #[test]
    fn train_under_each_key_reports_that_number() -> Result<()> {
        let mut day = Day::new("Monday");
        day.add_train(2, "Local", 50)?;
        day.add_train(1, "Express", 100)?;
        let _ = day.add_train(2, "Impostor", 1);

        for number in [1, 2] {
            assert_eq!(day.train(number)?.number(), number);
            assert_eq!(day.train_mut(number)?.number(), number);
        }
        Ok(())
    }

    #[test]
    fn missing_train_is_reported() {
        let mut day = Day::new("Tuesday");
        assert!(matches!(
            day.train_mut(4),
            Err(ReservationError::TrainNotFound { number: 4, .. })
        ));
    }
}

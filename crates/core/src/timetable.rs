//! Timetable describing which trains run on which day.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::reservation::ReservationSystem;

/// A train entry in the timetable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainEntry {
    /// Train number, unique within its day.
    pub number: u32,
    /// Service name.
    pub name: String,
    /// Total seats.
    pub capacity: u32,
}

/// A day entry in the timetable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Day name, e.g. `Monday`.
    pub name: String,
    /// Trains running that day.
    #[serde(default)]
    pub trains: Vec<TrainEntry>,
}

/// Days and trains used to seed a [`ReservationSystem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Timetable {
    /// Days in file order.
    #[serde(default)]
    pub days: Vec<DayEntry>,
}

impl Timetable {
    /// Built-in demo timetable.
    pub fn sample() -> Self {
        let train = |number, name: &str, capacity| TrainEntry {
            number,
            name: name.to_string(),
            capacity,
        };
        Self {
            days: vec![
                DayEntry {
                    name: "Monday".to_string(),
                    trains: vec![train(1, "Express", 100), train(2, "Local", 50)],
                },
                DayEntry {
                    name: "Tuesday".to_string(),
                    trains: vec![train(3, "Super", 120)],
                },
                DayEntry {
                    name: "Wednesday".to_string(),
                    trains: Vec::new(),
                },
            ],
        }
    }

    /// Load a timetable from the given path, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read timetable {}", path.display()))?;
        let timetable = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse timetable {}", path.display()))?;
        Ok(Some(timetable))
    }

    /// Persist the timetable to the given file, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create timetable directory {}", parent.display())
            })?;
        }

        let serialized =
            serde_json::to_string_pretty(self).context("failed to serialize timetable")?;
        fs::write(path, serialized)
            .with_context(|| format!("failed to write timetable {}", path.display()))
    }

    /// Build a reservation system holding every day and train listed.
    pub fn build(&self) -> Result<ReservationSystem> {
        let mut system = ReservationSystem::new();
        for day in &self.days {
            let entry = system
                .add_day(day.name.clone())
                .context("invalid timetable")?;
            for train in &day.trains {
                entry
                    .add_train(train.number, train.name.clone(), train.capacity)
                    .context("invalid timetable")?;
            }
        }
        info!(days = self.days.len(), "Timetable loaded");
        Ok(system)
    }
}

#![warn(clippy::all, missing_docs)]

//! Core domain logic for the railway reservation system.
//!
//! This crate hosts the passenger and booking models, the day/train
//! reservation bookkeeping, timetable loading, and configuration
//! handling used by the command-line menu and any future frontends.

pub mod config;
pub mod models;
pub mod reservation;
pub mod timetable;

pub use config::AppConfig;
pub use models::{Booking, BookingId, Passenger, TrainSummary};
pub use reservation::{Day, ReservationError, ReservationSystem, Train};
pub use timetable::Timetable;

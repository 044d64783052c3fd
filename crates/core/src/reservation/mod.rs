//! Day, train and booking bookkeeping.

mod day;
pub mod error;
mod system;
mod train;

pub use day::Day;
pub use error::{ReservationError, Result};
pub use system::ReservationSystem;
pub use train::Train;

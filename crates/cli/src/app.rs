use std::{
    collections::VecDeque,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use railres_core::{Passenger, ReservationSystem};
use tracing::{debug, info};

const RULE: &str = "-----------------------------------------------------------";

/// Whether the menu keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Outcome of reading one prompt.
enum Input<T> {
    Value(T),
    Invalid,
    Closed,
}

impl<T> Input<T> {
    fn halt(self) -> Step {
        match self {
            Input::Closed => Step::Exit,
            _ => Step::Continue,
        }
    }
}

/// Whitespace-delimited tokens pulled from a line reader on demand.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = Vec::new();
            let read = self
                .reader
                .read_until(b'\n', &mut line)
                .context("failed to read from input")?;
            if read == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&line);
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

/// Interactive text menu over a reservation system.
pub struct Menu<R, W> {
    system: ReservationSystem,
    input: Tokens<R>,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(system: ReservationSystem, input: R, out: W) -> Self {
        Self {
            system,
            input: Tokens::new(input),
            out,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.prompt("Enter your choice: ")? {
                Input::Value(choice) => choice,
                _ => break,
            };
            debug!(choice = %choice, "Menu choice");

            let step = match choice.as_str() {
                "1" => self.show_trains()?,
                "2" => self.show_passengers()?,
                "3" => self.book()?,
                "4" => self.cancel()?,
                "5" => {
                    writeln!(self.out, "Exiting the program.")?;
                    Step::Exit
                }
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Step::Continue
                }
            };
            if step == Step::Exit {
                break;
            }
        }
        self.out.flush()?;
        info!("Menu closed");
        Ok(())
    }

    #[cfg(test)]
    fn into_system(self) -> ReservationSystem {
        self.system
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out, "Railway Reservation System Menu:")?;
        writeln!(self.out, "1. Display available trains for a day")?;
        writeln!(self.out, "2. Display passenger details for a train on a day")?;
        writeln!(self.out, "3. Book a ticket")?;
        writeln!(self.out, "4. Cancel a ticket")?;
        writeln!(self.out, "5. Quit")?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Input<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        Ok(match self.input.next_token()? {
            Some(token) => Input::Value(token),
            None => {
                writeln!(self.out)?;
                Input::Closed
            }
        })
    }

    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<Input<T>> {
        Ok(match self.prompt(label)? {
            Input::Value(token) => match token.parse() {
                Ok(value) => Input::Value(value),
                Err(_) => {
                    writeln!(self.out, "Invalid number: {token}")?;
                    Input::Invalid
                }
            },
            _ => Input::Closed,
        })
    }

    fn show_trains(&mut self) -> Result<Step> {
        let day = match self.prompt("Enter day name: ")? {
            Input::Value(day) => day,
            other => return Ok(other.halt()),
        };

        let rows = match self.system.train_details(&day) {
            Ok(rows) => rows,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Step::Continue);
            }
        };

        writeln!(self.out, "Available Trains for {day}:")?;
        writeln!(self.out, "{RULE}")?;
        writeln!(
            self.out,
            "Train Number\tTrain Name\tTotal Seats\tAvailable Seats"
        )?;
        writeln!(self.out, "{RULE}")?;
        for row in rows {
            writeln!(
                self.out,
                "{}\t\t{}\t\t{}\t\t{}",
                row.number, row.name, row.capacity, row.available
            )?;
        }
        writeln!(self.out, "{RULE}")?;
        Ok(Step::Continue)
    }

    fn show_passengers(&mut self) -> Result<Step> {
        let day = match self.prompt("Enter day name: ")? {
            Input::Value(day) => day,
            other => return Ok(other.halt()),
        };
        let number: u32 = match self.prompt_number("Enter train number: ")? {
            Input::Value(number) => number,
            other => return Ok(other.halt()),
        };

        let train = match self.system.day(&day).and_then(|d| d.train(number)) {
            Ok(train) => train,
            Err(err) => {
                writeln!(self.out, "{err}")?;
                return Ok(Step::Continue);
            }
        };

        writeln!(
            self.out,
            "Passenger Details for Train {} ({}) on {day}:",
            train.number(),
            train.name()
        )?;
        for booking in train.passengers() {
            let passenger = &booking.passenger;
            writeln!(
                self.out,
                "Passenger Name: {} (Age: {}, Gender: {})",
                passenger.name, passenger.age, passenger.gender
            )?;
        }
        Ok(Step::Continue)
    }

    fn book(&mut self) -> Result<Step> {
        let day = match self.prompt("Enter day name: ")? {
            Input::Value(day) => day,
            other => return Ok(other.halt()),
        };
        let number: u32 = match self.prompt_number("Enter train number: ")? {
            Input::Value(number) => number,
            other => return Ok(other.halt()),
        };
        let name = match self.prompt("Enter passenger name: ")? {
            Input::Value(name) => name,
            other => return Ok(other.halt()),
        };
        let age: i32 = match self.prompt_number("Enter passenger age: ")? {
            Input::Value(age) => age,
            other => return Ok(other.halt()),
        };
        let gender = match self.prompt("Enter passenger gender: ")? {
            Input::Value(gender) => gender,
            other => return Ok(other.halt()),
        };

        let passenger = Passenger::new(name, age, gender);
        match self.system.book_ticket(&day, number, &passenger) {
            Ok(booking) => writeln!(
                self.out,
                "Successfully reserved a seat in train {number} for {} on {day} (booking {})",
                passenger.name, booking.id
            )?,
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Step::Continue)
    }

    fn cancel(&mut self) -> Result<Step> {
        let day = match self.prompt("Enter day name: ")? {
            Input::Value(day) => day,
            other => return Ok(other.halt()),
        };
        let number: u32 = match self.prompt_number("Enter train number: ")? {
            Input::Value(number) => number,
            other => return Ok(other.halt()),
        };
        let name = match self.prompt("Enter passenger name: ")? {
            Input::Value(name) => name,
            other => return Ok(other.halt()),
        };

        match self.system.cancel_ticket(&day, number, &name) {
            Ok(_) => writeln!(
                self.out,
                "Successfully canceled reservation for passenger {name} in train {number} on {day}"
            )?,
            Err(err) => writeln!(self.out, "{err}")?,
        }
        Ok(Step::Continue)
    }
}

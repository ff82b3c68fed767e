use anyhow::Context;
use apache_catalog::SeatStatus;
use apache_order::{BookingOutcome, BookingRegistry, Traveler};
use std::io::{BufRead, Write};

const MENU_OPTIONS: [&str; 7] = [
    "Check availability of seat",
    "Book a seat",
    "Cancel a booking",
    "Show your bookings",
    "Show seat map",
    "Recommend a free seat",
    "Exit program",
];

/// Interactive session over one registry. Reads commands from `input` and
/// writes replies to `output` until the user exits or input ends.
pub struct Session<R, W> {
    airline_name: String,
    registry: BookingRegistry,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(airline_name: impl Into<String>, registry: BookingRegistry, input: R, output: W) -> Self {
        Self {
            airline_name: airline_name.into(),
            registry,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt(&format!("Enter your choice (1-{}): ", MENU_OPTIONS.len()))? else {
                break;
            };

            match choice.as_str() {
                "1" => self.check_availability()?,
                "2" => self.book_seat()?,
                "3" => self.cancel_booking()?,
                "4" => self.show_bookings()?,
                "5" => self.show_seat_map()?,
                "6" => self.recommend_seat()?,
                "7" => {
                    writeln!(self.output, "Exiting program. Goodbye!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        tracing::info!(bookings = self.registry.booking_count(), "Session ended");
        Ok(())
    }

    fn display_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\n--- {} Booking Menu ---", self.airline_name)?;
        for (number, label) in (1..).zip(MENU_OPTIONS) {
            writeln!(self.output, "{number}. {label}")?;
        }
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn check_availability(&mut self) -> anyhow::Result<()> {
        let Some(seat) = self.prompt("Enter seat (e.g., 12B): ")? else {
            return Ok(());
        };

        if let Err(err) = self.registry.seat_map().parse_seat(&seat) {
            writeln!(self.output, "Invalid seat: {err}")?;
        } else if self.registry.is_available(&seat) {
            writeln!(self.output, "Seat {} is available.", seat.to_uppercase())?;
        } else {
            writeln!(self.output, "Seat {} is not available.", seat.to_uppercase())?;
        }
        Ok(())
    }

    fn book_seat(&mut self) -> anyhow::Result<()> {
        let Some(seat) = self.prompt("Enter seat to book: ")? else {
            return Ok(());
        };

        if let Err(err) = self.registry.seat_map().parse_seat(&seat) {
            writeln!(self.output, "Invalid seat: {err}")?;
            return Ok(());
        }
        if !self.registry.is_available(&seat) {
            return self.explain_unavailable(&seat);
        }

        let Some(traveler) = self.prompt_traveler()? else {
            return Ok(());
        };

        match self.registry.book_with_traveler(&seat, traveler) {
            BookingOutcome::Booked(reference) => writeln!(
                self.output,
                "Seat {} booked successfully. Booking reference: {reference}",
                seat.to_uppercase()
            )?,
            BookingOutcome::Unavailable => self.explain_unavailable(&seat)?,
            other => writeln!(self.output, "Seat {} could not be booked: {other:?}", seat.to_uppercase())?,
        }
        Ok(())
    }

    fn prompt_traveler(&mut self) -> anyhow::Result<Option<Traveler>> {
        let mut fields = Vec::with_capacity(3);
        for label in ["Passport number", "First name", "Last name"] {
            let Some(value) = self.prompt(&format!("{label}: "))? else {
                return Ok(None);
            };
            if value.is_empty() {
                writeln!(self.output, "{label} cannot be empty. Booking not made.")?;
                return Ok(None);
            }
            fields.push(value);
        }

        let last_name = fields.pop().unwrap_or_default();
        let first_name = fields.pop().unwrap_or_default();
        let passport = fields.pop().unwrap_or_default();
        Ok(Some(Traveler::new(passport, first_name, last_name)))
    }

    /// The registry reports reserved and storage seats alike; tell them apart here.
    fn explain_unavailable(&mut self, seat: &str) -> anyhow::Result<()> {
        let status = self
            .registry
            .seat_map()
            .parse_seat(seat)
            .ok()
            .and_then(|id| self.registry.seat_map().status(&id).cloned());
        let seat = seat.to_uppercase();

        match status {
            Some(SeatStatus::Storage) => {
                writeln!(self.output, "Seat {seat} cannot be booked (unavailable area).")?
            }
            Some(SeatStatus::Reserved(_)) => writeln!(self.output, "Seat {seat} is already booked.")?,
            _ => writeln!(self.output, "Seat {seat} is not available.")?,
        }
        Ok(())
    }

    fn cancel_booking(&mut self) -> anyhow::Result<()> {
        let Some(seat) = self.prompt("Enter seat to cancel: ")? else {
            return Ok(());
        };
        let label = seat.to_uppercase();

        match self.registry.cancel_with_traveler(&seat) {
            BookingOutcome::Canceled { reference, traveler } => {
                write!(self.output, "Seat {label} is now free. Booking {reference} canceled")?;
                match traveler {
                    Some(record) => writeln!(self.output, " for {} {}.", record.first_name, record.last_name)?,
                    None => writeln!(self.output, ".")?,
                }
            }
            BookingOutcome::AlreadyFree => writeln!(self.output, "Seat {label} is already free.")?,
            BookingOutcome::NotBookable => writeln!(self.output, "Seat {label} is not a bookable seat.")?,
            BookingOutcome::InvalidSeat(err) => writeln!(self.output, "Invalid seat: {err}")?,
            other => writeln!(self.output, "Seat {label} could not be canceled: {other:?}")?,
        }
        Ok(())
    }

    fn show_bookings(&mut self) -> anyhow::Result<()> {
        let bookings = self.registry.bookings();
        if bookings.is_empty() {
            writeln!(self.output, "You have not booked any seats.")?;
            return Ok(());
        }

        writeln!(self.output, "\nYour booked seats:")?;
        for record in bookings {
            writeln!(
                self.output,
                " - {}  {}  {} {}",
                record.seat(),
                record.reference,
                record.first_name,
                record.last_name
            )?;
        }
        Ok(())
    }

    fn show_seat_map(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "\nBooking Status:")?;
        for line in self.registry.render_layout() {
            writeln!(self.output, "{line}")?;
        }

        let occupancy = self.registry.seat_map().occupancy();
        writeln!(
            self.output,
            "{} of {} bookable seats reserved ({:.1}%).",
            occupancy.reserved,
            occupancy.bookable,
            occupancy.utilization() * 100.0
        )?;
        Ok(())
    }

    fn recommend_seat(&mut self) -> anyhow::Result<()> {
        match self.registry.recommend_first_free() {
            Some(seat) => writeln!(self.output, "Recommended seat: {seat}")?,
            None => writeln!(self.output, "No free seats left.")?,
        }
        Ok(())
    }
}

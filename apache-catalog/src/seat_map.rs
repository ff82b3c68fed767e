use apache_shared::BookingReference;
use serde::Serialize;
use tracing::debug;

use crate::layout::CabinLayout;
use crate::seat::{split_token, SeatId, SeatIdError};

/// State of a single cell in the cabin grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reference", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Free,
    /// Fixed at construction; never bookable.
    Storage,
    Reserved(BookingReference),
}

impl SeatStatus {
    pub fn is_free(&self) -> bool {
        matches!(self, SeatStatus::Free)
    }

    /// Single-letter code used on the status board.
    pub fn code(&self) -> char {
        match self {
            SeatStatus::Free => 'F',
            SeatStatus::Storage => 'S',
            SeatStatus::Reserved(_) => 'R',
        }
    }
}

/// Result of a grid mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatOutcome {
    Booked(BookingReference),
    Canceled(BookingReference),
    InvalidSeat(SeatIdError),
    /// Already reserved, or storage.
    Unavailable,
    AlreadyFree,
    NotBookable,
}

/// Reserved seats against bookable capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub reserved: usize,
    pub bookable: usize,
}

impl Occupancy {
    pub fn utilization(&self) -> f64 {
        if self.bookable == 0 {
            0.0
        } else {
            self.reserved as f64 / self.bookable as f64
        }
    }
}

/// The seat grid for one aircraft. Every (row, column) pair always has a status.
#[derive(Debug, Clone)]
pub struct SeatMap {
    columns: Vec<char>,
    // cells[row - 1][column index]
    cells: Vec<Vec<SeatStatus>>,
}

impl SeatMap {
    /// Build a fully populated grid. Cells matching `is_storage` become
    /// [`SeatStatus::Storage`] for the lifetime of the map.
    pub fn new<C, P>(rows: u32, columns: C, is_storage: P) -> Self
    where
        C: IntoIterator<Item = char>,
        P: Fn(u32, char) -> bool,
    {
        let columns: Vec<char> = columns
            .into_iter()
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let cells = (1..=rows)
            .map(|row| {
                columns
                    .iter()
                    .map(|&column| {
                        if is_storage(row, column) {
                            SeatStatus::Storage
                        } else {
                            SeatStatus::Free
                        }
                    })
                    .collect()
            })
            .collect();

        Self { columns, cells }
    }

    pub fn from_layout(layout: &CabinLayout) -> Self {
        Self::new(layout.rows, layout.column_codes(), |row, column| {
            layout.is_storage(row, column)
        })
    }

    pub fn rows(&self) -> u32 {
        self.cells.len() as u32
    }

    pub fn columns(&self) -> &[char] {
        &self.columns
    }

    /// Parse a seat token and check it against this grid's rows and columns.
    pub fn parse_seat(&self, token: &str) -> Result<SeatId, SeatIdError> {
        let (row_digits, column) = split_token(token)?;

        let out_of_range = || SeatIdError::RowOutOfRange {
            row: row_digits.to_string(),
            rows: self.rows(),
        };
        // All digits, so parsing only fails on overflow.
        let row: u32 = row_digits.parse().map_err(|_| out_of_range())?;
        if row == 0 || row > self.rows() {
            return Err(out_of_range());
        }

        if !self.columns.contains(&column) {
            return Err(SeatIdError::UnknownColumn {
                column,
                columns: self.columns.iter().collect(),
            });
        }

        Ok(SeatId { row, column })
    }

    pub fn status(&self, seat: &SeatId) -> Option<&SeatStatus> {
        let index = self.column_index(seat.column)?;
        self.cells
            .get((seat.row as usize).checked_sub(1)?)
            .and_then(|row| row.get(index))
    }

    pub fn is_available(&self, token: &str) -> bool {
        self.parse_seat(token)
            .ok()
            .and_then(|seat| self.status(&seat))
            .is_some_and(SeatStatus::is_free)
    }

    /// Reserve a free seat under `reference`.
    pub fn book(&mut self, token: &str, reference: BookingReference) -> SeatOutcome {
        let seat = match self.parse_seat(token) {
            Ok(seat) => seat,
            Err(err) => return SeatOutcome::InvalidSeat(err),
        };
        let Some(cell) = self.cell_mut(&seat) else {
            return SeatOutcome::Unavailable;
        };

        if !cell.is_free() {
            return SeatOutcome::Unavailable;
        }

        debug!(seat = %seat, reference = %reference, "Seat reserved");
        *cell = SeatStatus::Reserved(reference.clone());
        SeatOutcome::Booked(reference)
    }

    /// Release a reserved seat, returning the reference that held it.
    pub fn cancel(&mut self, token: &str) -> SeatOutcome {
        let seat = match self.parse_seat(token) {
            Ok(seat) => seat,
            Err(err) => return SeatOutcome::InvalidSeat(err),
        };
        let Some(cell) = self.cell_mut(&seat) else {
            return SeatOutcome::NotBookable;
        };

        let reference = match &*cell {
            SeatStatus::Reserved(reference) => reference.clone(),
            SeatStatus::Free => return SeatOutcome::AlreadyFree,
            SeatStatus::Storage => return SeatOutcome::NotBookable,
        };

        debug!(seat = %seat, reference = %reference, "Seat released");
        *cell = SeatStatus::Free;
        SeatOutcome::Canceled(reference)
    }

    /// First free seat scanning rows front to back, columns in seating order.
    pub fn recommend_first_free(&self) -> Option<SeatId> {
        self.seats()
            .find(|(_, status)| status.is_free())
            .map(|(seat, _)| seat)
    }

    /// All cells in row-major order.
    pub fn seats(&self) -> impl Iterator<Item = (SeatId, &SeatStatus)> + '_ {
        self.cells.iter().zip(1u32..).flat_map(move |(row, number)| {
            self.columns
                .iter()
                .zip(row)
                .map(move |(&column, status)| (SeatId { row: number, column }, status))
        })
    }

    /// One line per row, e.g. `Row 07: 7A:F 7B:R 7C:F`.
    pub fn render_layout(&self) -> Vec<String> {
        self.cells
            .iter()
            .zip(1u32..)
            .map(|(row, number)| {
                let cells: Vec<String> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, status)| format!("{number}{column}:{}", status.code()))
                    .collect();
                format!("Row {number:02}: {}", cells.join(" "))
            })
            .collect()
    }

    pub fn occupancy(&self) -> Occupancy {
        self.seats().fold(
            Occupancy { reserved: 0, bookable: 0 },
            |mut acc, (_, status)| {
                match status {
                    SeatStatus::Reserved(_) => {
                        acc.reserved += 1;
                        acc.bookable += 1;
                    }
                    SeatStatus::Free => acc.bookable += 1,
                    SeatStatus::Storage => {}
                }
                acc
            },
        )
    }

    fn column_index(&self, column: char) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    fn cell_mut(&mut self, seat: &SeatId) -> Option<&mut SeatStatus> {
        let index = self.column_index(seat.column)?;
        self.cells
            .get_mut((seat.row as usize).checked_sub(1)?)
            .and_then(|row| row.get_mut(index))
    }
}

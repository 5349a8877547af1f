//! Operating-window validation of reservations.
//!
//! A reservation is valid iff its buffered interval intersects the operating
//! window under the half-open overlap test
//! `interval.end > window.start && interval.start < window.end`.
//! Every input reservation lands in exactly one of `valid` or `excluded`,
//! preserving input order within each.

use serde::{Deserialize, Serialize};

use crate::core::domain::{OperatingWindow, Reservation, DEFAULT_BUFFER_MINUTES};

/// Disjoint split of a reservation list.
///
/// # Examples
///
/// ```
/// use occupancy_rust::core::domain::{OperatingWindow, Reservation};
/// use occupancy_rust::preprocessing::validator::ReservationValidator;
///
/// let window = OperatingWindow::from_hours(8, 18).unwrap();
/// let validator = ReservationValidator::new(window, 30);
///
/// let outcome = validator.filter(&[
///     Reservation::new("early", None, 6 * 60 + 30),
///     Reservation::new("noon", None, 12 * 60),
/// ]);
/// assert_eq!(outcome.valid.len(), 1);
/// assert_eq!(outcome.excluded[0].id().as_str(), "early");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub valid: Vec<Reservation>,
    pub excluded: Vec<Reservation>,
}

impl ValidationOutcome {
    pub fn total(&self) -> usize {
        self.valid.len() + self.excluded.len()
    }

    pub fn stats(&self) -> ValidationStats {
        ValidationStats {
            total: self.total(),
            valid: self.valid.len(),
            excluded: self.excluded.len(),
        }
    }
}

/// Summary counts of a validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total: usize,
    pub valid: usize,
    pub excluded: usize,
}

/// Validator for reservations against an operating window.
///
/// The window type cannot hold `start >= end`, so a misconfigured window is
/// rejected when it is built, before any filtering can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationValidator {
    window: OperatingWindow,
    buffer: u32,
}

impl ReservationValidator {
    pub fn new(window: OperatingWindow, buffer: u32) -> Self {
        Self { window, buffer }
    }

    pub fn with_default_buffer(window: OperatingWindow) -> Self {
        Self::new(window, DEFAULT_BUFFER_MINUTES)
    }

    pub fn window(&self) -> &OperatingWindow {
        &self.window
    }

    pub fn is_valid(&self, reservation: &Reservation) -> bool {
        reservation
            .buffered_interval(self.buffer)
            .intersects(&self.window)
    }

    /// Splits `reservations` into valid and excluded, keeping input order.
    pub fn filter(&self, reservations: &[Reservation]) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for reservation in reservations {
            if self.is_valid(reservation) {
                outcome.valid.push(reservation.clone());
            } else {
                log::debug!(
                    "Reservation {} at {} excluded: buffered interval outside {}",
                    reservation.id(),
                    crate::time::format_minutes(reservation.instant()),
                    self.window
                );
                outcome.excluded.push(reservation.clone());
            }
        }

        outcome
    }
}

/// Convenience wrapper around [`ReservationValidator::filter`].
pub fn filter_reservations(
    reservations: &[Reservation],
    window: &OperatingWindow,
    buffer: u32,
) -> ValidationOutcome {
    ReservationValidator::new(*window, buffer).filter(reservations)
}

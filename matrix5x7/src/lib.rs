//! Driver for a 5x7 LED dot matrix wired directly to host GPIO lines.
//!
//! The matrix package has twelve leads, numbered on the silkscreen:
//!
//! ```text
//! 1 +---+ 12
//! 2 |   | 11
//! 3 |   | 10
//! 4 |   | 9
//! 5 |   | 8
//! 6 +---+ 7
//! ```
//!
//! Internally each LED sits at the intersection of one of five column lines
//! and one of seven row lines.  Current flows from a column line to a row
//! line, so an LED lights when its column is driven high and its row low,
//! and the same two lines with the opposite polarity extinguish it.  Which
//! lead carries which line is a constant of the part (see [`COLUMN_PINS`]
//! and [`ROW_PINS`]); which host GPIO line each lead is soldered to is up to
//! the user and supplied via [`LedMatrix::bind`].
//!
//! Because all LEDs share the twelve lines, arbitrary patterns cannot be
//! driven at a single physical instant.  To make several LEDs that do not
//! share a row or column appear lit together, the caller must multiplex: in
//! a tight loop, switch each LED on, dwell briefly (sub-millisecond to a few
//! milliseconds), switch it off, and move to the next, refreshing the whole
//! pattern at 60 Hz or faster so persistence of vision merges the flashes.
//! The driver deliberately contains no scheduling or timing of its own; it
//! issues exactly two pin writes per call and retains no LED state.
//!
//! The implementation is generalized over the host GPIO access, behind the
//! [`GpioDriver`] trait.  The `rppal` feature provides an implementation for
//! the Raspberry Pi; tests run against a recording fake.
//!
//! ```no_run
//! # #[cfg(feature = "rppal")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use matrix5x7::{LedMatrix, MatrixPin, NumberingScheme};
//!
//! let mut matrix = LedMatrix::on_raspberry_pi()?;
//! matrix.initialize(NumberingScheme::Bcm)?;
//! matrix.bind(MatrixPin::P1, 17)?;
//! matrix.bind(MatrixPin::P12, 22)?;
//!
//! // Light the top-left LED.
//! matrix.set_led(0, 0, true)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "rppal"))]
//! # fn main() {}
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

use core::fmt;

mod gpio;
mod map;
mod pins;

pub use gpio::*;
pub use map::*;
pub use pins::*;

/// Errors surfaced by [`LedMatrix`].
///
/// All of these are unrecoverable at the point of occurrence; they indicate
/// programming or wiring mistakes (or, for [`Error::Gpio`], a fault in the
/// host GPIO subsystem), not transient conditions worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A numbering scheme must be selected with [`LedMatrix::initialize`]
    /// before binding or addressing anything.
    NotInitialized,
    /// [`LedMatrix::initialize`] was called a second time.
    AlreadyInitialized,
    /// The matrix pin has no recorded GPIO binding.
    Unbound(MatrixPin),
    /// The coordinate lies outside the 5x7 matrix.
    OutOfRange { x: u8, y: u8 },
    /// Propagated opaque from the GPIO driver: invalid line number, missing
    /// permissions, line claimed elsewhere, and the like.
    Gpio(E),
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotInitialized => {
                write!(f, "no numbering scheme selected; call initialize first")
            }
            Error::AlreadyInitialized => write!(f, "numbering scheme already selected"),
            Error::Unbound(pin) => {
                write!(f, "matrix pin {} has no GPIO binding", pin.number())
            }
            Error::OutOfRange { x, y } => {
                write!(f, "coordinate ({x}, {y}) lies outside the 5x7 matrix")
            }
            Error::Gpio(inner) => write!(f, "gpio driver: {inner}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for Error<E> {}

/// Driver for one 5x7 LED dot matrix.
///
/// Owns the binding table from package pins to host GPIO lines and the GPIO
/// driver itself, so independent instances (each with their own driver) can
/// coexist.  Setup is three steps: construct with a [`GpioDriver`], select
/// the numbering scheme once with [`Self::initialize`], then record the
/// wiring with [`Self::bind`] for every matrix pin in use.  After that,
/// [`Self::set_led`] addresses individual LEDs.
///
/// The driver is stateless with respect to which LEDs are lit: the hardware
/// holds each LED's state until the same two lines are driven again.  It is
/// also strictly single-owner; calling `set_led` concurrently from several
/// threads without external synchronization is unsupported.
pub struct LedMatrix<Driver> {
    driver: Driver,
    map: PinMap,
    scheme: Option<NumberingScheme>,
}

impl<Driver: GpioDriver> LedMatrix<Driver> {
    /// Wrap a GPIO driver.  No lines are touched until [`Self::initialize`]
    /// and [`Self::bind`] are called.
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            map: PinMap::new(),
            scheme: None,
        }
    }

    /// Select the numbering convention used for all GPIO line identifiers
    /// passed to [`Self::bind`], and forward it to the driver.
    ///
    /// Must be called exactly once, before any binding; a second call fails
    /// with [`Error::AlreadyInitialized`].
    pub fn initialize(&mut self, scheme: NumberingScheme) -> Result<(), Error<Driver::Error>> {
        if self.scheme.is_some() {
            return Err(Error::AlreadyInitialized);
        }

        self.driver.set_mode(scheme).map_err(Error::Gpio)?;
        self.scheme = Some(scheme);
        Ok(())
    }

    /// Record that `matrix_pin` is soldered to `gpio_pin`, and configure
    /// that line as a digital output.
    ///
    /// Last write wins: rebinding an already-bound matrix pin overwrites the
    /// association and configures the new line.  The previously bound line
    /// is left in whatever state it was last driven to, not reset; a known
    /// limitation, since resetting it would mean guessing a safe level.
    pub fn bind(
        &mut self,
        matrix_pin: MatrixPin,
        gpio_pin: u8,
    ) -> Result<(), Error<Driver::Error>> {
        if self.scheme.is_none() {
            return Err(Error::NotInitialized);
        }

        self.driver.configure_output(gpio_pin).map_err(Error::Gpio)?;
        self.map.bind(matrix_pin, gpio_pin);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "matrix pin {=u8} bound to gpio {=u8}",
            matrix_pin.number(),
            gpio_pin
        );

        Ok(())
    }

    /// The GPIO line `matrix_pin` is bound to.
    pub fn resolve(&self, matrix_pin: MatrixPin) -> Result<u8, Error<Driver::Error>> {
        self.map.resolve(matrix_pin).ok_or(Error::Unbound(matrix_pin))
    }

    /// Switch the LED at `(x, y)` on or off, with `(0, 0)` at the top left.
    ///
    /// Issues exactly two pin writes: the line to be driven high first, then
    /// the line to be driven low.  `on` drives the LED's column line high
    /// and its row line low, letting current flow column to row; `!on`
    /// reverses the polarity on the same two lines.  Switching off an LED
    /// that was never lit is electrically a no-op but still issues both
    /// writes.
    ///
    /// Both involved pins must already be bound; a missing binding or an
    /// out-of-range coordinate fails before anything is written.
    pub fn set_led(&mut self, x: u8, y: u8, on: bool) -> Result<(), Error<Driver::Error>> {
        if self.scheme.is_none() {
            return Err(Error::NotInitialized);
        }

        let (column, row) = match (COLUMN_PINS.get(x as usize), ROW_PINS.get(y as usize)) {
            (Some(column), Some(row)) => (*column, *row),
            _ => return Err(Error::OutOfRange { x, y }),
        };

        // Resolve both lines before touching either, so a missing binding
        // leaves the header untouched.
        let column_gpio = self.resolve(column)?;
        let row_gpio = self.resolve(row)?;

        let (high, low) = if on {
            (column_gpio, row_gpio)
        } else {
            (row_gpio, column_gpio)
        };

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "led ({=u8}, {=u8}) on={=bool}: gpio {=u8} high, gpio {=u8} low",
            x,
            y,
            on,
            high,
            low
        );

        self.driver.write_pin(high, Level::High).map_err(Error::Gpio)?;
        self.driver.write_pin(low, Level::Low).map_err(Error::Gpio)
    }

    /// Borrow the underlying GPIO driver.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }
}

#[cfg(feature = "rppal")]
impl LedMatrix<RppalGpio> {
    /// Create a driver backed by the Raspberry Pi's GPIO header.
    ///
    /// Fails if the host GPIO subsystem cannot be opened, for example when
    /// running on a non-Pi machine or without access to the GPIO device.
    pub fn on_raspberry_pi() -> Result<Self, Error<rppal::gpio::Error>> {
        Ok(Self::new(RppalGpio::new().map_err(Error::Gpio)?))
    }
}

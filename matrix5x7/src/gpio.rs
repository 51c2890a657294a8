//! Module describing the [`GpioDriver`] trait and implementations depending
//! on target platform.

/// Numbering convention used for GPIO line identifiers, selected once at
/// startup via [`crate::LedMatrix::initialize`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumberingScheme {
    /// Controller-logical numbering: identifiers are the SoC's GPIO line
    /// numbers (BCM numbering on a Raspberry Pi).
    Bcm,
    /// Board-physical numbering: identifiers are positions on the I/O header
    /// itself, counted across the physical connector.
    Board,
}

/// Electrical level driven onto a GPIO line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// This trait represents some low-level implementation of host GPIO output,
/// likely in terms of a platform-specific HAL.
///
/// The matrix needs nothing more from the host than digital output on
/// numbered lines, so the contract is deliberately tiny: select a numbering
/// convention, mark a line as output, drive a line high or low.  Everything
/// above this trait is platform-independent, which also means the whole
/// driver can be exercised against a recording fake without any hardware.
///
/// Depending on the features enabled in this crate there is a built-in
/// implementation for the Raspberry Pi ([`RppalGpio`], behind the `rppal`
/// feature).
pub trait GpioDriver {
    type Error;

    /// Select the numbering convention for all pin identifiers passed to the
    /// other two operations.  Called once, before anything else.
    fn set_mode(&mut self, scheme: NumberingScheme) -> Result<(), Self::Error>;

    /// Configure the given line as a digital output.  Called once per bound
    /// matrix pin (and again when a pin is rebound to a new line).
    fn configure_output(&mut self, pin: u8) -> Result<(), Self::Error>;

    /// Drive the given line to `level`.  Called twice per LED state change.
    fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Self::Error>;
}

#[cfg(feature = "rppal")]
mod rppal_gpio {
    use rppal::gpio::{Error, Gpio, OutputPin};

    use super::{GpioDriver, Level, NumberingScheme};

    /// Number of BCM GPIO lines exposed on the 40-pin header.
    const GPIO_LINES: usize = 28;

    /// Implementation of [`GpioDriver`] for the Raspberry Pi's GPIO header,
    /// backed by the `rppal` HAL.
    ///
    /// Lines are claimed lazily: the first [`GpioDriver::configure_output`]
    /// for a line takes ownership of it from the kernel and switches it to
    /// output mode, and the claimed handle is cached for subsequent writes.
    /// Claimed lines are held until this value is dropped.
    pub struct RppalGpio {
        gpio: Gpio,
        scheme: NumberingScheme,
        outputs: [Option<OutputPin>; GPIO_LINES],
    }

    impl RppalGpio {
        /// Open the host GPIO subsystem.
        ///
        /// Fails if this is not a Raspberry Pi or the process lacks access
        /// to the GPIO character device.
        pub fn new() -> Result<Self, Error> {
            Ok(Self {
                gpio: Gpio::new()?,
                // rppal itself always speaks BCM; this is just the default
                // until set_mode is called.
                scheme: NumberingScheme::Bcm,
                outputs: core::array::from_fn(|_| None),
            })
        }

        fn to_bcm(&self, pin: u8) -> Result<u8, Error> {
            match self.scheme {
                NumberingScheme::Bcm => Ok(pin),
                NumberingScheme::Board => {
                    board_to_bcm(pin).ok_or(Error::PinNotAvailable(pin))
                }
            }
        }
    }

    /// Map a physical position on the 40-pin header to its BCM line number.
    ///
    /// Power, ground, and the ID EEPROM positions carry no GPIO line and map
    /// to `None`.
    fn board_to_bcm(pin: u8) -> Option<u8> {
        match pin {
            3 => Some(2),
            5 => Some(3),
            7 => Some(4),
            8 => Some(14),
            10 => Some(15),
            11 => Some(17),
            12 => Some(18),
            13 => Some(27),
            15 => Some(22),
            16 => Some(23),
            18 => Some(24),
            19 => Some(10),
            21 => Some(9),
            22 => Some(25),
            23 => Some(11),
            24 => Some(8),
            26 => Some(7),
            29 => Some(5),
            31 => Some(6),
            32 => Some(12),
            33 => Some(13),
            35 => Some(19),
            36 => Some(16),
            37 => Some(26),
            38 => Some(20),
            40 => Some(21),
            _ => None,
        }
    }

    impl GpioDriver for RppalGpio {
        type Error = Error;

        fn set_mode(&mut self, scheme: NumberingScheme) -> Result<(), Error> {
            self.scheme = scheme;
            Ok(())
        }

        fn configure_output(&mut self, pin: u8) -> Result<(), Error> {
            let bcm = self.to_bcm(pin)?;
            let slot = self
                .outputs
                .get_mut(bcm as usize)
                .ok_or(Error::PinNotAvailable(pin))?;

            if slot.is_none() {
                *slot = Some(self.gpio.get(bcm)?.into_output());
            }

            Ok(())
        }

        fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), Error> {
            let bcm = self.to_bcm(pin)?;
            let output = self
                .outputs
                .get_mut(bcm as usize)
                .and_then(Option::as_mut)
                .ok_or(Error::PinNotAvailable(pin))?;

            match level {
                Level::High => output.set_high(),
                Level::Low => output.set_low(),
            }

            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::board_to_bcm;

        #[test]
        fn header_positions_translate_to_bcm_lines() {
            // Spot-check a few corners of the 40-pin header.
            assert_eq!(board_to_bcm(3), Some(2));
            assert_eq!(board_to_bcm(11), Some(17));
            assert_eq!(board_to_bcm(40), Some(21));
        }

        #[test]
        fn power_and_ground_positions_have_no_line() {
            for position in [1u8, 2, 4, 6, 9, 14, 17, 20, 25, 30, 34, 39] {
                assert_eq!(board_to_bcm(position), None);
            }
            assert_eq!(board_to_bcm(0), None);
            assert_eq!(board_to_bcm(41), None);
        }
    }
}

#[cfg(feature = "rppal")]
pub use rppal_gpio::RppalGpio;

#[cfg(test)]
pub mod mock {
    //! A GPIO driver for use in unit tests that records whatever is driven
    //! to it.

    use std::vec::Vec;

    use super::{GpioDriver, Level, NumberingScheme};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockError;

    impl core::fmt::Display for MockError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            write!(f, "mock gpio failure")
        }
    }

    /// Records every call made through [`GpioDriver`] so tests can assert on
    /// the exact write trace.
    #[derive(Debug, Default)]
    pub struct MockGpio {
        pub modes: Vec<NumberingScheme>,
        pub configured: Vec<u8>,
        pub writes: Vec<(u8, Level)>,
        /// When set, `write_pin` fails without recording anything, standing
        /// in for a hardware fault.
        pub fail_writes: bool,
    }

    impl MockGpio {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl GpioDriver for MockGpio {
        type Error = MockError;

        fn set_mode(&mut self, scheme: NumberingScheme) -> Result<(), MockError> {
            self.modes.push(scheme);
            Ok(())
        }

        fn configure_output(&mut self, pin: u8) -> Result<(), MockError> {
            self.configured.push(pin);
            Ok(())
        }

        fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), MockError> {
            if self.fail_writes {
                return Err(MockError);
            }
            self.writes.push((pin, level));
            Ok(())
        }
    }
}

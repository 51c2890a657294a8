//! The binding table mapping matrix package pins to host GPIO lines.

use crate::pins::MatrixPin;

/// Records which host GPIO line each matrix pin is soldered to.
///
/// The table starts empty and is filled one pin at a time; there are no
/// default entries because the wiring is entirely user-specific.  All twelve
/// pins must be bound before the whole matrix can be addressed, but a partial
/// wiring is fine as long as only the wired coordinates are used.
///
/// This is pure bookkeeping.  Configuring the GPIO lines themselves is done
/// by [`crate::LedMatrix`], which owns both this table and the GPIO driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    bindings: [Option<u8>; 12],
}

impl PinMap {
    /// An empty table with no pins bound.
    pub const fn new() -> Self {
        Self {
            bindings: [None; 12],
        }
    }

    /// Record that `matrix_pin` is wired to `gpio_pin`, returning the
    /// previous binding if there was one.
    ///
    /// Last write wins: rebinding an already-bound pin overwrites the entry.
    /// The GPIO line named by the old entry is left in whatever state it was
    /// last driven to; nothing here resets it.
    pub fn bind(&mut self, matrix_pin: MatrixPin, gpio_pin: u8) -> Option<u8> {
        self.bindings[matrix_pin.index()].replace(gpio_pin)
    }

    /// The GPIO line `matrix_pin` is bound to, or `None` if it has not been
    /// bound yet.
    pub fn resolve(&self, matrix_pin: MatrixPin) -> Option<u8> {
        self.bindings[matrix_pin.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantArray;

    #[test]
    fn empty_table_resolves_nothing() {
        let map = PinMap::new();
        for pin in MatrixPin::VARIANTS {
            assert_eq!(map.resolve(*pin), None);
        }
    }

    #[test]
    fn bound_pins_resolve_independently() {
        let mut map = PinMap::new();
        assert_eq!(map.bind(MatrixPin::P1, 17), None);
        assert_eq!(map.bind(MatrixPin::P12, 22), None);

        assert_eq!(map.resolve(MatrixPin::P1), Some(17));
        assert_eq!(map.resolve(MatrixPin::P12), Some(22));
        assert_eq!(map.resolve(MatrixPin::P3), None);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut map = PinMap::new();
        map.bind(MatrixPin::P1, 17);
        assert_eq!(map.bind(MatrixPin::P1, 5), Some(17));
        assert_eq!(map.resolve(MatrixPin::P1), Some(5));
    }
}

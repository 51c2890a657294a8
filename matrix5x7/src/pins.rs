//! Matrix package pins and the fixed column/row line assignment of the 5x7
//! part.

/// Number of column lines (the x axis) on the matrix.
pub const WIDTH: usize = 5;

/// Number of row lines (the y axis) on the matrix.
pub const HEIGHT: usize = 7;

/// One of the twelve physical leads on the matrix package, numbered as on the
/// manufacturer silkscreen.
///
/// These describe the part itself, not the wiring to the host: which lead
/// carries which column or row line is fixed by the manufacturer (see
/// [`COLUMN_PINS`] and [`ROW_PINS`]), while the GPIO line each lead is
/// soldered to is user-specific and supplied via [`crate::LedMatrix::bind`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray, strum::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixPin {
    P1 = 1,
    P2 = 2,
    P3 = 3,
    P4 = 4,
    P5 = 5,
    P6 = 6,
    P7 = 7,
    P8 = 8,
    P9 = 9,
    P10 = 10,
    P11 = 11,
    P12 = 12,
}

impl MatrixPin {
    /// The silkscreen number of this pin, `1` through `12`.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Look a pin up by its silkscreen number.  Returns `None` outside
    /// `1..=12`.
    pub fn from_number(number: u8) -> Option<Self> {
        Self::from_repr(number)
    }

    /// Zero-based slot for this pin in the binding table.
    pub(crate) const fn index(self) -> usize {
        self as usize - 1
    }
}

/// The package pins carrying the five column lines, left to right.
///
/// The coordinate `x` addresses `COLUMN_PINS[x]`.
pub const COLUMN_PINS: [MatrixPin; WIDTH] = [
    MatrixPin::P1,
    MatrixPin::P3,
    MatrixPin::P10,
    MatrixPin::P7,
    MatrixPin::P8,
];

/// The package pins carrying the seven row lines, top to bottom.
///
/// The coordinate `y` addresses `ROW_PINS[y]`.
pub const ROW_PINS: [MatrixPin; HEIGHT] = [
    MatrixPin::P12,
    MatrixPin::P11,
    MatrixPin::P2,
    MatrixPin::P9,
    MatrixPin::P4,
    MatrixPin::P5,
    MatrixPin::P6,
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantArray;

    #[test]
    fn pin_numbers_round_trip() {
        for pin in MatrixPin::VARIANTS {
            let number = pin.number();
            assert!((1..=12).contains(&number));
            assert_eq!(MatrixPin::from_number(number), Some(*pin));
            assert_eq!(pin.index(), (number - 1) as usize);
        }

        assert_eq!(MatrixPin::from_number(0), None);
        assert_eq!(MatrixPin::from_number(13), None);
    }

    #[test]
    fn column_and_row_lines_partition_the_package() {
        // Every lead on the package carries exactly one line, so the two
        // tables together must name all twelve pins with no duplicates.
        let mut seen = [false; 12];
        for pin in COLUMN_PINS.iter().chain(ROW_PINS.iter()) {
            assert!(!seen[pin.index()], "pin {} assigned twice", pin.number());
            seen[pin.index()] = true;
        }
        assert!(seen.iter().all(|claimed| *claimed));
    }

    #[test]
    fn line_assignment_matches_the_part() {
        let columns: [u8; WIDTH] = COLUMN_PINS.map(MatrixPin::number);
        let rows: [u8; HEIGHT] = ROW_PINS.map(MatrixPin::number);
        assert_eq!(columns, [1, 3, 10, 7, 8]);
        assert_eq!(rows, [12, 11, 2, 9, 4, 5, 6]);
    }
}

//! Demonstration of the 5x7 matrix driver on a Raspberry Pi.
//!
//! Wires four matrix pins to the GPIO header (pin 1 to BCM 17, pin 3 to BCM
//! 18, pin 11 to BCM 23, pin 12 to BCM 22), which makes the four top-left
//! LEDs addressable.  The demo first blinks each of them in turn, then
//! multiplexes two of them fast enough that they appear lit together.

use std::thread;
use std::time::{Duration, Instant};

use matrix5x7::{LedMatrix, MatrixPin, NumberingScheme};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut matrix = LedMatrix::on_raspberry_pi()?;
    matrix.initialize(NumberingScheme::Bcm)?;

    for (matrix_pin, gpio_pin) in [
        (MatrixPin::P1, 17),
        (MatrixPin::P3, 18),
        (MatrixPin::P11, 23),
        (MatrixPin::P12, 22),
    ] {
        matrix.bind(matrix_pin, gpio_pin)?;
    }

    // Blink each of the four wired LEDs in turn, top left to bottom right,
    // for five seconds.
    println!("blinking the four wired LEDs");
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(5) {
        for y in 0..2 {
            for x in 0..2 {
                matrix.set_led(x, y, true)?;
                thread::sleep(Duration::from_millis(200));
                matrix.set_led(x, y, false)?;
                thread::sleep(Duration::from_millis(200));
            }
        }
    }

    // (0, 0) and (1, 1) share neither a row nor a column, so they cannot be
    // driven at the same instant.  Cycle between them with a sub-millisecond
    // dwell and persistence of vision shows both lit at once.
    println!("multiplexing (0, 0) and (1, 1); Ctrl+C to stop");
    loop {
        for (x, y) in [(0, 0), (1, 1)] {
            matrix.set_led(x, y, true)?;
            thread::sleep(Duration::from_micros(500));
            matrix.set_led(x, y, false)?;
        }
    }
}

//! Cell colors.
//!
//! Colors are plain RGB triples.  They render to the CSS `rgb(r, g, b)`
//! notation, which is also how they appear in grid snapshots.

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// The default drawing color.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draw a color with every channel independently uniform over `0..=255`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }

    /// Channels as `0.0..=1.0` floats, the form cairo expects.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn black_is_all_zero() {
        assert_eq!(Rgb::BLACK, Rgb::new(0, 0, 0));
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }

    #[test]
    fn displays_as_css() {
        assert_eq!(Rgb::new(12, 0, 255).to_string(), "rgb(12, 0, 255)");
    }

    #[test]
    fn serializes_as_css_string() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, r#""rgb(1, 2, 3)""#);
    }

    #[test]
    fn random_draws_one_byte_per_channel() {
        let mut expected = StdRng::seed_from_u64(42);
        let (r, g, b): (u8, u8, u8) = (expected.gen(), expected.gen(), expected.gen());

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(Rgb::random(&mut rng), Rgb::new(r, g, b));
    }

    #[test]
    fn unit_channels() {
        let (r, g, b) = Rgb::new(255, 0, 51).to_unit();
        assert_eq!(r, 1.0);
        assert_eq!(g, 0.0);
        assert!((b - 0.2).abs() < 1e-9);
    }
}

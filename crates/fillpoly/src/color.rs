//! 8-bit RGB colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An RGB color with one byte per channel.
///
/// Serializes as a plain `[r, g, b]` array so config files can write
/// `default_color: [0, 128, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.1
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.2
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parses either `#rrggbb` or `r,g,b`.
///
/// ## Rust Lesson #4: FromStr
///
/// Implementing `FromStr` is what makes `"10,20,30".parse::<Rgb>()` work,
/// just like `"42".parse::<i32>()`. The error type is ours, so callers get
/// a real message instead of a bare `None`.
impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(ColorParseError::new(s));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::new(s))
            };
            return Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let channels: Vec<&str> = s.split(',').map(str::trim).collect();
        let [r, g, b] = channels.as_slice() else {
            return Err(ColorParseError::new(s));
        };
        let parse = |c: &str| c.parse::<u8>().map_err(|_| ColorParseError::new(s));
        Ok(Rgb(parse(r)?, parse(g)?, parse(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_red() {
        assert_eq!(Rgb::default(), Rgb(255, 0, 0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Rgb(1, 171, 16).to_string(), "#01ab10");
    }

    #[test]
    fn parse_hex_and_triplet() {
        assert_eq!("#00ff80".parse::<Rgb>().unwrap(), Rgb(0, 255, 128));
        assert_eq!("10, 20,30".parse::<Rgb>().unwrap(), Rgb(10, 20, 30));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("300,0,0".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("red".parse::<Rgb>().is_err());
    }
}

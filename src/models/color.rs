//! Tracker color with a lossless hex codec.
//!
//! Colors cross the persistence boundary as `#RRGGBB` strings.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackerColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl TrackerColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Parses `#RRGGBB` (the leading `#` is optional, hex digits in either
    /// case).
    pub fn from_hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(anyhow!("invalid color hex '{value}'"));
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| anyhow!("invalid color hex '{value}'"))
        };

        Ok(Self {
            red: component(0..2)?,
            green: component(2..4)?,
            blue: component(4..6)?,
        })
    }
}

impl From<TrackerColor> for String {
    fn from(color: TrackerColor) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for TrackerColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        for color in [
            TrackerColor::rgb(0, 0, 0),
            TrackerColor::rgb(255, 255, 255),
            TrackerColor::rgb(0x33, 0xCF, 0x69),
            TrackerColor::rgb(1, 2, 3),
        ] {
            assert_eq!(TrackerColor::from_hex(&color.to_hex()).unwrap(), color);
        }
    }

    #[test]
    fn parse_accepts_lowercase_and_missing_hash() {
        let expected = TrackerColor::rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(TrackerColor::from_hex("#abcdef").unwrap(), expected);
        assert_eq!(TrackerColor::from_hex("ABCDEF").unwrap(), expected);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(TrackerColor::from_hex("").is_err());
        assert!(TrackerColor::from_hex("#12345").is_err());
        assert!(TrackerColor::from_hex("#1234567").is_err());
        assert!(TrackerColor::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let color = TrackerColor::rgb(0x33, 0xCF, 0x69);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#33CF69\"");
        assert_eq!(serde_json::from_str::<TrackerColor>(&json).unwrap(), color);
    }
}

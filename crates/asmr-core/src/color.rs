use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color \"{0}\" must start with '#'")]
    MissingHash(String),
    #[error("color \"{0}\" must have 6 or 8 hex digits")]
    Length(String),
    #[error("color \"{0}\" contains a non-hex digit")]
    Digit(String),
}

/// RGBA color. Serialized as `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. Six digits imply a fully opaque color.
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorError::Length(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Digit(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorError::Digit(s.to_string()))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbb` without the alpha channel.
    #[must_use]
    pub fn rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `[0, 1]`.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    #[must_use]
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02x}", self.rgb_hex(), self.a)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex_is_opaque() {
        let c = Color::from_hex("#D81B60").unwrap();
        assert_eq!(c, Color::rgb(0xD8, 0x1B, 0x60));
        assert_eq!(c.a, 0xFF);
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        let c = Color::from_hex("#00800080").unwrap();
        assert_eq!(c.a, 0x80);
        assert_eq!(c.rgb_hex(), "#008000");
        assert_eq!(c.to_string(), "#00800080");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(Color::from_hex("000000"), Err(ColorError::MissingHash(_))));
        assert!(matches!(Color::from_hex("#0000"), Err(ColorError::Length(_))));
        assert!(matches!(Color::from_hex("#00zz00"), Err(ColorError::Digit(_))));
    }
}

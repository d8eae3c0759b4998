//! Color codec
//!
//! Single parser for every hex color that crosses the bridge: individual
//! color setters, color fields of the bulk config document and AR styling.
//!
//! Accepted forms are 3, 4, 6 or 8 hex digits with an optional `#` or `0x`
//! prefix. The 4 and 8 digit forms carry alpha as the first channel. Short
//! forms replicate each nibble (`0xF -> 0xFF`).

use std::fmt;

use thiserror::Error;

/// Color as four 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color format `{0}`")]
    InvalidColorFormat(String),
}

impl Color {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Pack as `0xAARRGGBB`, the numeric form the engine consumes
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// Parse a hex color string
pub fn parse(text: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidColorFormat(text.to_string());

    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    let nibbles = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;

    let wide = |i: usize| nibbles[i] << 4 | nibbles[i + 1];
    let short = |i: usize| nibbles[i] * 17;

    match nibbles.len() {
        3 => Ok(Color::opaque(short(0), short(1), short(2))),
        4 => Ok(Color {
            a: short(0),
            r: short(1),
            g: short(2),
            b: short(3),
        }),
        6 => Ok(Color::opaque(wide(0), wide(2), wide(4))),
        8 => Ok(Color {
            a: wide(0),
            r: wide(2),
            g: wide(4),
            b: wide(6),
        }),
        _ => Err(invalid()),
    }
}

/// Format as 6 upper-case hex digits; alpha is not reported
pub fn format(color: Color) -> String {
    format!("{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_forms_replicate_nibbles() {
        assert_eq!(parse("F80").unwrap(), Color::opaque(255, 136, 0));
        assert_eq!(
            parse("#8F00").unwrap(),
            Color {
                a: 136,
                r: 255,
                g: 0,
                b: 0
            }
        );
    }

    #[test]
    fn test_long_forms() {
        assert_eq!(parse("#1A2B3C").unwrap(), Color::opaque(0x1A, 0x2B, 0x3C));
        assert_eq!(
            parse("0x801A2B3C").unwrap(),
            Color {
                a: 0x80,
                r: 0x1A,
                g: 0x2B,
                b: 0x3C
            }
        );
    }

    #[test]
    fn test_invalid_inputs_are_errors() {
        for bad in ["", "#", "12", "12345", "1234567", "123456789", "GGGGGG", "#12 456", "##123"] {
            assert_eq!(
                parse(bad),
                Err(ColorError::InvalidColorFormat(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_argb_packing() {
        let color = parse("#80FF0010").unwrap();
        assert_eq!(color.to_argb(), 0x80FF0010);
        assert_eq!(Color::from_argb(0x80FF0010), color);
        assert_eq!(color.to_string(), "#80FF0010");
    }

    #[test]
    fn test_format_drops_alpha() {
        assert_eq!(format(parse("#00ABCDEF").unwrap()), "ABCDEF");
    }

    proptest! {
        #[test]
        fn six_digit_round_trip(hex in "[0-9a-fA-F]{6}") {
            prop_assert_eq!(format(parse(&hex).unwrap()), hex.to_uppercase());
        }

        #[test]
        fn three_digit_nibble_replication(hex in "[0-9a-fA-F]{3}") {
            let color = parse(&hex).unwrap();
            let channel = |c: char| c.to_digit(16).unwrap() as u8 * 17;
            let mut chars = hex.chars();
            prop_assert_eq!(color.r, channel(chars.next().unwrap()));
            prop_assert_eq!(color.g, channel(chars.next().unwrap()));
            prop_assert_eq!(color.b, channel(chars.next().unwrap()));
            prop_assert_eq!(color.a, 255);
        }

        #[test]
        fn wrong_length_never_parses(hex in "[0-9a-f]{0,12}") {
            prop_assume!(![3, 4, 6, 8].contains(&hex.len()));
            prop_assert!(parse(&hex).is_err());
        }
    }
}

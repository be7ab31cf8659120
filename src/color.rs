//! Colour shared by the frame markup presenter and the chart surfaces.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Neutral gray used for chart axes.
    pub const AXIS: Self = Self(0x88, 0x88, 0x88);

    /// Parses `#rrggbb` or `#rgb`. Anything else yields `None`.
    #[must_use]
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => Some(Self(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            )),
            3 => Some(Self(
                short_channel(hex.get(0..1)?)?,
                short_channel(hex.get(1..2)?)?,
                short_channel(hex.get(2..3)?)?,
            )),
            _ => None,
        }
    }
}

fn channel(digits: &str) -> Option<u8> {
    u8::from_str_radix(digits, 16).ok()
}

fn short_channel(digit: &str) -> Option<u8> {
    channel(digit).map(|nibble| nibble.saturating_mul(17))
}

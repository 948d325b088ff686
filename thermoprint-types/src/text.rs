//! Text formatting options

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Horizontal justification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Center => "CENTER",
            Self::Right => "RIGHT",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEFT" => Ok(Self::Left),
            "CENTER" | "CENTRE" => Ok(Self::Center),
            "RIGHT" => Ok(Self::Right),
            other => Err(Error::Parse(format!("unknown alignment: {other}"))),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named character sizes
///
/// Only `Large` and `XLarge` change the printer state (double width and
/// height); the others select the normal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NamedSize {
    Small,
    #[default]
    Normal,
    Large,
    XLarge,
}

impl NamedSize {
    /// Whether this size selects double width and height
    pub fn is_double(self) -> bool {
        matches!(self, Self::Large | Self::XLarge)
    }
}

impl FromStr for NamedSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SMALL" => Ok(Self::Small),
            "NORMAL" => Ok(Self::Normal),
            "LARGE" => Ok(Self::Large),
            "XLARGE" => Ok(Self::XLarge),
            other => Err(Error::Parse(format!("unknown font size: {other}"))),
        }
    }
}

/// Character size: a named size or a point size mapped onto multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Named(NamedSize),
    Points(u32),
}

impl From<NamedSize> for FontSize {
    fn from(size: NamedSize) -> Self {
        Self::Named(size)
    }
}

impl From<u32> for FontSize {
    fn from(points: u32) -> Self {
        Self::Points(points)
    }
}

impl FromStr for FontSize {
    type Err = Error;

    /// Accepts either a number ("24") or a size name ("LARGE")
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().parse::<u32>() {
            Ok(points) => Ok(Self::Points(points)),
            Err(_) => s.parse::<NamedSize>().map(Self::Named),
        }
    }
}

/// Built-in printer character fonts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FontType {
    #[default]
    A = 0,
    B = 1,
    C = 2,
}

impl FromStr for FontType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            other => Err(Error::Parse(format!("unknown font type: {other}"))),
        }
    }
}

/// Print direction rotation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Upside180,
    Cw270,
}

impl TryFrom<u16> for Rotation {
    type Error = Error;

    fn try_from(degrees: u16) -> Result<Self> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Cw90),
            180 => Ok(Self::Upside180),
            270 => Ok(Self::Cw270),
            other => Err(Error::Validation(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {other}"
            ))),
        }
    }
}

bitflags! {
    /// Additional text effects beyond bold and underline
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct TextEffects: u8 {
        const ITALIC = 1;
        const STRIKETHROUGH = 1 << 1;
        const DOUBLE_STRIKE = 1 << 2;
        const INVERT = 1 << 3;
    }
}

/// Formatting applied to a single text print
///
/// Options never persist: after the text is printed the formatting is
/// reset to the printer defaults.
///
/// # Examples
///
/// ```
/// use thermoprint_types::{Alignment, FontSize, PrintOptions};
///
/// let options = PrintOptions::new()
///     .with_align(Alignment::Center)
///     .with_bold(true)
///     .with_size(FontSize::Points(24));
/// assert!(options.bold);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintOptions {
    /// Justification; `None` leaves the current alignment untouched
    pub align: Option<Alignment>,

    pub bold: bool,

    pub underline: bool,

    /// Character size; `None` leaves the current size untouched
    pub size: Option<FontSize>,

    pub font: Option<FontType>,

    pub effects: TextEffects,

    pub rotation: Option<Rotation>,
}

impl PrintOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_size(mut self, size: impl Into<FontSize>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_font(mut self, font: FontType) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_effects(mut self, effects: TextEffects) -> Self {
        self.effects |= effects;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Whether any extended effect needs clearing after the print
    pub fn has_extended_effects(&self) -> bool {
        !self.effects.is_empty() || self.font.is_some() || self.rotation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alignment_parse() {
        assert_eq!("center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!(" RIGHT ".parse::<Alignment>().unwrap(), Alignment::Right);
        assert!("middle".parse::<Alignment>().is_err());
    }

    #[test]
    fn test_font_size_parse() {
        assert_eq!("24".parse::<FontSize>().unwrap(), FontSize::Points(24));
        assert_eq!(
            "xlarge".parse::<FontSize>().unwrap(),
            FontSize::Named(NamedSize::XLarge)
        );
        assert!("huge".parse::<FontSize>().is_err());
    }

    #[test]
    fn test_named_size_double() {
        assert!(NamedSize::Large.is_double());
        assert!(NamedSize::XLarge.is_double());
        assert!(!NamedSize::Small.is_double());
        assert!(!NamedSize::Normal.is_double());
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::try_from(90).unwrap(), Rotation::Cw90);
        assert!(matches!(Rotation::try_from(45), Err(Error::Validation(_))));
    }

    #[test]
    fn test_options_builder() {
        let options = PrintOptions::new()
            .with_align(Alignment::Right)
            .with_underline(true)
            .with_effects(TextEffects::ITALIC)
            .with_effects(TextEffects::INVERT);

        assert_eq!(options.align, Some(Alignment::Right));
        assert!(options.underline);
        assert!(!options.bold);
        assert_eq!(options.effects, TextEffects::ITALIC | TextEffects::INVERT);
        assert!(options.has_extended_effects());
        assert!(!PrintOptions::default().has_extended_effects());
    }
}

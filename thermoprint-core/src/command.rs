//! ESC/POS fixed command definitions

use std::fmt;

use thermoprint_types::{Alignment, FontType};

use crate::error::{Error, Result};

/// Fixed (parameterless) printer commands
///
/// Commands whose bytes depend on caller input (font size, QR, barcode,
/// raster) are built by [`crate::encoder`]; everything here is a constant
/// byte sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // Printer control
    Init,
    Cut,
    CashDrawerKick,

    // Justification
    AlignLeft,
    AlignCenter,
    AlignRight,

    // Emphasis
    BoldOn,
    BoldOff,
    UnderlineOn,
    UnderlineOff,
    StrikethroughOn,
    ItalicOn,
    ItalicOff,
    DoubleStrikeOn,
    DoubleStrikeOff,
    InvertOn,
    InvertOff,

    // Character size
    SizeNormal,
    SizeDouble,

    // Font selection
    FontA,
    FontB,
    FontC,

    // Print direction
    Rotate90On,
    Rotate90Off,
    UpsideDownOn,
    UpsideDownOff,

    // QR code (GS ( k)
    QrSelectModel2,
    QrPrint,
}

impl Command {
    /// Every fixed command, in table order
    pub const ALL: [Command; 28] = [
        Self::Init,
        Self::Cut,
        Self::CashDrawerKick,
        Self::AlignLeft,
        Self::AlignCenter,
        Self::AlignRight,
        Self::BoldOn,
        Self::BoldOff,
        Self::UnderlineOn,
        Self::UnderlineOff,
        Self::StrikethroughOn,
        Self::ItalicOn,
        Self::ItalicOff,
        Self::DoubleStrikeOn,
        Self::DoubleStrikeOff,
        Self::InvertOn,
        Self::InvertOff,
        Self::SizeNormal,
        Self::SizeDouble,
        Self::FontA,
        Self::FontB,
        Self::FontC,
        Self::Rotate90On,
        Self::Rotate90Off,
        Self::UpsideDownOn,
        Self::UpsideDownOff,
        Self::QrSelectModel2,
        Self::QrPrint,
    ];

    /// Wire bytes of the command
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Init => &[0x1B, 0x40],
            Self::Cut => &[0x1D, 0x56, 0x00],
            Self::CashDrawerKick => &[0x1B, 0x70, 0x00, 0x19, 0xFA],
            Self::AlignLeft => &[0x1B, 0x61, 0x00],
            Self::AlignCenter => &[0x1B, 0x61, 0x01],
            Self::AlignRight => &[0x1B, 0x61, 0x02],
            Self::BoldOn => &[0x1B, 0x45, 0x01],
            Self::BoldOff => &[0x1B, 0x45, 0x00],
            Self::UnderlineOn => &[0x1B, 0x2D, 0x01],
            Self::UnderlineOff => &[0x1B, 0x2D, 0x00],
            Self::StrikethroughOn => &[0x1B, 0x2D, 0x02],
            Self::ItalicOn => &[0x1B, 0x34, 0x01],
            Self::ItalicOff => &[0x1B, 0x34, 0x00],
            Self::DoubleStrikeOn => &[0x1B, 0x47, 0x01],
            Self::DoubleStrikeOff => &[0x1B, 0x47, 0x00],
            Self::InvertOn => &[0x1D, 0x42, 0x01],
            Self::InvertOff => &[0x1D, 0x42, 0x00],
            Self::SizeNormal => &[0x1D, 0x21, 0x00],
            Self::SizeDouble => &[0x1D, 0x21, 0x11],
            Self::FontA => &[0x1B, 0x4D, 0x00],
            Self::FontB => &[0x1B, 0x4D, 0x01],
            Self::FontC => &[0x1B, 0x4D, 0x02],
            Self::Rotate90On => &[0x1B, 0x56, 0x01],
            Self::Rotate90Off => &[0x1B, 0x56, 0x00],
            Self::UpsideDownOn => &[0x1B, 0x7B, 0x01],
            Self::UpsideDownOff => &[0x1B, 0x7B, 0x00],
            Self::QrSelectModel2 => &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00],
            Self::QrPrint => &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30],
        }
    }

    /// Justification command for an alignment
    pub fn align(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => Self::AlignLeft,
            Alignment::Center => Self::AlignCenter,
            Alignment::Right => Self::AlignRight,
        }
    }

    /// Font selection command for a font type
    pub fn font(font: FontType) -> Self {
        match font {
            FontType::A => Self::FontA,
            FontType::B => Self::FontB,
            FontType::C => Self::FontC,
        }
    }

    /// Check if this command switches a formatting attribute back off
    pub fn is_reset(self) -> bool {
        matches!(
            self,
            Self::AlignLeft
                | Self::BoldOff
                | Self::UnderlineOff
                | Self::ItalicOff
                | Self::DoubleStrikeOff
                | Self::InvertOff
                | Self::SizeNormal
                | Self::FontA
                | Self::Rotate90Off
                | Self::UpsideDownOff
        )
    }

    /// Get command mnemonic
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "ESC @",
            Self::Cut => "GS V",
            Self::CashDrawerKick => "ESC p",
            Self::AlignLeft | Self::AlignCenter | Self::AlignRight => "ESC a",
            Self::BoldOn | Self::BoldOff => "ESC E",
            Self::UnderlineOn | Self::UnderlineOff | Self::StrikethroughOn => "ESC -",
            Self::ItalicOn | Self::ItalicOff => "ESC 4",
            Self::DoubleStrikeOn | Self::DoubleStrikeOff => "ESC G",
            Self::InvertOn | Self::InvertOff => "GS B",
            Self::SizeNormal | Self::SizeDouble => "GS !",
            Self::FontA | Self::FontB | Self::FontC => "ESC M",
            Self::Rotate90On | Self::Rotate90Off => "ESC V",
            Self::UpsideDownOn | Self::UpsideDownOff => "ESC {",
            Self::QrSelectModel2 | Self::QrPrint => "GS ( k",
        }
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for Command {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_bytes() == value)
            .ok_or_else(|| Error::UnknownCommand(hex::encode(value)))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), hex::encode(self.as_bytes()))
    }
}

//! Typed bridge console commands.
//!
//! Each variant renders to the exact wire line the firmware parses. Pin
//! names and channel indices pass through verbatim; their semantics belong
//! to the firmware.

use std::fmt;

/// GPIO pin direction/function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// Digital push-pull output.
    Output,
    /// Analog input.
    Analog,
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinMode::Output => f.write_str("OUT"),
            PinMode::Analog => f.write_str("ANALOG"),
        }
    }
}

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("0"),
            Level::High => f.write_str("1"),
        }
    }
}

/// One command of the bridge console grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `MODE <pin> OUT|ANALOG`
    Mode { pin: String, mode: PinMode },
    /// `SET <pin> <0|1>`
    Set { pin: String, level: Level },
    /// `READ <pin>`
    Read { pin: String },
    /// `UART <channel> <baud> WRITE <text>`; the firmware opens the
    /// sub-channel at the requested baud rate.
    UartWrite {
        channel: u8,
        baud: u32,
        text: String,
    },
    /// `I2C <channel> SCAN`
    I2cScan { channel: u8 },
    /// `SPI <channel> WRITE 0x<HH>`
    SpiWrite { channel: u8, byte: u8 },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Mode { pin, mode } => write!(f, "MODE {pin} {mode}"),
            Command::Set { pin, level } => write!(f, "SET {pin} {level}"),
            Command::Read { pin } => write!(f, "READ {pin}"),
            Command::UartWrite {
                channel,
                baud,
                text,
            } => write!(f, "UART {channel} {baud} WRITE {text}"),
            Command::I2cScan { channel } => write!(f, "I2C {channel} SCAN"),
            Command::SpiWrite { channel, byte } => {
                write!(f, "SPI {channel} WRITE 0x{byte:02X}")
            }
        }
    }
}

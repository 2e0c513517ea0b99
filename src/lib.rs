//! pinprobe: serial exerciser for firmware bridge consoles.
//!
//! Opens a serial port, sends a fixed sequence of newline-terminated ASCII
//! commands (GPIO mode/set/read, UART passthrough, I2C scan, SPI write) to a
//! microcontroller command interpreter, and prints each response line.
//!
//! # Modules
//!
//! - `transport`: serial I/O abstraction (real port, mock, link settings)
//! - `command`: typed commands rendering to the firmware wire grammar
//! - `session`: one blocking request/response round trip per command
//! - `script`: the fixed exercise sequence and its run report
//! - `error`: unified error handling

pub mod command;
pub mod error;
pub mod script;
pub mod session;
pub mod transport;

pub use command::{Command, Level, PinMode};
pub use error::{AppError, AppResult};
pub use script::{exercise_sequence, run_exercise, ExerciseReport, StepReport};
pub use session::{CommandSession, DEFAULT_SETTLE};
pub use transport::{
    LinkSettings, MockObserver, MockTransport, SerialLink, SerialTransport, TransportError,
};

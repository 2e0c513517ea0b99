//! The fixed exercise sequence.
//!
//! Drives every peripheral class the bridge console exposes: GPIO output,
//! analog read, UART passthrough, I2C scan, SPI write. Steps are
//! independent; the firmware holds whatever state the commands imply.

use crate::command::{Command, Level, PinMode};
use crate::error::AppResult;
use crate::session::CommandSession;
use crate::transport::SerialTransport;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// One command/response exchange of the exercise.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// The command line as sent (without terminator).
    pub command: String,
    /// The trimmed response line; empty when the device stayed silent.
    pub response: String,
    /// Round-trip time including the settle delay.
    pub elapsed_ms: u64,
}

/// Summary of a completed exercise run.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseReport {
    pub port: String,
    pub steps: Vec<StepReport>,
}

/// The command sequence of the harness, in wire order: LED setup (PA0
/// output, driven high), analog read of PA1, a UART passthrough write, an
/// I2C bus scan, and one SPI byte.
pub fn exercise_sequence() -> Vec<Command> {
    vec![
        Command::Mode {
            pin: "PA0".into(),
            mode: PinMode::Output,
        },
        Command::Set {
            pin: "PA0".into(),
            level: Level::High,
        },
        Command::Mode {
            pin: "PA1".into(),
            mode: PinMode::Analog,
        },
        Command::Read { pin: "PA1".into() },
        Command::UartWrite {
            channel: 1,
            baud: 9600,
            text: "Test".into(),
        },
        Command::I2cScan { channel: 1 },
        Command::SpiWrite {
            channel: 1,
            byte: 0xAA,
        },
    ]
}

/// Run the full sequence, printing each response line to stdout.
///
/// An empty response (device silent past the timeout) is recorded and the
/// run continues; a transport fault or undecodable response aborts via `?`.
pub fn run_exercise<T: SerialTransport>(
    session: &mut CommandSession<T>,
) -> AppResult<ExerciseReport> {
    let port = session.transport_name().to_string();
    info!(port = %port, "starting bridge exercise");

    let mut steps = Vec::new();
    for command in exercise_sequence() {
        let started = Instant::now();
        let response = session.send_command(&command)?;
        println!("{response}");
        steps.push(StepReport {
            command: command.to_string(),
            response,
            elapsed_ms: started.elapsed().as_millis() as u64,
        });
    }

    info!(steps = steps.len(), "exercise complete");
    Ok(ExerciseReport { port, steps })
}

use clap::Parser;
use pinprobe::session::CommandSession;
use pinprobe::transport::{LinkSettings, MockTransport, SerialLink, SerialTransport};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pinprobe",
    version,
    about = "Exercise a firmware bridge console over a serial port.",
    long_about = "Opens a serial port and drives the firmware's GPIO/UART/I2C/SPI \
command console through a fixed exercise sequence, printing each response line."
)]
struct Args {
    /// Serial port to open (e.g. /dev/ttyUSB0 or COM3).
    #[arg(required_unless_present_any = ["list", "dry_run"])]
    port: Option<String>,

    /// Baud rate of the console link.
    #[arg(short, long, default_value_t = 115_200)]
    baud: u32,

    /// Read timeout per command, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Pause between writing a command and reading its response, in
    /// milliseconds.
    #[arg(long, default_value_t = 100)]
    settle_ms: u64,

    /// Print a JSON report of the run after the responses.
    #[arg(long)]
    json: bool,

    /// Run against a built-in echo device instead of hardware.
    #[arg(long)]
    dry_run: bool,

    /// List detected serial ports and exit.
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list {
        return list_ports();
    }

    let transport: Box<dyn SerialTransport> = if args.dry_run {
        Box::new(MockTransport::echoing("DRY0", b"OK\r\n"))
    } else {
        let port_name = args
            .port
            .as_deref()
            .ok_or("a serial port name is required (or pass --dry-run)")?;
        let settings = LinkSettings::default()
            .with_baud(args.baud)
            .with_timeout(Duration::from_millis(args.timeout_ms));
        Box::new(SerialLink::open(port_name, settings)?)
    };

    let mut session =
        CommandSession::new(transport).with_settle(Duration::from_millis(args.settle_ms));
    session.drain_input()?;

    let report = pinprobe::script::run_exercise(&mut session)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn list_ports() -> Result<(), Box<dyn std::error::Error>> {
    let ports = serialport::available_ports()?;
    if ports.is_empty() {
        println!("no serial ports detected");
        return Ok(());
    }
    for port in ports {
        let kind = match port.port_type {
            serialport::SerialPortType::UsbPort(info) => {
                let product = info.product.unwrap_or_default();
                format!("usb {:04x}:{:04x} {product}", info.vid, info.pid)
            }
            serialport::SerialPortType::BluetoothPort => "bluetooth".to_string(),
            serialport::SerialPortType::PciPort => "pci".to_string(),
            serialport::SerialPortType::Unknown => "unknown".to_string(),
        };
        println!("{}\t{}", port.port_name, kind.trim_end());
    }
    Ok(())
}

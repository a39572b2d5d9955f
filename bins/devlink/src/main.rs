//! devlink command - device firmware/version info.

mod handle;

use clap::{Parser, Subcommand};
use devlink_info::devlink::DevlinkInfoClient;
use devlink_info::{Error, InfoMap};
use tracing::debug;

use handle::DevHandle;

#[derive(Parser)]
#[command(name = "devlink", version, about = "Devlink device info tool")]
struct Cli {
    /// Output JSON.
    #[arg(short = 'j', long, global = true)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Devlink device commands.
    Dev {
        #[command(subcommand)]
        command: DevCommand,
    },

    /// Show the DDP package loaded on a PCI device.
    Ddp {
        /// PCI address, e.g. 0000:84:00.0
        device: String,
    },

    /// Check whether a device reports devlink info.
    Supported {
        /// Device handle, e.g. pci/0000:84:00.0
        handle: DevHandle,
    },
}

#[derive(Subcommand)]
enum DevCommand {
    /// Show device firmware and version info.
    Info {
        /// Device handle, e.g. pci/0000:84:00.0
        handle: DevHandle,

        /// Only show these keys; fails if any is missing.
        #[arg(short, long = "key", value_name = "KEY")]
        keys: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = run(&cli);
    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run a command; `Ok(false)` means a negative answer rather than a failure.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let client = DevlinkInfoClient::new()?;

    match &cli.command {
        Command::Dev {
            command: DevCommand::Info { handle, keys },
        } => {
            let info = if keys.is_empty() {
                client.info_by_name(&handle.bus, &handle.device)?
            } else {
                client.info_by_name_and_keys(&handle.bus, &handle.device, keys)?
            };
            print_info(cli, handle, &info)?;
            Ok(true)
        }
        Command::Ddp { device } => {
            let profile = client
                .ddp_profile(device)
                .map_err(|e| ddp_error(device, e))?;
            if cli.json {
                print_json(cli, &serde_json::json!({ "ddp": profile }))?;
            } else {
                println!("{}", profile);
            }
            Ok(true)
        }
        Command::Supported { handle } => {
            let supported = client.is_devlink_supported(&handle.bus, &handle.device);
            debug!(%handle, supported, "devlink capability probe");
            if cli.json {
                print_json(cli, &serde_json::json!({ "supported": supported }))?;
            } else {
                println!("{}", if supported { "yes" } else { "no" });
            }
            Ok(supported)
        }
    }
}

/// Report a device without a DDP package as such; other failures are kept.
fn ddp_error(device: &str, err: Error) -> Error {
    if !matches!(err, Error::KeyNotFound { .. } | Error::ReadAttributes { .. }) {
        return err;
    }
    debug!(device, error = %err, "no DDP package reported");
    Error::DdpNotSupported {
        device: device.to_string(),
    }
}

fn print_info(cli: &Cli, handle: &DevHandle, info: &InfoMap) -> anyhow::Result<()> {
    if cli.json {
        let mut devices = serde_json::Map::new();
        devices.insert(handle.to_string(), serde_json::to_value(info)?);
        return print_json(cli, &serde_json::json!({ "info": devices }));
    }

    println!("{}:", handle);
    let width = info.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in info {
        println!("  {:<width$} {}", key, value, width = width);
    }
    Ok(())
}

fn print_json(cli: &Cli, value: &serde_json::Value) -> anyhow::Result<()> {
    let text = if cli.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use colored::Colorize;
use ipcalc_cidr::{classful_netmask, compute};
use ipcalc_core::config::{ConfigError, Settings};
use ipcalc_core::{AddressFamily, NetworkInfo};
use ipcalc_resolver::ReverseResolver;
use std::io::IsTerminal;
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod output;

use output::{render_info, render_json, render_vars, Report, Selection};

/// Calculate netmask, network, broadcast and host range of an IP address
#[derive(Parser)]
#[command(name = "ipcalc")]
#[command(author, version, about, long_about = None, disable_help_flag = true)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// IP address, optionally followed by /PREFIX or /NETMASK
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Netmask for an IPv4 address given without a prefix
    #[arg(value_name = "NETMASK")]
    netmask: Option<String>,

    /// Validate the address and exit
    #[arg(short = 'c', long)]
    check: bool,

    /// Print information on the provided address
    #[arg(short = 'i', long)]
    info: bool,

    /// Require an IPv4 address
    #[arg(short = '4', long, conflicts_with = "ipv6")]
    ipv4: bool,

    /// Require an IPv6 address
    #[arg(short = '6', long)]
    ipv6: bool,

    /// Display the broadcast address
    #[arg(short = 'b', long)]
    broadcast: bool,

    /// Show the hostname found through reverse DNS
    #[arg(short = 'h', long)]
    hostname: bool,

    /// Display the netmask (class A, B or C default when no prefix is given)
    #[arg(short = 'm', long = "netmask")]
    show_netmask: bool,

    /// Display the network address
    #[arg(short = 'n', long)]
    network: bool,

    /// Display the prefix length
    #[arg(short = 'p', long)]
    prefix: bool,

    /// Display the minimum address in the network
    #[arg(long)]
    minaddr: bool,

    /// Display the maximum address in the network
    #[arg(long)]
    maxaddr: bool,

    /// Display the address space the network resides in
    #[arg(long)]
    addrspace: bool,

    /// Never display error messages
    #[arg(short = 's', long)]
    silent: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Info block or KEY=VALUE lines
    Human,
    /// JSON output (pretty-printed)
    Json,
}

impl Cli {
    fn selection(&self) -> Selection {
        Selection {
            netmask: self.show_netmask,
            prefix: self.prefix,
            broadcast: self.broadcast,
            network: self.network,
            minaddr: self.minaddr,
            maxaddr: self.maxaddr,
            addrspace: self.addrspace,
            hostname: self.hostname,
        }
    }

    /// Whether a prefix or netmask accompanies the address
    fn has_prefix(&self) -> bool {
        self.address.contains('/') || self.netmask.is_some()
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    setup_tracing(cli.verbose, cli.silent);
    if !std::io::stderr().is_terminal() {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.silent {
                eprintln!("{} {:#}", "ipcalc:".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn handle_parse_error(e: clap::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
        _ => {
            let silent = std::env::args().any(|arg| arg == "-s" || arg == "--silent");
            if !silent {
                let _ = e.print();
            }
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(verbose: bool, silent: bool) {
    let level = if silent {
        LevelFilter::OFF
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let family = AddressFamily::detect(&cli.address);
    validate_args(cli, family)?;

    let info = compute(&cli.address, cli.netmask.as_deref())?;
    if cli.check {
        return Ok(());
    }

    let mut report = Report::new(&info);
    if family == AddressFamily::V4 && !cli.has_prefix() {
        if let IpAddr::V4(address) = info.address {
            report.display_netmask = IpAddr::V4(classful_netmask(address));
        }
    }
    if cli.hostname {
        report.hostname = resolve_hostname(&info);
    }

    let selection = cli.selection();
    let text = match cli.output {
        OutputFormat::Json => render_json(&report)?,
        OutputFormat::Human if cli.info || selection.is_empty() => render_info(&report),
        OutputFormat::Human => render_vars(&report, &selection),
    };
    print!("{}", text);

    Ok(())
}

/// Argument combinations the calculator cannot judge on its own
fn validate_args(cli: &Cli, family: AddressFamily) -> Result<()> {
    if (cli.ipv4 && family != AddressFamily::V4) || (cli.ipv6 && family != AddressFamily::V6) {
        let wanted = if cli.ipv4 {
            AddressFamily::V4
        } else {
            AddressFamily::V6
        };
        bail!("{} is not an {} address", cli.address, wanted);
    }

    match family {
        AddressFamily::V4 => {
            if (cli.broadcast || cli.network || cli.prefix) && !cli.has_prefix() {
                bail!("netmask or prefix expected");
            }
        }
        AddressFamily::V6 => {
            if let Some(ref extra) = cli.netmask {
                bail!("unexpected argument: {}", extra);
            }
        }
    }

    Ok(())
}

/// Reverse lookup of the given address; failures leave the hostname empty
fn resolve_hostname(info: &NetworkInfo) -> Option<String> {
    let settings = lookup_settings(Settings::from_env());
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!("cannot start DNS runtime: {}", e);
            return None;
        }
    };

    let hostname = runtime.block_on(async {
        ReverseResolver::from_settings(&settings)
            .lookup_hostname(info.address)
            .await
    });
    hostname_or_none(hostname)
}

/// Bad lookup settings fall back to the defaults instead of failing the run
fn lookup_settings(settings: std::result::Result<Settings, ConfigError>) -> Settings {
    settings.unwrap_or_else(|e| {
        warn!("{}; using default lookup settings", e);
        Settings::default()
    })
}

fn hostname_or_none(lookup: ipcalc_resolver::Result<String>) -> Option<String> {
    match lookup {
        Ok(name) => Some(name),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

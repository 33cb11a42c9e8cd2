pub mod scan;
pub mod speedtest;

use std::time::Duration;

use airgauge_common::config::ScanBackend;
use airgauge_common::wifi::parse::OutputLayout;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "airgauge")]
#[command(about = "Nearby WiFi networks and internet speed, from the terminal.")]
#[command(version, arg_required_else_help = true)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Reduce decorative output (-q, -qq)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List nearby WiFi networks (requires root)
    #[command(alias = "s")]
    Scan {
        /// Scan source to try first
        #[arg(long, value_enum, default_value_t = Backend::Nmcli)]
        prefer: Backend,

        /// Output layout requested from nmcli
        #[arg(long, value_enum, default_value_t = Layout::Table)]
        layout: Layout,

        /// Seconds to wait for each scan source
        #[arg(long, value_name = "SECS", value_parser = parse_secs)]
        timeout: Option<Duration>,

        /// Skip manufacturer lookup for access points
        #[arg(long)]
        no_vendor: bool,
    },
    /// Measure download, upload and latency
    #[command(alias = "st")]
    Speedtest {
        /// Seconds to wait for each request
        #[arg(long, value_name = "SECS", value_parser = parse_secs)]
        timeout: Option<Duration>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Nmcli,
    Library,
}

impl From<Backend> for ScanBackend {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Nmcli => ScanBackend::Nmcli,
            Backend::Library => ScanBackend::Library,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    Table,
    Terse,
}

impl From<Layout> for OutputLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Table => OutputLayout::Table,
            Layout::Terse => OutputLayout::Terse,
        }
    }
}

fn parse_secs(arg: &str) -> Result<Duration, String> {
    match arg.parse::<u64>() {
        Ok(0) => Err("timeout must be at least one second".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(e.to_string()),
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

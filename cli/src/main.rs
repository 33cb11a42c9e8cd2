mod commands;
mod terminal;

use airgauge_common::config::{Config, DEFAULT_SCAN_TIMEOUT, DEFAULT_SPEEDTEST_TIMEOUT};
use commands::{CommandLine, Commands, scan, speedtest};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose)?;
    print::banner(commands.quiet);

    let mut cfg = Config {
        quiet: commands.quiet,
        ..Config::default()
    };

    match commands.command {
        Commands::Scan {
            prefer,
            layout,
            timeout,
            no_vendor,
        } => {
            cfg.backends = Config::backend_order(prefer.into());
            cfg.layout = layout.into();
            cfg.scan_timeout = timeout.unwrap_or(DEFAULT_SCAN_TIMEOUT);
            cfg.no_vendor = no_vendor;
            scan::scan(&cfg).await
        }
        Commands::Speedtest { timeout } => {
            cfg.speedtest_timeout = timeout.unwrap_or(DEFAULT_SPEEDTEST_TIMEOUT);
            speedtest::speedtest(&cfg).await
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
use greeting_reel::app::{self, Flags};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

const HELP: &str = "\
greeting_reel

USAGE:
  greeting_reel [OPTIONS]

OPTIONS:
  --config-dir <DIR>   Directory holding settings.toml
  --assets <DIR>       Directory holding images, audio, video and catalog.toml
  --log-level <LEVEL>  Log filter when RUST_LOG is unset (default: warn)
  -h, --help           Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let log_level: Option<String> = args.opt_value_from_str("--log-level").unwrap_or(None);
    init_logging(log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));

    let flags = Flags {
        config_dir: args.opt_value_from_str("--config-dir").unwrap_or(None),
        assets_dir: args.opt_value_from_str("--assets").unwrap_or(None),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unknown arguments");
    }

    app::run(flags)
}

fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

//! Huddle - team secrets encrypted for the people a signed roster names.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use huddle::cli::output;
use huddle::cli::{execute, Cli};
use huddle::core::constants;
use huddle::error::{ConfigError, Error, GuardError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("huddle=debug")
        } else {
            EnvFilter::new("huddle=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = ctrlc::set_handler(huddle::core::editor::handle_interrupt) {
        tracing::warn!("failed to install interrupt handler: {}", e);
    }

    if let Err(e) = execute(cli.command, cli.config.as_deref()) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound(_)) => {
                Some("create ~/.huddle/config.toml with a [trust] table")
            }
            Error::Config(ConfigError::ScopeNotTrusted(_)) => {
                Some("add this directory and its signer under [trust] in your config")
            }
            Error::Guard(GuardError::MissingKeysForRecipients(_)) => {
                Some("run: huddle keys refresh")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

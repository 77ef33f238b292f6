use serde::Serialize;

use freightdesk_core::config::{AppConfig, LoadOptions, LogFormat};

use super::{pretty_json, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigReport {
    broker_id: String,
    display_name: String,
    currency: String,
    log_level: String,
    log_format: &'static str,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("config", "config_validation", error.to_string(), 2);
        }
    };

    let report = ConfigReport {
        broker_id: config.broker.broker_id,
        display_name: config.broker.display_name,
        currency: config.currency,
        log_level: config.logging.level,
        log_format: match config.logging.format {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
        },
    };
    pretty_json("config", &report)
}

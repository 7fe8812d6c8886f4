use std::io::{self, BufReader};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use appstate_relay::appstate::diagnostics::TAG;
use appstate_relay::appstate::{AppStateModule, EventChannel, NullChannel, sink_for_mode};
use appstate_relay::config::RelayConfig;
use appstate_relay::relay::Relay;
use appstate_relay::scripting::ScriptEventChannel;
use appstate_relay::{cli, debug};

fn main() -> Result<()> {
    let options = cli::process_cli();

    let config = match &options.config_path {
        Some(path) => RelayConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RelayConfig::load().context("failed to load config")?,
    };

    debug::init_log_bridge(options.log_level, config.log_level);
    log::info!("Starting appstate-relay {}", appstate_relay::VERSION);

    let mode = options.diagnostics_mode.unwrap_or(config.diagnostics_mode);
    let phase = options.phase.unwrap_or(config.initial_phase);
    log::info!(
        "diagnostics mode {}, host phase {:?}",
        mode.display_name(),
        phase
    );

    let script_config = options
        .script
        .clone()
        .or_else(|| config.active_script().cloned());

    let (channel, script): (Arc<dyn EventChannel>, Option<Arc<ScriptEventChannel>>) =
        match script_config {
            Some(script_config) => {
                let script = Arc::new(
                    ScriptEventChannel::spawn(&script_config)
                        .with_context(|| format!("failed to start '{}'", script_config.name))?,
                );
                (Arc::clone(&script) as Arc<dyn EventChannel>, Some(script))
            }
            None => {
                log::warn!("no subscriber configured; every event will be dropped");
                (Arc::new(NullChannel), None)
            }
        };

    let diagnostics = sink_for_mode(mode, config.soft_report_capacity);
    let module = AppStateModule::new(&phase, channel, diagnostics.as_sink());
    let relay = Relay::new(module, script);
    relay.announce();

    let linger = Duration::from_millis(options.linger_ms);
    let stats = relay.run(BufReader::new(io::stdin()), linger)?;
    log::info!(
        "stdin closed: {} notifications, {} rejected lines, {} subscriber commands",
        stats.notifications,
        stats.rejected_lines,
        stats.commands
    );

    if let Some(reports) = diagnostics.soft_reports()
        && reports.total_reported() > 0
    {
        log::warn!(
            target: TAG,
            "{} app state events dropped this session ({} soft reports retained)",
            reports.total_reported(),
            reports.reports().len()
        );
    }

    relay.shutdown();
    Ok(())
}

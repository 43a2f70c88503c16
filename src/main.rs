use anyhow::{bail, Result};
use clap::Parser;
use readymap::cli::{Cli, Commands};
use readymap::config::{default_config_template, ReadymapConfig};
use readymap::io::output::create_writer;
use readymap::orchestrator::Auditor;
use readymap::progress::{ProgressConfig, ProgressManager};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        command @ Commands::Audit { .. } => handle_audit_command(command),
        Commands::Init { force } => init_config(force),
    }
}

fn handle_audit_command(command: Commands) -> Result<()> {
    let Commands::Audit {
        path,
        format,
        output,
        max_cyclomatic,
        max_length,
        max_nesting,
        max_parameters,
        max_bundle_bytes,
        min_level,
        skip_phases,
        fail_under,
        no_parallel,
        quiet,
        verbosity,
    } = command
    else {
        bail!("invalid command");
    };

    let mut config = ReadymapConfig::load(&path)?;
    apply_overrides(
        &mut config,
        max_cyclomatic,
        max_length,
        max_nesting,
        max_parameters,
        max_bundle_bytes,
        min_level,
        &skip_phases,
    );

    let enabled_count = [
        config.phases.complexity,
        config.phases.security,
        config.phases.compliance,
        config.phases.performance,
    ]
    .iter()
    .filter(|&&on| on)
    .count() as u64;

    let (events_tx, events_rx) = crossbeam::channel::unbounded();
    let progress = ProgressManager::new(ProgressConfig::from_env(quiet, verbosity));
    let progress_handle = progress.attach(events_rx, enabled_count);

    let mut auditor = Auditor::new(path, config).with_events(events_tx);
    if no_parallel {
        auditor = auditor.sequential();
    }
    let report = auditor.run()?;
    let _ = progress_handle.join();

    let mut writer = create_writer(format, output)?;
    writer.write_report(&report)?;

    if let Some(threshold) = fail_under {
        if report.overall_score < threshold {
            bail!(
                "overall score {:.1} is below the required {threshold:.1}",
                report.overall_score
            );
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn apply_overrides(
    config: &mut ReadymapConfig,
    max_cyclomatic: Option<u32>,
    max_length: Option<usize>,
    max_nesting: Option<u32>,
    max_parameters: Option<usize>,
    max_bundle_bytes: Option<u64>,
    min_level: Option<readymap::cli::MinLevel>,
    skip_phases: &[String],
) {
    if let Some(value) = max_cyclomatic {
        config.complexity.max_cyclomatic = value;
    }
    if let Some(value) = max_length {
        config.complexity.max_length = value;
    }
    if let Some(value) = max_nesting {
        config.complexity.max_nesting = value;
    }
    if let Some(value) = max_parameters {
        config.complexity.max_parameters = value;
    }
    if let Some(value) = max_bundle_bytes {
        config.performance.max_bundle_bytes = value;
    }
    if let Some(level) = min_level {
        config.compliance.min_level = level.into();
    }
    for phase in skip_phases {
        match phase.as_str() {
            "complexity" => config.phases.complexity = false,
            "security" => config.phases.security = false,
            "compliance" => config.phases.compliance = false,
            "performance" => config.phases.performance = false,
            other => log::warn!("unknown phase '{other}' in --skip"),
        }
    }
}

fn init_config(force: bool) -> Result<()> {
    let path = PathBuf::from("readymap.toml");
    if path.exists() && !force {
        bail!("readymap.toml already exists (use --force to overwrite)");
    }
    std::fs::write(&path, default_config_template())?;
    println!("Wrote {}", path.display());
    Ok(())
}

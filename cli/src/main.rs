//! CLI entrypoint for knobpanel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use knobpanel_application::{
    LoadSettingsUseCase, PresetsUseCase, RunDownloadUseCase, RunGenerateError, RunGenerateUseCase,
    WriteConfigsUseCase,
};
use knobpanel_domain::{ConfigIssue, RunKind, SettingsModel};
use knobpanel_infrastructure::{
    ConfigLoader, EnvInstall, artifact_stores, install_env, presets_store,
};
use knobpanel_presentation::{
    Cli, Command, ConsoleFormatter, ConsoleLogSink, OutputConfig, PresetCommand,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting knobpanel");

    if cli.command == Command::Config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let output = OutputConfig {
        color: config.output.color,
        spinner: config.output.spinner,
    }
    .with_flags(cli.quiet, cli.no_color);
    if !output.color {
        colored::control::set_override(false);
    }

    let issues = config.validate();
    eprint!("{}", ConsoleFormatter::format_issues(&issues));
    if issues.iter().any(ConfigIssue::is_error) {
        bail!("Invalid configuration");
    }

    let workdir = config.resolve_workdir(cli.workdir.as_deref());
    let paths = config.to_artifact_paths(&workdir);
    info!("Working directory: {}", paths.workdir.display());

    if let Command::InstallEnv { force } = cli.command {
        match install_env(&paths.env_dir, force)? {
            EnvInstall::Installed(path) => println!("Created {}", path.display()),
            EnvInstall::AlreadyExists(path) => {
                println!("{} already exists (use --force to overwrite)", path.display())
            }
            EnvInstall::NoExample(path) => bail!("{} not found", path.display()),
        }
        return Ok(ExitCode::SUCCESS);
    }

    if cli.command == Command::Download {
        let runner = Arc::new(config.to_script_runner());
        let sink = Arc::new(ConsoleLogSink::new(output.spinner));
        let outcome = RunDownloadUseCase::new(runner, paths).execute(sink).await?;
        println!("{}", ConsoleFormatter::format_outcome(&outcome));
        return Ok(exit_code(outcome.success));
    }

    // === Dependency Injection ===
    let patcher = config
        .patcher
        .to_patcher()
        .context("Invalid patcher.block_marker")?;
    let stores = artifact_stores(&paths, patcher);

    let mut model = SettingsModel::with_ranges(config.to_field_ranges());
    let report = LoadSettingsUseCase::new(stores.clone()).execute(&mut model);
    eprint!("{}", ConsoleFormatter::format_load_report(&report));

    let overrides = cli.overrides.to_overrides();
    overrides.apply(&mut model);

    let writer = WriteConfigsUseCase::new(stores);

    let exit = match cli.command {
        Command::Show { json } => {
            if json {
                println!("{}", ConsoleFormatter::format_json(&model.gather()));
            } else {
                print!("{}", ConsoleFormatter::format_settings(&model, &paths));
            }
            ExitCode::SUCCESS
        }

        Command::Write => write_all(&writer, &model),

        Command::Run => {
            let runner = Arc::new(config.to_script_runner());
            let use_case = RunGenerateUseCase::new(writer, runner, paths);
            run_script(&use_case, &model, RunKind::Full, output).await?
        }

        Command::RunOne { file } => {
            let file = std::path::absolute(&file).unwrap_or(file);
            let runner = Arc::new(config.to_script_runner());
            let use_case = RunGenerateUseCase::new(writer, runner, paths);
            run_script(&use_case, &model, RunKind::SingleFile(file), output).await?
        }

        Command::Preset { action } => {
            let presets = PresetsUseCase::new(presets_store(&paths));
            match action {
                PresetCommand::List => {
                    print!("{}", ConsoleFormatter::format_presets(&presets.list()?));
                    ExitCode::SUCCESS
                }
                PresetCommand::Save { name } => {
                    presets.save(&name, &model.gather())?;
                    println!("Saved preset '{}' to {}", name, paths.presets.display());
                    ExitCode::SUCCESS
                }
                PresetCommand::Load { name, write } => {
                    let ignored = presets.apply(&name, &mut model)?;
                    if !ignored.is_empty() {
                        eprintln!("Ignored unknown preset keys: {}", ignored.join(", "));
                    }
                    // Command-line overrides still win over the preset.
                    overrides.apply(&mut model);

                    if write {
                        write_all(&writer, &model)
                    } else {
                        print!("{}", ConsoleFormatter::format_settings(&model, &paths));
                        ExitCode::SUCCESS
                    }
                }
            }
        }

        Command::InstallEnv { .. } | Command::Download | Command::Config => ExitCode::SUCCESS,
    };

    Ok(exit)
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn write_all(writer: &WriteConfigsUseCase, model: &SettingsModel) -> ExitCode {
    match writer.execute(&model.gather()) {
        Ok(summary) => {
            print!("{}", ConsoleFormatter::format_write_summary(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", ConsoleFormatter::format_write_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run_script(
    use_case: &RunGenerateUseCase,
    model: &SettingsModel,
    kind: RunKind,
    output: OutputConfig,
) -> Result<ExitCode> {
    let sink = Arc::new(ConsoleLogSink::new(output.spinner));
    let handle = match use_case.start(&model.gather(), kind, sink) {
        Ok(handle) => handle,
        Err(RunGenerateError::Write(e)) => {
            eprint!("{}", ConsoleFormatter::format_write_error(&e));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", ConsoleFormatter::format_write_summary(&handle.summary));
    let outcome = handle.wait().await;
    println!("{}", ConsoleFormatter::format_outcome(&outcome));

    Ok(exit_code(outcome.success))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

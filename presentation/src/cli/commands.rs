//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use knobpanel_domain::{
    DomainError, Field, PathSettings, ReportType, SetValue, SettingsOverrides, Toggle,
    parse_assignment, parse_provider,
};
use std::path::PathBuf;

/// CLI arguments for knobpanel
#[derive(Parser, Debug)]
#[command(name = "knobpanel")]
#[command(author, version, about = "Control panel for a report-generation pipeline")]
#[command(long_about = r#"
knobpanel keeps the settings of a report-generation pipeline in sync across
its configuration artifacts and launches the generation script.

Every run first loads the current values from the artifacts, applies the
overrides given on the command line, and (for write/run) writes every
artifact back before the script starts.

Configuration files are loaded from (in priority order):
1. KNOBPANEL_* environment variables
2. --config <path>       Explicit config file
3. ./knobpanel.toml      Project-level config
4. ~/.config/knobpanel/config.toml   Global config

Example:
  knobpanel show
  knobpanel --master 75 --disable dr write
  knobpanel --set TEMPERATURE=0.65 --set TOTAL_WORDS=2000 run
  knobpanel run-one ./inputs/brief.md
  knobpanel preset save thorough
  knobpanel download
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the artifacts and the generation script
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub workdir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show every control with its current value
    Show {
        /// Print the settings snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the settings to every artifact
    Write,

    /// Write the settings, then run the generation script
    Run,

    /// Write the settings, then run the generation script on a single input file
    RunOne {
        /// Input file handed to the script
        file: PathBuf,
    },

    /// Download and unpack the pipeline components (download_and_extract.py)
    Download,

    /// Manage named presets
    Preset {
        #[command(subcommand)]
        action: PresetCommand,
    },

    /// Create .env from .env.example
    InstallEnv {
        /// Overwrite an existing .env
        #[arg(long)]
        force: bool,
    },

    /// Show configuration file locations
    Config,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PresetCommand {
    /// List saved presets
    List,

    /// Save the current settings under a name
    Save { name: String },

    /// Apply a saved preset
    Load {
        name: String,

        /// Also write the result to every artifact
        #[arg(long)]
        write: bool,
    },
}

/// Control changes applied after the artifacts are loaded.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct OverrideArgs {
    /// Set a control: FIELD=N (position) or FIELD=0.75 (stored value)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment, global = true)]
    pub set: Vec<(Field, SetValue)>,

    /// Enable a report type or evaluation step (fpf, gptr, dr, ma, evaluation, pairwise)
    #[arg(long, value_name = "NAME", value_parser = parse_toggle, global = true)]
    pub enable: Vec<Toggle>,

    /// Disable a report type or evaluation step
    #[arg(long, value_name = "NAME", value_parser = parse_toggle, global = true)]
    pub disable: Vec<Toggle>,

    /// Master quality (0-100): sets every control proportionally within its range
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(0..=100), global = true)]
    pub master: Option<i64>,

    /// Input folder handed to the script
    #[arg(long, value_name = "DIR", global = true)]
    pub input_folder: Option<String>,

    /// Output folder handed to the script
    #[arg(long, value_name = "DIR", global = true)]
    pub output_folder: Option<String>,

    /// Instructions file handed to the script
    #[arg(long, value_name = "FILE", global = true)]
    pub instructions_file: Option<String>,

    /// Provider and model for a report type (saved with presets)
    #[arg(long, value_name = "REPORT=PROVIDER[:MODEL]", value_parser = parse_provider, global = true)]
    pub provider: Vec<(ReportType, Option<String>, Option<String>)>,
}

fn parse_toggle(s: &str) -> Result<Toggle, DomainError> {
    s.parse()
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            master: self.master,
            values: self.set.clone(),
            enable: self.enable.clone(),
            disable: self.disable.clone(),
            paths: PathSettings {
                input_folder: self.input_folder.clone(),
                output_folder: self.output_folder.clone(),
                instructions_file: self.instructions_file.clone(),
            },
            providers: self.provider.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_after_subcommand() {
        let cli = Cli::parse_from([
            "knobpanel",
            "-v",
            "write",
            "--set",
            "TEMPERATURE=0.65",
            "--disable",
            "dr",
            "--master",
            "80",
            "--provider",
            "fpf=openai:gpt-4o",
        ]);
        assert_eq!(cli.command, Command::Write);
        assert_eq!(cli.verbose, 1);

        let overrides = cli.overrides.to_overrides();
        assert_eq!(overrides.master, Some(80));
        assert_eq!(
            overrides.values,
            vec![(Field::Temperature, SetValue::Stored(0.65))]
        );
        assert_eq!(overrides.disable, vec![Toggle::Report(ReportType::Dr)]);
        assert_eq!(overrides.providers[0].0, ReportType::Fpf);
    }

    #[test]
    fn test_preset_and_run_one() {
        let cli = Cli::parse_from(["knobpanel", "preset", "load", "fast", "--write"]);
        assert_eq!(
            cli.command,
            Command::Preset {
                action: PresetCommand::Load {
                    name: "fast".into(),
                    write: true
                }
            }
        );

        let cli = Cli::parse_from(["knobpanel", "-C", "/pm", "run-one", "in/a.md"]);
        assert_eq!(cli.workdir, Some(PathBuf::from("/pm")));
        assert_eq!(
            cli.command,
            Command::RunOne {
                file: PathBuf::from("in/a.md")
            }
        );
        assert!(cli.overrides.to_overrides().is_empty());
    }

    #[test]
    fn test_download_command() {
        let cli = Cli::parse_from(["knobpanel", "-C", "/pm", "download"]);
        assert_eq!(cli.command, Command::Download);
        assert_eq!(cli.workdir, Some(PathBuf::from("/pm")));
        assert!(Cli::try_parse_from(["knobpanel", "download", "extra"]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Cli::try_parse_from(["knobpanel", "write", "--set", "VOLUME=11"]).is_err());
        assert!(Cli::try_parse_from(["knobpanel", "write", "--enable", "nope"]).is_err());
        assert!(Cli::try_parse_from(["knobpanel", "write", "--master", "101"]).is_err());
    }
}

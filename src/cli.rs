use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate, generate_to};

use crate::config::DEFAULT_ENDPOINT;
use crate::form::FormInput;

pub const ENDPOINT_ENV: &str = "HOMEPRICE_ENDPOINT";

const ENDPOINT_HELP: &str = "URL of the price-prediction service. Requests are sent as a JSON POST.";
const TIMEOUT_HELP: &str = "Give up on the prediction request after this many seconds (no limit by default).";
const INTERACTIVE_HELP: &str = "Prompt for the property details repeatedly; press Enter to keep a value, 'q' to quit.";

#[derive(Debug, Parser)]
#[command(
    name = "homeprice",
    about = "Ask a price-prediction service for a home value estimate.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, value_name = "N", default_value = "", hide_default_value = true)]
    pub bathrooms_full: String,
    #[arg(long, value_name = "N", default_value = "", hide_default_value = true)]
    pub bathrooms_half: String,
    #[arg(
        long = "bedrooms",
        value_name = "N",
        default_value = "",
        hide_default_value = true
    )]
    pub bedrooms_total: String,
    #[arg(
        long,
        value_name = "SQFT",
        default_value = "",
        hide_default_value = true
    )]
    pub living_area: String,
    #[arg(long, value_name = "URL", env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT, help = ENDPOINT_HELP)]
    pub endpoint: String,
    #[arg(long, value_name = "SECS", help = TIMEOUT_HELP)]
    pub timeout: Option<u64>,
    #[arg(short, long, help = INTERACTIVE_HELP)]
    pub interactive: bool,
    #[arg(long, help = "Show the estimate immediately instead of counting up.")]
    pub no_animation: bool,
    #[arg(long, help = "Disable progress spinner output.")]
    pub no_progress: bool,
    #[arg(long, help = "Disable coloured output.")]
    pub no_color: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity (-v info, -vv debug)."
    )]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Form values as given on the command line. Fields left out are empty.
    pub fn form(&self) -> FormInput {
        FormInput {
            bathrooms_full: self.bathrooms_full.clone(),
            bathrooms_half: self.bathrooms_half.clone(),
            bedrooms_total: self.bedrooms_total.clone(),
            living_area: self.living_area.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts, optionally installing them for the current user.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to."
        )]
        output_dir: Option<PathBuf>,
        #[arg(
            long,
            help = "Install the completion script into the default location for the selected shell."
        )]
        install: bool,
    },
}

pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Completions {
            shell,
            output_dir,
            install,
        } => generate_completions(shell, output_dir, install),
    }
}

fn generate_completions(shell: Shell, output_dir: Option<PathBuf>, install: bool) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let target_dir = if let Some(dir) = output_dir {
        Some(dir)
    } else if install {
        Some(default_install_dir(shell)?)
    } else {
        None
    };

    if let Some(dir) = target_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
        let path = generate_to(shell, &mut command, bin_name, &dir)
            .context("failed to write completion file")?;
        println!("Installed {shell:?} completions to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate(shell, &mut command, bin_name, &mut stdout);
        stdout
            .flush()
            .context("failed to flush completion output")?;
    }

    Ok(())
}

fn default_install_dir(shell: Shell) -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow!("HOME environment variable is not set; use --output-dir to specify a path")
    })?;
    let mut path = PathBuf::from(home);

    let relative = match shell {
        Shell::Bash => ".local/share/bash-completion/completions",
        Shell::Elvish => ".elvish/lib/completions",
        Shell::Fish => ".config/fish/completions",
        Shell::PowerShell => ".local/share/powershell/Scripts",
        Shell::Zsh => ".local/share/zsh/site-functions",
        other => {
            return Err(anyhow!(
                "no default install location for {other:?}; specify --output-dir"
            ));
        }
    };
    path.push(relative);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn form_fields_come_from_flags() {
        let cli = Cli::parse_from([
            "homeprice",
            "--bathrooms-full",
            "2",
            "--bathrooms-half",
            "1",
            "--bedrooms",
            "3",
            "--living-area",
            "1800",
        ]);
        let request = cli.form().to_request();
        assert_eq!(request.bathrooms_full, Some(2));
        assert_eq!(request.bathrooms_half, Some(1));
        assert_eq!(request.bedrooms_total, Some(3));
        assert_eq!(request.living_area, Some(1800.0));
    }

    #[test]
    fn omitted_fields_are_empty_and_flags_parse() {
        let cli = Cli::parse_from(["homeprice", "-i", "-vv", "--no-animation", "--timeout", "5"]);
        assert!(cli.interactive);
        assert!(cli.no_animation);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.form(), FormInput::default());
    }
}

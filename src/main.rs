use std::io::{self, Stdout};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use homeprice::cli::{self, Cli};
use homeprice::config::Settings;
use homeprice::progress::ProgressState;
use homeprice::prompt::{PromptOutcome, edit_form};
use homeprice::terminal::TerminalSink;
use homeprice::{HttpPredictionClient, ViewController, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

type TerminalView = ViewController<TerminalSink<Stdout>>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut cli = Cli::parse();

    if let Some(command) = cli.command.take() {
        cli::handle_command(command)?;
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(cli.verbose);

    let settings = Settings::from_cli(&cli).context("invalid configuration")?;
    colored::control::set_override(settings.color);
    info!(endpoint = %settings.endpoint, timeout = ?settings.timeout, "starting");

    let client = HttpPredictionClient::new(settings.endpoint.clone(), settings.timeout)
        .context("failed to set up prediction client")?;
    let sink = TerminalSink::new(
        io::stdout(),
        ProgressState::new(settings.color, settings.progress),
    );
    let mut view = ViewController::new(sink).with_count_up(settings.count_up);

    let succeeded = if cli.interactive {
        run_interactive(&mut view, &client, cli.form()).await?
    } else {
        let ok = matches!(
            view.submit(&client, &cli.form()).await,
            ViewState::Success(_)
        );
        flush_sink(&mut view)?;
        ok
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Prompt/submit rounds until the user quits. Succeeds when the last round did.
async fn run_interactive(
    view: &mut TerminalView,
    client: &HttpPredictionClient,
    mut form: homeprice::FormInput,
) -> Result<bool> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut prompt_out = io::stdout();
    view.show_empty();

    loop {
        if edit_form(&mut lines, &mut prompt_out, &mut form).await? == PromptOutcome::Quit {
            break;
        }
        view.submit(client, &form).await;
        flush_sink(view)?;
        println!();
    }

    info!(submissions = view.submissions(), "interactive session ended");
    Ok(!matches!(view.state(), ViewState::Failure(_)))
}

fn flush_sink(view: &mut TerminalView) -> Result<()> {
    view.sink_mut()
        .take_error()
        .map_or(Ok(()), Err)
        .context("failed to write to the terminal")
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("homeprice={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

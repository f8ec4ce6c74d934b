use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use tokio::io::{AsyncBufRead, Lines};

use crate::form::{Field, FormInput};

const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Outcome of one pass over the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Submit,
    Quit,
}

/// Asks for every field in turn. An empty answer keeps the current value.
pub async fn edit_form<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    form: &mut FormInput,
) -> Result<PromptOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    for field in Field::ALL {
        let current = form.get(field);
        let shown = if current.is_empty() { "-" } else { current };
        write!(
            out,
            "{} {}: ",
            field.label().bright_yellow().bold(),
            format!("[{shown}]").bright_black()
        )
        .and_then(|()| out.flush())
        .context("failed to write prompt")?;

        let Some(answer) = lines.next_line().await.context("failed to read input")? else {
            writeln!(out).context("failed to write prompt")?;
            return Ok(PromptOutcome::Quit);
        };
        let answer = answer.trim();
        if QUIT_WORDS
            .iter()
            .any(|word| answer.eq_ignore_ascii_case(word))
        {
            return Ok(PromptOutcome::Quit);
        }
        if !answer.is_empty() {
            form.set(field, answer);
        }
    }
    Ok(PromptOutcome::Submit)
}

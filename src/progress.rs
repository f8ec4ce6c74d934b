use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICKS_BRAILLE_COLORED: [&str; 8] = [
    "\x1b[1;96m⠁\x1b[0m",
    "\x1b[1;96m⠂\x1b[0m",
    "\x1b[1;96m⠄\x1b[0m",
    "\x1b[1;96m⡀\x1b[0m",
    "\x1b[1;96m⢀\x1b[0m",
    "\x1b[1;96m⠠\x1b[0m",
    "\x1b[1;96m⠐\x1b[0m",
    "\x1b[1;96m⠈\x1b[0m",
];

const SPINNER_TICKS_BRAILLE_PLAIN: [&str; 8] = ["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈"];
const SPINNER_TICKS_ASCII: &str = "|/-\\";

const LOADING_LABEL: &str = "Estimating property value";

/// Spinner factory for the loading panel. Draws on stderr.
pub struct ProgressState {
    enabled: bool,
    style: ProgressStyle,
}

impl ProgressState {
    pub fn new(use_color: bool, enabled: bool) -> Self {
        let use_ascii = is_dumb_term();
        let style = ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let style = if use_ascii {
            style.tick_chars(SPINNER_TICKS_ASCII)
        } else if use_color {
            style.tick_strings(&SPINNER_TICKS_BRAILLE_COLORED)
        } else {
            style.tick_strings(&SPINNER_TICKS_BRAILLE_PLAIN)
        };
        Self { enabled, style }
    }

    pub fn loading_spinner(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        if self.enabled {
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(15));
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(self.style.clone());
        bar.set_message(format!("{}", LOADING_LABEL.bright_white().bold()));
        if self.enabled {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        bar
    }
}

fn is_dumb_term() -> bool {
    std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb"))
}

use std::io::{self, Write};

use chrono::Local;
use colored::Colorize;
use indicatif::ProgressBar;

use crate::display::{DisplaySink, Panel, Slot};
use crate::progress::ProgressState;

const EMPTY_HINT: &str = "Enter the property details to get an estimate.";
const CLEAR_LINE: &str = "\r\x1b[2K";
const BAND_BAR_WIDTH: usize = 40;

/// Renders the view as lines of terminal output.
///
/// The price and band bar slots are redrawn in place until another slot is
/// written. The first write error is kept and reported by
/// [`TerminalSink::take_error`].
pub struct TerminalSink<W: Write> {
    out: W,
    progress: ProgressState,
    loading: Option<ProgressBar>,
    live: Option<Slot>,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    pub const fn new(out: W, progress: ProgressState) -> Self {
        Self {
            out,
            progress,
            loading: None,
            live: None,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(mut self) -> W {
        self.stop_spinner();
        self.close_live_line();
        self.out
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn line(&mut self, text: &str) {
        self.close_live_line();
        let result = writeln!(self.out, "{text}");
        self.record(result);
    }

    fn close_live_line(&mut self) {
        if self.live.take().is_some() {
            let result = writeln!(self.out);
            self.record(result);
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(bar) = self.loading.take() {
            bar.finish_and_clear();
        }
    }

    /// Writes `text` on the open line of `slot`, or opens a new one.
    fn redraw(&mut self, slot: Slot, text: &str) {
        if self.live != Some(slot) {
            self.close_live_line();
        }
        let prefix = if self.live.is_some() { CLEAR_LINE } else { "" };
        let result = write!(self.out, "{prefix}{text}").and_then(|()| self.out.flush());
        self.live = Some(slot);
        self.record(result);
    }

    fn draw_price(&mut self, text: &str) {
        let line = format!(
            "{} {}",
            format!("{:<16}", "Estimated value").bright_yellow().bold(),
            format!("${text}").bright_green().bold()
        );
        self.redraw(Slot::Price, &line);
    }

    fn draw_band_fill(&mut self, text: &str) {
        let cells = band_cells(text);
        let bar = format!(
            "{}{}",
            "█".repeat(cells).bright_green(),
            "░".repeat(BAND_BAR_WIDTH - cells).bright_black()
        );
        let line = format!(
            "{} {bar} {}",
            format!("{:<16}", "Range band").bright_yellow().bold(),
            text.bright_white()
        );
        self.redraw(Slot::BandFill, &line);
    }

    fn draw_header(&mut self) {
        self.line("");
        self.line(&format!(
            "{}",
            "===================== Price Estimate ====================="
                .bold()
                .bright_cyan()
        ));
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();
        self.line(&format!(
            "{} {}",
            format!("{:<16}", "Estimated at").bright_yellow().bold(),
            stamp.bright_white()
        ));
    }

    fn draw_section(&mut self, title: &str, body: &str, highlight: bool) {
        self.line("");
        self.line(&format!("{}", title.bold().bright_magenta()));
        for row in body.lines() {
            let styled = if highlight {
                row.bright_cyan()
            } else {
                row.bright_white()
            };
            self.line(&format!("  {styled}"));
        }
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn set_text(&mut self, slot: Slot, text: &str) {
        match slot {
            Slot::Loading => {
                self.stop_spinner();
                self.line(&format!("{}", text.bright_red().bold()));
            }
            Slot::Price => self.draw_price(text),
            Slot::RangeLow => self.line(&format!(
                "{} {}",
                format!("{:<16}", "Range low").bright_yellow().bold(),
                text.bright_white()
            )),
            Slot::BandFill => self.draw_band_fill(text),
            Slot::RangeHigh => self.line(&format!(
                "{} {}",
                format!("{:<16}", "Range high").bright_yellow().bold(),
                text.bright_white()
            )),
            Slot::Summary => self.draw_section("Summary", text, false),
            Slot::Chart => self.draw_section("Market Distribution", text, true),
        }
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        match (panel, visible) {
            (Panel::Empty, true) => self.line(&format!("{}", EMPTY_HINT.bright_black())),
            (Panel::Loading, true) => {
                self.close_live_line();
                self.stop_spinner();
                self.loading = Some(self.progress.loading_spinner());
            }
            (Panel::Loading, false) => self.stop_spinner(),
            (Panel::Result, true) => self.draw_header(),
            // Lines already printed stay in the scrollback.
            (Panel::Empty | Panel::Result, false) => {}
        }
    }
}

/// Filled cells for a percentage such as `"62.5%"`; unreadable text is empty.
fn band_cells(text: &str) -> usize {
    let percent = text
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
        .clamp(0.0, 100.0);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let cells = (percent / 100.0 * BAND_BAR_WIDTH as f64).round() as usize;
    cells.min(BAND_BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> TerminalSink<Vec<u8>> {
        colored::control::set_override(false);
        TerminalSink::new(Vec::new(), ProgressState::new(false, false))
    }

    fn output(sink: TerminalSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn price_frames_redraw_one_line() {
        let mut sink = sink();
        sink.set_visible(Panel::Result, true);
        sink.set_text(Slot::Price, "1,000");
        sink.set_text(Slot::Price, "2,000");
        sink.set_text(Slot::RangeLow, "$1,900");
        let text = output(sink);

        assert!(text.contains("Price Estimate"));
        assert!(text.contains(&format!("{CLEAR_LINE}Estimated value  $2,000\n")));
        assert!(text.contains("Range low        $1,900\n"));
    }

    #[test]
    fn band_bar_fills_in_place_between_range_lines() {
        let mut sink = sink();
        sink.set_text(Slot::RangeLow, "$427,500");
        sink.set_text(Slot::BandFill, "0%");
        sink.set_text(Slot::BandFill, "100%");
        sink.set_text(Slot::RangeHigh, "$472,500");
        let text = output(sink);

        let empty = format!("Range band       {} 0%", "░".repeat(BAND_BAR_WIDTH));
        let full = format!("Range band       {} 100%\n", "█".repeat(BAND_BAR_WIDTH));
        assert_eq!(
            text,
            format!("Range low        $427,500\n{empty}{CLEAR_LINE}{full}Range high       $472,500\n")
        );
    }

    #[test]
    fn band_cells_clamp_and_tolerate_bad_text() {
        assert_eq!(band_cells("0%"), 0);
        assert_eq!(band_cells("50%"), BAND_BAR_WIDTH / 2);
        assert_eq!(band_cells("100%"), BAND_BAR_WIDTH);
        assert_eq!(band_cells("250%"), BAND_BAR_WIDTH);
        assert_eq!(band_cells("-10%"), 0);
        assert_eq!(band_cells("wide"), 0);
    }

    #[test]
    fn failure_message_replaces_spinner() {
        let mut sink = sink();
        sink.set_visible(Panel::Loading, true);
        assert!(sink.loading.is_some());
        sink.set_text(Slot::Loading, "backend down");
        assert!(sink.loading.is_none());
        assert_eq!(output(sink), "backend down\n");
    }

    #[test]
    fn sections_are_indented() {
        let mut sink = sink();
        sink.set_text(Slot::Summary, "Bedrooms: 3\nBathrooms: 2.5");
        let text = output(sink);
        assert!(text.contains("Summary\n  Bedrooms: 3\n  Bathrooms: 2.5\n"));
    }

    #[test]
    fn empty_hint_is_printed() {
        let mut sink = sink();
        sink.set_visible(Panel::Empty, true);
        sink.set_visible(Panel::Empty, false);
        assert_eq!(output(sink), format!("{EMPTY_HINT}\n"));
    }
}

use ndarray::Array1;

const BAR_COUNT: usize = 11;
const SPREAD: f64 = 0.2;
const MIN_COLUMN_WIDTH: usize = 6;
const FILL_HIGHLIGHT: char = '█';
const FILL_MUTED: char = '░';

/// Illustrative bell-shaped bars around a predicted price.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    labels: Vec<String>,
    values: Array1<f64>,
    highlight: usize,
}

impl BarChart {
    pub fn market_distribution(price: f64) -> Self {
        let half = BAR_COUNT / 2;
        let steps = Array1::range(-5.0, 6.0, 1.0);
        let step_size = price * SPREAD / 5.0;
        let labels = steps
            .iter()
            .map(|step| format!("${:.0}k", ((price + step * step_size) / 1000.0).round()))
            .collect();
        let values = steps.mapv(|step: f64| (-(step * step) / 4.0).exp() * 100.0);
        Self {
            labels,
            values,
            highlight: half,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub const fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub const fn highlight(&self) -> usize {
        self.highlight
    }

    /// Columns are one space wider than the longest label.
    fn column_width(&self) -> usize {
        self.labels
            .iter()
            .map(|label| label.chars().count() + 1)
            .max()
            .unwrap_or(0)
            .max(MIN_COLUMN_WIDTH)
    }

    /// Draws the bars `height` rows tall with a label row underneath.
    pub fn render(&self, height: u16) -> Vec<String> {
        let width = self.column_width();
        let max = self.values.fold(0.0_f64, |acc, &value| acc.max(value));
        let scale = if max > 0.0 { f64::from(height) / max } else { 0.0 };
        let filled: Vec<f64> = self
            .values
            .iter()
            .map(|value| (value * scale).round())
            .collect();

        let mut lines = Vec::with_capacity(usize::from(height) + 1);
        for row in (1..=height).rev() {
            let threshold = f64::from(row);
            let mut line = String::with_capacity(BAR_COUNT * width);
            for (idx, cells) in filled.iter().enumerate() {
                let fill = if idx == self.highlight {
                    FILL_HIGHLIGHT
                } else {
                    FILL_MUTED
                };
                let ch = if *cells >= threshold { fill } else { ' ' };
                line.push(' ');
                line.extend(std::iter::repeat_n(ch, width - 1));
            }
            lines.push(line.trim_end().to_string());
        }

        let label_row: String = self
            .labels
            .iter()
            .map(|label| format!("{label:>width$}"))
            .collect();
        lines.push(label_row);
        lines
    }
}

/// Owns the single chart on screen.
#[derive(Debug, Default)]
pub struct ChartRenderer {
    current: Option<BarChart>,
}

impl ChartRenderer {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Drops the previous chart, then builds one for `price`.
    pub fn replace(&mut self, price: f64) -> &BarChart {
        drop(self.current.take());
        self.current.insert(BarChart::market_distribution(price))
    }

    pub const fn current(&self) -> Option<&BarChart> {
        self.current.as_ref()
    }
}

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::animation::{CountUp, FRAME_INTERVAL, animate_value};
use crate::chart::ChartRenderer;
use crate::client::PredictionClient;
use crate::display::{DisplaySink, Panel, Slot};
use crate::error::{PredictError, describe_error};
use crate::form::FormInput;
use crate::formatting::format_dollars;
use crate::model::{PredictionError, PredictionRequest, PredictionResult};

pub const DEFAULT_COUNT_UP: Duration = Duration::from_millis(1500);
pub const FAILURE_MESSAGE: &str = "Error calculating prediction. Is the backend running?";
pub const CHART_HEIGHT: u16 = 6;
/// Pause between the empty and the full confidence band bar.
pub const BAND_FILL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Empty,
    Loading,
    Success(PredictionResult),
    Failure(PredictionError),
}

impl ViewState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure(_))
    }
}

/// Drives the empty/loading/result panels of one display sink.
///
/// Every transition takes `&mut self`, so a submission cannot start while
/// another one is still waiting on the network or animating.
#[derive(Debug)]
pub struct ViewController<S> {
    sink: S,
    state: ViewState,
    chart: ChartRenderer,
    count_up: Duration,
    submissions: u64,
}

impl<S: DisplaySink> ViewController<S> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            state: ViewState::Empty,
            chart: ChartRenderer::new(),
            count_up: DEFAULT_COUNT_UP,
            submissions: 0,
        }
    }

    #[must_use]
    pub fn with_count_up(mut self, duration: Duration) -> Self {
        self.count_up = duration;
        self
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub const fn submissions(&self) -> u64 {
        self.submissions
    }

    pub fn show_empty(&mut self) {
        self.sink.set_visible(Panel::Loading, false);
        self.sink.set_visible(Panel::Result, false);
        self.sink.set_visible(Panel::Empty, true);
        self.state = ViewState::Empty;
    }

    /// Enters `Loading` and reads a fresh request from the form.
    pub fn begin(&mut self, form: &FormInput) -> PredictionRequest {
        self.submissions += 1;
        self.sink.set_visible(Panel::Empty, false);
        self.sink.set_visible(Panel::Result, false);
        self.sink.set_visible(Panel::Loading, true);
        self.state = ViewState::Loading;

        let request = form.to_request();
        debug!(submission = self.submissions, ?request, "submission started");
        request
    }

    /// Leaves `Loading` for `Success` or `Failure`.
    pub async fn complete(
        &mut self,
        request: &PredictionRequest,
        outcome: Result<PredictionResult, PredictError>,
    ) -> &ViewState {
        match outcome {
            Ok(result) => self.show_result(request, result).await,
            Err(error) => self.show_failure(&error),
        }
        &self.state
    }

    pub async fn submit<C: PredictionClient>(
        &mut self,
        client: &C,
        form: &FormInput,
    ) -> &ViewState {
        let request = self.begin(form);
        let outcome = client.predict(&request).await;
        self.complete(&request, outcome).await
    }

    async fn show_result(&mut self, request: &PredictionRequest, result: PredictionResult) {
        let price = result.predicted_price;
        debug!(submission = self.submissions, price, "prediction succeeded");
        self.state = ViewState::Success(result);
        self.sink.set_visible(Panel::Loading, false);
        self.sink.set_visible(Panel::Result, true);

        let count_up = CountUp::new(0.0, price, self.count_up);
        animate_value(&mut self.sink, Slot::Price, count_up, FRAME_INTERVAL).await;

        let band = result.band();
        self.sink.set_text(Slot::RangeLow, &format_dollars(band.low));
        self.sink.set_text(Slot::BandFill, "0%");
        if !self.count_up.is_zero() {
            sleep(BAND_FILL_DELAY).await;
        }
        self.sink.set_text(Slot::BandFill, "100%");
        self.sink.set_text(Slot::RangeHigh, &format_dollars(band.high));

        let summary = request
            .summary()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        self.sink.set_text(Slot::Summary, &summary);

        let chart = self.chart.replace(price).render(CHART_HEIGHT).join("\n");
        self.sink.set_text(Slot::Chart, &chart);
    }

    fn show_failure(&mut self, error: &PredictError) {
        warn!(
            submission = self.submissions,
            error = %describe_error(error),
            "prediction failed"
        );
        self.sink.set_text(Slot::Loading, FAILURE_MESSAGE);
        self.state = ViewState::Failure(PredictionError {
            message: FAILURE_MESSAGE.to_string(),
        });
    }
}

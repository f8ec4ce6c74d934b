use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::display::{DisplaySink, Slot};
use crate::formatting::format_currency;

/// Roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub fn ease_out_expo(progress: f64) -> f64 {
    if progress >= 1.0 {
        1.0
    } else {
        1.0 - 2_f64.powf(-10.0 * progress)
    }
}

/// Count from `start` to `end` over `duration`, eased out exponentially.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub start: f64,
    pub end: f64,
    pub duration: Duration,
}

impl CountUp {
    pub const fn new(start: f64, end: f64, duration: Duration) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, progress: f64) -> f64 {
        (self.start + (self.end - self.start) * ease_out_expo(progress)).floor()
    }
}

/// Writes the eased value into `slot` once per frame until the count-up ends.
pub async fn animate_value<S: DisplaySink>(
    sink: &mut S,
    slot: Slot,
    count_up: CountUp,
    frame: Duration,
) {
    let started = Instant::now();
    let mut frames = interval(frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        frames.tick().await;
        let progress = count_up.progress(started.elapsed());
        sink.set_text(slot, &format_currency(count_up.value_at(progress)));
        if progress >= 1.0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Panel;

    #[derive(Default)]
    struct Frames(Vec<String>);

    impl DisplaySink for Frames {
        fn set_text(&mut self, slot: Slot, text: &str) {
            assert_eq!(slot, Slot::Price);
            self.0.push(text.to_string());
        }

        fn set_visible(&mut self, _panel: Panel, _visible: bool) {}
    }

    #[test]
    fn easing_endpoints() {
        assert!(ease_out_expo(0.0).abs() < f64::EPSILON);
        assert!((ease_out_expo(1.0) - 1.0).abs() < f64::EPSILON);
        assert!(ease_out_expo(0.5) > 0.96);
    }

    #[test]
    fn progress_is_clamped() {
        let count_up = CountUp::new(0.0, 100.0, Duration::from_millis(1500));
        assert!(count_up.progress(Duration::ZERO).abs() < f64::EPSILON);
        assert!((count_up.progress(Duration::from_millis(750)) - 0.5).abs() < 1e-9);
        assert!((count_up.progress(Duration::from_secs(10)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_duration_is_complete() {
        let count_up = CountUp::new(0.0, 450_000.0, Duration::ZERO);
        assert!((count_up.progress(Duration::ZERO) - 1.0).abs() < f64::EPSILON);
        assert!((count_up.value_at(1.0) - 450_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn values_are_floored() {
        let count_up = CountUp::new(0.0, 450_000.7, Duration::from_secs(1));
        assert!((count_up.value_at(1.0) - 450_000.0).abs() < f64::EPSILON);
        assert!(count_up.value_at(0.3).fract().abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn animation_is_monotonic_and_lands_on_target() {
        let mut frames = Frames::default();
        let count_up = CountUp::new(0.0, 450_000.0, Duration::from_millis(1500));
        animate_value(&mut frames, Slot::Price, count_up, FRAME_INTERVAL).await;

        assert_eq!(frames.0.first().map(String::as_str), Some("0"));
        assert_eq!(frames.0.last().map(String::as_str), Some("450,000"));
        assert!(frames.0.len() > 10);

        let values: Vec<u64> = frames
            .0
            .iter()
            .map(|text| text.replace(',', "").parse().unwrap())
            .collect();
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_writes_one_frame() {
        let mut frames = Frames::default();
        let count_up = CountUp::new(0.0, 1_234_567.0, Duration::ZERO);
        animate_value(&mut frames, Slot::Price, count_up, FRAME_INTERVAL).await;
        assert_eq!(frames.0, vec!["1,234,567".to_string()]);
    }
}

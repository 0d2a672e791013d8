//! Round clock.

use std::time::Duration;
use tokio::time::Instant;

use crate::core::{Config, TimerMode};
use crate::ui::Ui;

/// Tracks the round deadline and drives the clock display.
///
/// In countdown mode the deadline ends the round. In elapsed mode the
/// clock counts up from the last deal or point and never ends a round on
/// its own. In unlimited mode nothing is shown.
#[derive(Debug)]
pub struct RoundTimer {
    mode: TimerMode,
    round: Duration,
    warning: Duration,
    deadline: Option<Instant>,
    since: Instant,
}

impl RoundTimer {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            mode: config.timer,
            round: config.round_duration(),
            warning: config.warning(),
            deadline: None,
            since: Instant::now(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Start a new round: fresh deadline, elapsed clock back to zero.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.since = now;
        self.deadline = match self.mode {
            TimerMode::Countdown => Some(now + self.round),
            TimerMode::Elapsed | TimerMode::Unlimited => None,
        };
    }

    /// A point was scored. Only the elapsed clock restarts; the
    /// countdown deadline stays where it is.
    pub fn scored(&mut self) {
        if self.mode == TimerMode::Elapsed {
            self.since = Instant::now();
        }
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(false)
    }

    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.since.elapsed()
    }

    /// Push the clock to the sink. `force` asks for a full redraw.
    pub fn show(&self, ui: &dyn Ui, force: bool) {
        match self.mode {
            TimerMode::Countdown => {
                let remaining = self.remaining().unwrap_or_default();
                let warn = force || remaining <= self.warning;
                ui.set_countdown(millis(remaining), warn);
            }
            TimerMode::Elapsed => ui.set_elapsed(millis(self.elapsed())),
            TimerMode::Unlimited => {}
        }
    }
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{UiEvent, UiRecorder};

    fn config(mode: TimerMode) -> Config {
        Config::default().with_timer(mode).with_round_ms(10_000)
    }

    #[test]
    fn test_timer_starts_cleared() {
        let timer = RoundTimer::new(&config(TimerMode::Countdown));
        assert!(timer.deadline().is_none());
        assert!(!timer.expired());
        assert!(timer.remaining().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_expires() {
        let mut timer = RoundTimer::new(&config(TimerMode::Countdown));
        timer.reset();
        let deadline = timer.deadline().unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(timer.remaining(), Some(Duration::from_secs(6)));

        // Scoring keeps the deadline
        timer.scored();
        assert_eq!(timer.deadline(), Some(deadline));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(timer.expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_restarts_on_point() {
        let mut timer = RoundTimer::new(&config(TimerMode::Elapsed));
        timer.reset();
        assert!(timer.deadline().is_none());

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(timer.elapsed(), Duration::from_secs(3));

        timer.scored();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_warns_near_the_end() {
        let ui = UiRecorder::new();
        let mut timer = RoundTimer::new(&config(TimerMode::Countdown));
        timer.reset();

        timer.show(&ui, false);
        tokio::time::advance(Duration::from_secs(6)).await;
        timer.show(&ui, false);
        timer.show(&ui, true);

        assert_eq!(
            ui.events(),
            vec![
                UiEvent::Countdown { millis: 10_000, warn: false },
                UiEvent::Countdown { millis: 4_000, warn: true },
                UiEvent::Countdown { millis: 4_000, warn: true },
            ]
        );
    }

    #[test]
    fn test_unlimited_shows_nothing() {
        let ui = UiRecorder::new();
        let mut timer = RoundTimer::new(&config(TimerMode::Unlimited));
        timer.reset();
        timer.show(&ui, true);
        assert!(ui.events().is_empty());
    }
}

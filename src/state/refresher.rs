use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Drives `PollTick`s while the scoreboard is in focus. At most one ticking
/// task exists at a time.
pub struct Poller {
    ticks: mpsc::Sender<UiEvent>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn new(ticks: mpsc::Sender<UiEvent>, period: Duration) -> Self {
        Self { ticks, period, task: None }
    }

    /// Tick now, then once per period. Replaces any running task.
    pub fn focus(&mut self) {
        self.blur();
        let ticks = self.ticks.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if ticks.send(UiEvent::PollTick).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn blur(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_focused(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.blur();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    const PERIOD: Duration = Duration::from_secs(5);

    #[tokio::test(start_paused = true)]
    async fn ticks_immediately_then_every_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut poller = Poller::new(tx, PERIOD);
        let start = Instant::now();

        poller.focus();
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        assert_eq!(start.elapsed(), PERIOD);
        assert!(poller.is_focused());
    }

    #[tokio::test(start_paused = true)]
    async fn blur_stops_ticking() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut poller = Poller::new(tx, PERIOD);

        poller.focus();
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        poller.blur();
        assert!(!poller.is_focused());
        assert!(timeout(PERIOD * 4, rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn refocus_never_runs_two_tickers() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut poller = Poller::new(tx, PERIOD);
        let start = Instant::now();

        poller.focus();
        poller.focus();
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        assert_eq!(start.elapsed(), PERIOD);
        assert_eq!(rx.recv().await, Some(UiEvent::PollTick));
        assert_eq!(start.elapsed(), PERIOD * 2);
    }
}

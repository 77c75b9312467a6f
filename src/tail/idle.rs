use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

/// Decides what the polling loop does when no line is available
pub trait Idle {
    fn idle(&mut self) -> ControlFlow<()>;
}

impl<F: FnMut() -> ControlFlow<()>> Idle for F {
    fn idle(&mut self) -> ControlFlow<()> {
        self()
    }
}

/// Sleeps a fixed interval between polls
///
/// With a shutdown channel the sleep ends early, and polling stops, as soon as
/// a message arrives or every sender is dropped. Without one it polls forever.
pub struct SleepIdle {
    interval: Duration,
    shutdown: Option<Receiver<()>>,
}

impl SleepIdle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            shutdown: None,
        }
    }

    pub fn with_shutdown(interval: Duration, shutdown: Receiver<()>) -> Self {
        Self {
            interval,
            shutdown: Some(shutdown),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Idle for SleepIdle {
    fn idle(&mut self) -> ControlFlow<()> {
        match self.shutdown {
            None => {
                thread::sleep(self.interval);
                ControlFlow::Continue(())
            }
            Some(ref rx) => match rx.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => ControlFlow::Continue(()),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => ControlFlow::Break(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleeps_full_interval_without_shutdown() {
        let mut idle = SleepIdle::new(Duration::from_millis(20));
        let start = Instant::now();
        assert_eq!(idle.idle(), ControlFlow::Continue(()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_shutdown_message_breaks() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut idle = SleepIdle::with_shutdown(Duration::from_secs(10), rx);

        tx.send(()).unwrap();
        let start = Instant::now();
        assert_eq!(idle.idle(), ControlFlow::Break(()));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_continues_and_dropped_sender_breaks() {
        let (tx, rx) = crossbeam_channel::bounded::<()>(1);
        let mut idle = SleepIdle::with_shutdown(Duration::from_millis(10), rx);

        assert_eq!(idle.idle(), ControlFlow::Continue(()));
        drop(tx);
        assert_eq!(idle.idle(), ControlFlow::Break(()));
    }
}

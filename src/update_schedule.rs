use std::{
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

pub type ScheduledTask = Box<dyn Fn() + Send + 'static>;

pub trait Scheduler: Send + Sync {
    /// Runs `task` every `period` until the returned handle is cancelled or
    /// dropped. The first run happens one period from now.
    fn schedule_repeating(&self, period: Duration, task: ScheduledTask)
        -> Result<TimerHandle, String>;
}

/// Cancels its timer when `cancel` is called or when dropped.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// One background thread per timer. The thread parks on a stop channel
/// so cancellation takes effect without waiting out the period.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_repeating(
        &self,
        period: Duration,
        task: ScheduledTask,
    ) -> Result<TimerHandle, String> {
        let (stop_sender, stop_receiver) = mpsc::channel::<()>();
        thread::Builder::new()
            .name("update-check-timer".to_string())
            .spawn(move || loop {
                match stop_receiver.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => task(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(|error| format!("Failed to spawn update check timer: {error}"))?;

        Ok(TimerHandle::new(move || {
            let _ = stop_sender.send(());
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[test]
    fn timer_handle_runs_cancel_once_on_drop() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cancelled);
        {
            let _handle = TimerHandle::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn timer_handle_cancel_does_not_run_twice() {
        let cancelled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&cancelled);
        let handle = TimerHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();
        assert_eq!(cancelled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn thread_scheduler_repeats_until_cancelled() {
        let (tick_sender, tick_receiver) = mpsc::channel();
        let handle = ThreadScheduler
            .schedule_repeating(
                Duration::from_millis(5),
                Box::new(move || {
                    let _ = tick_sender.send(());
                }),
            )
            .expect("schedule timer");

        for _ in 0..3 {
            tick_receiver
                .recv_timeout(Duration::from_secs(5))
                .expect("timer should tick");
        }
        handle.cancel();

        // Drain a tick that may have raced the cancel, then expect silence.
        while tick_receiver
            .recv_timeout(Duration::from_millis(50))
            .is_ok()
        {}
        assert!(tick_receiver
            .recv_timeout(Duration::from_millis(50))
            .is_err());
    }
}

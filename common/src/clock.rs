use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

pub trait ClockSubscription: Send {
    fn start(&mut self, interval_ms: u64);
    fn stop(&mut self);
}

#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    running: Arc<AtomicBool>,
    interval_ms: Arc<AtomicU64>,
    starts: Arc<AtomicU64>,
    stops: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::Relaxed)
    }

    pub fn start_count(&self) -> u64 {
        self.starts.load(Ordering::Relaxed)
    }

    pub fn stop_count(&self) -> u64 {
        self.stops.load(Ordering::Relaxed)
    }
}

impl ClockSubscription for ManualClock {
    fn start(&mut self, interval_ms: u64) {
        self.interval_ms.store(interval_ms, Ordering::Relaxed);
        self.running.store(true, Ordering::Relaxed);
        self.starts.fetch_add(1, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        self.stops.fetch_add(1, Ordering::Relaxed);
    }
}

//! Thread-safe handle over one counter
//!
//! The tick thread writes, UI threads read. Every operation takes the lock,
//! so a reset never lands between the phase and count updates of a tick.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::RepetitionCounter;
use crate::types::{CountEvent, DistanceSample, Phase, ReasonCode, Thresholds, TickOutput};

/// Cloneable handle, all clones share one counter
#[derive(Debug, Clone)]
pub struct SharedCounter {
    inner: Arc<Mutex<RepetitionCounter>>,
}

impl SharedCounter {
    pub fn new(thresholds: Thresholds) -> Self {
        Self::from_counter(RepetitionCounter::new(thresholds))
    }

    pub fn from_counter(counter: RepetitionCounter) -> Self {
        Self {
            inner: Arc::new(Mutex::new(counter)),
        }
    }

    pub fn observe(&self, sample: DistanceSample) -> Option<CountEvent> {
        self.inner.lock().observe(sample)
    }

    pub fn observe_with_reason(&self, sample: DistanceSample) -> (Option<CountEvent>, ReasonCode) {
        self.inner.lock().observe_with_reason(sample)
    }

    /// Observe and capture the resulting state under the same lock
    pub fn observe_tick(&self, sample: DistanceSample) -> TickOutput {
        let mut counter = self.inner.lock();
        let (_, reason) = counter.observe_with_reason(sample);
        TickOutput::new(
            sample.distance_meters,
            counter.current_phase(),
            counter.current_count(),
            reason,
        )
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn current_count(&self) -> u64 {
        self.inner.lock().current_count()
    }

    pub fn current_phase(&self) -> Phase {
        self.inner.lock().current_phase()
    }

    /// Count and phase read under one lock
    pub fn snapshot(&self) -> (u64, Phase) {
        let counter = self.inner.lock();
        (counter.current_count(), counter.current_phase())
    }

    pub fn thresholds(&self) -> Thresholds {
        self.inner.lock().thresholds()
    }
}

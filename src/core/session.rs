//! Session controller: lifecycle around one counter
//!
//! IDLE → RUNNING ⇄ PAUSED → IDLE. A fresh counter is built on start and
//! dropped on stop. Count and phase changes fan out on a broadcast channel.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use crate::core::{SetRecord, SharedCounter, WorkoutLog};
use crate::error::{Error, Result};
use crate::types::{
    BridgeEvent, Phase, SessionState, SetSummary, Thresholds, TickOutput, TrackerEvent,
};
use crate::DEFAULT_EVENT_CAPACITY;

/// Per-set bookkeeping, exists only while a session is active
#[derive(Debug)]
struct ActiveSession {
    counter: SharedCounter,
    set_number: u32,
    target_reps: Option<u32>,
    started_at: DateTime<Utc>,
    paused_since: Option<DateTime<Utc>>,
    paused_total: Duration,
    ticks: u64,
    lost_ticks: u64,
}

impl ActiveSession {
    fn state(&self) -> SessionState {
        if self.paused_since.is_some() {
            SessionState::Paused
        } else {
            SessionState::Running
        }
    }
}

/// Status as reported to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub state: SessionState,
    pub set_number: u32,
    pub count: u64,
    pub phase: Phase,
    pub is_going_down: bool,
    pub target_reps: Option<u32>,
    pub ticks: u64,
    pub lost_ticks: u64,
    pub near_threshold: f64,
    pub far_threshold: f64,
}

/// Owns the session lifecycle and the counter of the current set
#[derive(Debug)]
pub struct SessionController {
    thresholds: Thresholds,
    default_target_reps: Option<u32>,
    active: Option<ActiveSession>,
    log: WorkoutLog,
    events: broadcast::Sender<BridgeEvent>,
}

impl SessionController {
    /// Create an idle controller
    pub fn new(thresholds: Thresholds) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        Self {
            thresholds,
            default_target_reps: None,
            active: None,
            log: WorkoutLog::new(),
            events,
        }
    }

    /// Target used when `start` is given none
    pub fn with_target_reps(mut self, target_reps: Option<u32>) -> Self {
        self.default_target_reps = target_reps;
        self
    }

    /// Resize the event channel; drops existing subscribers
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        self.events = events;
        self
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Begin a set with a fresh counter, return its set number
    pub fn start(&mut self, target_reps: Option<u32>) -> Result<u32> {
        if self.active.is_some() {
            return Err(Error::SessionAlreadyActive);
        }

        let set_number = self.log.next_set_number();
        let target_reps = target_reps.or(self.default_target_reps);
        self.active = Some(ActiveSession {
            counter: SharedCounter::new(self.thresholds),
            set_number,
            target_reps,
            started_at: Utc::now(),
            paused_since: None,
            paused_total: Duration::zero(),
            ticks: 0,
            lost_ticks: 0,
        });

        info!(
            set_number,
            near = self.thresholds.near(),
            far = self.thresholds.far(),
            "Pushup session started"
        );
        let _ = self.events.send(BridgeEvent::SessionStarted { set_number });
        Ok(set_number)
    }

    /// Stop feeding ticks, keep the counter
    pub fn pause(&mut self) -> Result<SessionStatus> {
        let from = self.state();
        match self.active.as_mut() {
            Some(active) if active.paused_since.is_none() => {
                active.paused_since = Some(Utc::now());
                info!(set_number = active.set_number, "Pushup session paused");
            }
            _ => return Err(Error::InvalidTransition { from, action: "pause" }),
        }
        self.status()
    }

    pub fn resume(&mut self) -> Result<SessionStatus> {
        let from = self.state();
        match self.active.as_mut() {
            Some(active) if active.paused_since.is_some() => {
                if let Some(since) = active.paused_since.take() {
                    active.paused_total = active.paused_total + (Utc::now() - since);
                }
                info!(set_number = active.set_number, "Pushup session resumed");
            }
            _ => return Err(Error::InvalidTransition { from, action: "resume" }),
        }
        self.status()
    }

    /// End the set, drop its counter and record the summary
    pub fn stop(&mut self) -> Result<SetSummary> {
        let active = self.active.take().ok_or(Error::NoSession)?;
        let ended_at = Utc::now();

        let mut paused = active.paused_total;
        if let Some(since) = active.paused_since {
            paused = paused + (ended_at - since);
        }
        let active_seconds = ((ended_at - active.started_at) - paused).num_seconds().max(0) as u64;

        let summary = self.log.record(SetRecord {
            reps: active.counter.current_count(),
            active_seconds,
            target_reps: active.target_reps,
            started_at: active.started_at,
            ended_at,
            ticks: active.ticks,
            lost_ticks: active.lost_ticks,
        });

        info!(
            set_number = summary.set_number,
            reps = summary.reps,
            duration_seconds = summary.duration_seconds,
            personal_best = summary.is_personal_best,
            "Pushup session stopped"
        );
        let _ = self.events.send(BridgeEvent::SessionStopped {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Ticks
    // -------------------------------------------------------------------------

    /// Feed one tracker tick; `Ok(None)` when the tick was dropped while paused.
    /// Fatal faults end the session even while paused.
    pub fn handle(&mut self, event: TrackerEvent) -> Result<Option<TickOutput>> {
        if self.active.is_none() {
            return Err(Error::NoSession);
        }

        if let Some(reason) = event.fatal_reason() {
            warn!(%reason, "Tracker fault, ending session");
            let _ = self.events.send(BridgeEvent::TrackingFault { reason });
            self.stop()?;
            return Err(Error::TrackingUnavailable { reason });
        }

        let active = self.active.as_mut().ok_or(Error::NoSession)?;
        if active.paused_since.is_some() {
            trace!("Tick dropped while paused");
            return Ok(None);
        }

        let sample = event.to_sample();
        active.ticks += 1;
        if sample.distance_meters.is_none() {
            active.lost_ticks += 1;
        }

        let output = active.counter.observe_tick(sample);
        trace!(distance = ?output.distance, reason = output.reason.code(), "Tick");

        if output.reason.is_transition() {
            debug!(phase = %output.phase, distance = ?output.distance, "Phase changed");
            let _ = self.events.send(BridgeEvent::phase_change(output.phase));
        }
        if output.counted {
            info!(count = output.count, "Pushup counted");
            let _ = self.events.send(BridgeEvent::Count {
                count: output.count,
            });
        }

        Ok(Some(output))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Reset the current set's counter to UP / 0
    pub fn reset(&mut self) -> Result<SessionStatus> {
        let active = self.active.as_ref().ok_or(Error::NoSession)?;
        active.counter.reset();
        info!(set_number = active.set_number, "Pushup counter reset");
        let _ = self.events.send(BridgeEvent::Count { count: 0 });
        self.status()
    }

    pub fn current_count(&self) -> Result<u64> {
        self.counter()
            .map(|c| c.current_count())
            .ok_or(Error::NoSession)
    }

    pub fn current_phase(&self) -> Result<Phase> {
        self.counter()
            .map(|c| c.current_phase())
            .ok_or(Error::NoSession)
    }

    pub fn status(&self) -> Result<SessionStatus> {
        let active = self.active.as_ref().ok_or(Error::NoSession)?;
        let (count, phase) = active.counter.snapshot();
        Ok(SessionStatus {
            state: active.state(),
            set_number: active.set_number,
            count,
            phase,
            is_going_down: phase.is_going_down(),
            target_reps: active.target_reps,
            ticks: active.ticks,
            lost_ticks: active.lost_ticks,
            near_threshold: self.thresholds.near(),
            far_threshold: self.thresholds.far(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.active
            .as_ref()
            .map(ActiveSession::state)
            .unwrap_or(SessionState::Idle)
    }

    /// Handle for polling from another thread, `None` when idle
    pub fn counter(&self) -> Option<SharedCounter> {
        self.active.as_ref().map(|a| a.counter.clone())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    pub fn log(&self) -> &WorkoutLog {
        &self.log
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

// =============================================================================
// TESTS
// =============================================================================

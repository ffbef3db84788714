//! Repetition counter: two-threshold hysteresis over face distance
//!
//! State transitions:
//! - UP → DOWN: d < near
//! - DOWN → UP: d > far, count += 1
//! - anything else (in band, unavailable, out of range): no change

use crate::types::{CountEvent, DistanceSample, Phase, ReasonCode, Thresholds};

/// Push-up state machine, one per session
#[derive(Debug, Clone)]
pub struct RepetitionCounter {
    /// Current half-cycle
    phase: Phase,
    /// Completed repetitions since construction or last reset
    count: u64,
    /// Fixed at construction
    thresholds: Thresholds,
}

impl RepetitionCounter {
    /// Create a counter in `Up` with count 0
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            phase: Phase::Up,
            count: 0,
            thresholds,
        }
    }

    /// Feed one tick, return an event when a repetition completes
    pub fn observe(&mut self, sample: DistanceSample) -> Option<CountEvent> {
        self.observe_with_reason(sample).0
    }

    /// Same as `observe`, also reporting why
    pub fn observe_with_reason(&mut self, sample: DistanceSample) -> (Option<CountEvent>, ReasonCode) {
        let d = match sample.distance_meters {
            None => return (None, ReasonCode::R001_SAMPLE_UNAVAILABLE),
            Some(d) if !d.is_finite() || d < 0.0 => return (None, ReasonCode::R001_SAMPLE_REJECTED),
            Some(d) => d,
        };

        match self.phase {
            Phase::Up => {
                if d < self.thresholds.near() {
                    // Counted on the way back up
                    self.phase = Phase::Down;
                    (None, ReasonCode::R005_TRANSITION_TO_DOWN)
                } else {
                    (None, ReasonCode::R002_HOLDING_UP)
                }
            }

            Phase::Down => {
                if d > self.thresholds.far() {
                    self.phase = Phase::Up;
                    self.count += 1;
                    (
                        Some(CountEvent { new_count: self.count }),
                        ReasonCode::R005_REPETITION_COUNTED,
                    )
                } else {
                    (None, ReasonCode::R002_HOLDING_DOWN)
                }
            }
        }
    }

    /// Back to `Up` with count 0
    pub fn reset(&mut self) {
        self.phase = Phase::Up;
        self.count = 0;
    }

    pub fn current_count(&self) -> u64 {
        self.count
    }

    pub fn current_phase(&self) -> Phase {
        self.phase
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> RepetitionCounter {
        RepetitionCounter::new(Thresholds::new(0.25, 0.35).unwrap())
    }

    fn feed(counter: &mut RepetitionCounter, samples: &[Option<f64>]) -> Vec<Option<CountEvent>> {
        samples
            .iter()
            .map(|s| counter.observe(DistanceSample::from(*s)))
            .collect()
    }

    #[test]
    fn test_initial_state_is_up() {
        let c = counter();
        assert_eq!(c.current_phase(), Phase::Up);
        assert_eq!(c.current_count(), 0);
    }

    #[test]
    fn test_single_repetition() {
        let mut c = counter();
        let events = feed(&mut c, &[Some(0.5), Some(0.20), Some(0.18), Some(0.40)]);
        assert_eq!(events, vec![None, None, None, Some(CountEvent { new_count: 1 })]);
        assert_eq!(c.current_count(), 1);
        assert_eq!(c.current_phase(), Phase::Up);
    }

    #[test]
    fn test_band_samples_change_nothing() {
        let mut c = counter();
        let events = feed(&mut c, &[Some(0.30), Some(0.30), Some(0.30)]);
        assert!(events.iter().all(Option::is_none));
        assert_eq!(c.current_count(), 0);
        assert_eq!(c.current_phase(), Phase::Up);
    }

    #[test]
    fn test_tracking_gap_keeps_repetition() {
        let mut c = counter();
        assert_eq!(c.observe(DistanceSample::at(0.10)), None);
        assert_eq!(c.current_phase(), Phase::Down);
        assert_eq!(c.observe(DistanceSample::unavailable()), None);
        assert_eq!(c.current_phase(), Phase::Down);
        assert_eq!(
            c.observe(DistanceSample::at(0.45)),
            Some(CountEvent { new_count: 1 })
        );
    }

    #[test]
    fn test_two_cycles() {
        let mut c = counter();
        let events = feed(&mut c, &[Some(0.10), Some(0.40), Some(0.10), Some(0.40)]);
        assert_eq!(
            events,
            vec![
                None,
                Some(CountEvent { new_count: 1 }),
                None,
                Some(CountEvent { new_count: 2 }),
            ]
        );
    }

    #[test]
    fn test_no_double_count_above_far() {
        let mut c = counter();
        feed(&mut c, &[Some(0.10), Some(0.40)]);
        let events = feed(&mut c, &[Some(0.50), Some(0.60), Some(0.45)]);
        assert!(events.iter().all(Option::is_none));
        assert_eq!(c.current_count(), 1);
    }

    #[test]
    fn test_boundaries_are_strict() {
        let mut c = counter();
        // Exactly near does not start a repetition
        let (_, reason) = c.observe_with_reason(DistanceSample::at(0.25));
        assert_eq!(reason, ReasonCode::R002_HOLDING_UP);
        c.observe(DistanceSample::at(0.24));
        // Exactly far does not complete it
        let (event, reason) = c.observe_with_reason(DistanceSample::at(0.35));
        assert_eq!(event, None);
        assert_eq!(reason, ReasonCode::R002_HOLDING_DOWN);
    }

    #[test]
    fn test_out_of_range_values_ignored() {
        let mut c = counter();
        for bad in [-0.1, f64::NAN, f64::NEG_INFINITY] {
            let (event, reason) = c.observe_with_reason(DistanceSample::at(bad));
            assert_eq!(event, None);
            assert_eq!(reason, ReasonCode::R001_SAMPLE_REJECTED);
            assert_eq!(c.current_phase(), Phase::Up);
        }
        c.observe(DistanceSample::at(0.1));
        let (event, _) = c.observe_with_reason(DistanceSample::at(f64::INFINITY));
        assert_eq!(event, None);
        assert_eq!(c.current_phase(), Phase::Down);
    }

    #[test]
    fn test_reset_from_down() {
        let mut c = counter();
        feed(&mut c, &[Some(0.10), Some(0.40), Some(0.10)]);
        assert_eq!(c.current_phase(), Phase::Down);
        c.reset();
        assert_eq!(c.current_phase(), Phase::Up);
        assert_eq!(c.current_count(), 0);
        // A far sample right after reset does not count
        assert_eq!(c.observe(DistanceSample::at(0.40)), None);
    }

    #[test]
    fn test_narrow_band() {
        let mut c = RepetitionCounter::new(Thresholds::new(0.35, 0.40).unwrap());
        let events = feed(&mut c, &[Some(0.30), Some(0.38), Some(0.41)]);
        assert_eq!(events[2], Some(CountEvent { new_count: 1 }));
    }
}

//! The breathing session state machine.
//!
//! All timing-driven behavior lives here as a pure `tick()` transition so the
//! core can be exercised without real time passing. Rendering consumes the
//! `Snapshot` projection and never reaches into the session directly.

/// Headline shown before the first start.
pub const IDLE_PROMPT: &str = "Press s to begin";
/// Headline shown once all cycles have finished.
pub const DONE_MESSAGE: &str = "Done! Press s to repeat";

/// One named step of a breathing cycle (e.g. Inhale for 4 seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    /// Length of the phase in whole seconds, always >= 1.
    pub duration: u16,
    /// Granularity of the progress bar for this phase. One segment fills per
    /// elapsed second, so this normally equals `duration`.
    pub segments: u16,
}

impl Phase {
    /// Build a phase whose bar granularity matches its duration.
    /// Zero durations are coerced to one second.
    pub fn new(name: impl Into<String>, duration: u16) -> Self {
        let duration = duration.max(1);
        Self {
            name: name.into(),
            duration,
            segments: duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    /// Terminal display state after the last cycle; behaves like `Idle` for
    /// restart purposes but carries a distinct headline.
    Completed,
}

/// State of a single progress-bar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Filled,
    Empty,
    /// Slot beyond the current phase's granularity; not drawn at all.
    Hidden,
}

/// Ephemeral display projection, recomputed on every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub headline: String,
    pub phase_name: String,
    pub seconds_left: u16,
    /// One entry per slot of the fixed-capacity bar (capacity = max segment
    /// count across all phases).
    pub segments: Vec<Segment>,
    pub cycle_label: String,
    pub is_running: bool,
    pub cycles_editable: bool,
}

/// Finite-state machine for one breathing session, advanced once per second
/// by `tick()` while running.
#[derive(Debug)]
pub struct Session {
    phases: Vec<Phase>,
    phase_index: usize,
    time_left: u16,
    current_cycle: u32,
    total_cycles: u32,
    status: Status,
}

impl Session {
    pub fn new(phases: Vec<Phase>, total_cycles: u32) -> Self {
        assert!(!phases.is_empty(), "a session needs at least one phase");
        let time_left = phases[0].duration;
        Self {
            phases,
            phase_index: 0,
            time_left,
            current_cycle: 1,
            total_cycles: total_cycles.max(1),
            status: Status::Idle,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    pub fn current_phase(&self) -> &Phase {
        &self.phases[self.phase_index]
    }

    pub fn time_left(&self) -> u16 {
        self.time_left
    }

    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    /// Begin (or restart) the session. No-op while already running, so a
    /// repeated start can never attach a second tick consumer.
    pub fn start(&mut self) {
        match self.status {
            Status::Running => {}
            Status::Idle => self.status = Status::Running,
            Status::Completed => {
                self.rewind();
                self.status = Status::Running;
            }
        }
    }

    /// Stop and return to the idle baseline. Valid from any state.
    pub fn reset(&mut self) {
        self.rewind();
        self.status = Status::Idle;
    }

    /// Reconfigure the cycle count, clamped to >= 1. The cycle input is
    /// disabled while running, but clamp defensively and ignore the call in
    /// that state anyway.
    pub fn set_total_cycles(&mut self, n: u32) {
        if self.status == Status::Running {
            return;
        }
        self.total_cycles = n.max(1);
        self.current_cycle = 1;
    }

    /// Advance the session by one elapsed second. Ignored unless running.
    ///
    /// When the countdown reaches zero the phase boundary is crossed within
    /// this same call; the session never spends a tick idling at zero.
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.advance_phase();
        }
    }

    fn advance_phase(&mut self) {
        self.phase_index += 1;
        if self.phase_index < self.phases.len() {
            self.time_left = self.phases[self.phase_index].duration;
            return;
        }

        // One full traversal of all phases is done.
        self.phase_index = 0;
        if self.current_cycle >= self.total_cycles {
            // Last cycle finished: land on an idle-equivalent baseline with
            // the done headline.
            self.rewind();
            self.status = Status::Completed;
            return;
        }
        self.current_cycle += 1;
        self.time_left = self.phases[0].duration;
    }

    fn rewind(&mut self) {
        self.phase_index = 0;
        self.time_left = self.phases[0].duration;
        self.current_cycle = 1;
    }

    /// Project the current state into everything the renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        let phase = self.current_phase();
        let capacity = self
            .phases
            .iter()
            .map(|p| p.segments)
            .max()
            .unwrap_or_default();
        // time_left never exceeds the duration, but the segment count is
        // allowed to differ from it, so clamp to the phase's own granularity.
        let filled = phase.segments.saturating_sub(self.time_left);

        let segments = (0..capacity)
            .map(|slot| {
                if slot >= phase.segments {
                    Segment::Hidden
                } else if slot < filled {
                    Segment::Filled
                } else {
                    Segment::Empty
                }
            })
            .collect();

        let headline = match self.status {
            Status::Idle => IDLE_PROMPT.to_string(),
            Status::Running => phase.name.clone(),
            Status::Completed => DONE_MESSAGE.to_string(),
        };

        Snapshot {
            headline,
            phase_name: phase.name.clone(),
            seconds_left: self.time_left,
            segments,
            cycle_label: format!("Cycle {} / {}", self.current_cycle, self.total_cycles),
            is_running: self.status == Status::Running,
            cycles_editable: self.status != Status::Running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relaxing() -> Vec<Phase> {
        vec![
            Phase::new("Inhale", 4),
            Phase::new("Hold", 7),
            Phase::new("Exhale", 8),
        ]
    }

    fn ticks(session: &mut Session, n: u32) {
        for _ in 0..n {
            session.tick();
        }
    }

    fn filled_count(snapshot: &Snapshot) -> usize {
        snapshot
            .segments
            .iter()
            .filter(|s| **s == Segment::Filled)
            .count()
    }

    #[test]
    fn test_new_starts_idle_at_first_phase() {
        let session = Session::new(relaxing(), 3);

        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.current_phase().name, "Inhale");
        assert_eq!(session.time_left(), 4);
        assert_eq!(session.current_cycle(), 1);
        assert_eq!(session.total_cycles(), 3);
        assert!(!session.is_running());
    }

    #[test]
    fn test_new_clamps_zero_cycles() {
        let session = Session::new(relaxing(), 0);
        assert_eq!(session.total_cycles(), 1);
    }

    #[test]
    fn test_phase_new_clamps_zero_duration() {
        let phase = Phase::new("Hold", 0);
        assert_eq!(phase.duration, 1);
        assert_eq!(phase.segments, 1);
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut session = Session::new(relaxing(), 1);

        session.tick();

        assert_eq!(session.time_left(), 4);
        assert_eq!(session.status(), Status::Idle);
    }

    #[test]
    fn test_mid_phase_tick_decrements_by_one() {
        let mut session = Session::new(relaxing(), 1);
        session.start();

        session.tick();

        assert_eq!(session.time_left(), 3);
        assert_eq!(session.current_phase().name, "Inhale");
        assert_eq!(session.current_cycle(), 1);
    }

    #[test]
    fn test_phase_entry_has_full_duration_and_empty_bar() {
        let mut session = Session::new(relaxing(), 1);
        session.start();

        // Cross into Hold.
        ticks(&mut session, 4);

        assert_eq!(session.current_phase().name, "Hold");
        assert_eq!(session.time_left(), 7);
        assert_eq!(filled_count(&session.snapshot()), 0);
    }

    #[test]
    fn test_boundary_is_crossed_within_the_same_tick() {
        let mut session = Session::new(relaxing(), 1);
        session.start();
        ticks(&mut session, 3);
        assert_eq!(session.time_left(), 1);

        // The tick that hits zero must already land in the next phase; no
        // tick is spent sitting at zero.
        session.tick();

        assert_eq!(session.current_phase().name, "Hold");
        assert_eq!(session.time_left(), 7);
    }

    #[test]
    fn test_single_cycle_runs_to_completion() {
        let mut session = Session::new(relaxing(), 1);
        session.start();

        ticks(&mut session, 4);
        assert_eq!(session.current_phase().name, "Hold");
        assert_eq!(session.time_left(), 7);

        ticks(&mut session, 7);
        assert_eq!(session.current_phase().name, "Exhale");
        assert_eq!(session.time_left(), 8);

        ticks(&mut session, 8);
        assert_eq!(session.status(), Status::Completed);
        assert!(!session.is_running());
    }

    #[test]
    fn test_cycle_completion_rolls_into_next_cycle() {
        let mut session = Session::new(relaxing(), 2);
        session.start();

        // Full first cycle: 4 + 7 + 8.
        ticks(&mut session, 19);

        assert!(session.is_running());
        assert_eq!(session.current_cycle(), 2);
        assert_eq!(session.current_phase().name, "Inhale");
        assert_eq!(session.time_left(), 4);
    }

    #[test]
    fn test_completion_restores_idle_baseline() {
        let mut session = Session::new(relaxing(), 2);
        session.start();

        ticks(&mut session, 38);

        assert_eq!(session.status(), Status::Completed);
        assert_eq!(session.current_cycle(), 1);
        assert_eq!(session.current_phase().name, "Inhale");
        assert_eq!(session.time_left(), 4);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.headline, DONE_MESSAGE);
        assert!(snapshot.cycles_editable);
        assert!(!snapshot.is_running);
        assert_eq!(filled_count(&snapshot), 0);
    }

    #[test]
    fn test_ticks_after_completion_are_ignored() {
        let mut session = Session::new(relaxing(), 1);
        session.start();
        ticks(&mut session, 19);
        assert_eq!(session.status(), Status::Completed);

        ticks(&mut session, 5);

        assert_eq!(session.status(), Status::Completed);
        assert_eq!(session.time_left(), 4);
    }

    #[test]
    fn test_restart_after_completion() {
        let mut session = Session::new(relaxing(), 1);
        session.start();
        ticks(&mut session, 19);
        assert_eq!(session.status(), Status::Completed);

        session.start();

        assert!(session.is_running());
        assert_eq!(session.current_cycle(), 1);
        assert_eq!(session.time_left(), 4);

        session.tick();
        assert_eq!(session.time_left(), 3);
    }

    #[test]
    fn test_double_start_is_a_noop() {
        let mut session = Session::new(relaxing(), 1);
        session.start();
        session.tick();
        assert_eq!(session.time_left(), 3);

        session.start();

        assert_eq!(session.time_left(), 3);
        assert_eq!(session.current_phase().name, "Inhale");
    }

    #[test]
    fn test_reset_midway_restores_baseline() {
        let mut session = Session::new(relaxing(), 3);
        session.start();
        ticks(&mut session, 25);

        session.reset();

        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.current_phase().name, "Inhale");
        assert_eq!(session.time_left(), 4);
        assert_eq!(session.current_cycle(), 1);
    }

    #[test]
    fn test_reset_while_idle_is_harmless() {
        let mut session = Session::new(relaxing(), 1);

        session.reset();

        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.time_left(), 4);
    }

    #[test]
    fn test_set_total_cycles_clamps_to_one() {
        let mut session = Session::new(relaxing(), 4);

        session.set_total_cycles(0);

        assert_eq!(session.total_cycles(), 1);
        assert_eq!(session.current_cycle(), 1);
    }

    #[test]
    fn test_set_total_cycles_ignored_while_running() {
        let mut session = Session::new(relaxing(), 2);
        session.start();
        session.tick();

        session.set_total_cycles(9);

        assert_eq!(session.total_cycles(), 2);
    }

    #[test]
    fn test_set_total_cycles_takes_effect_for_next_start() {
        let mut session = Session::new(relaxing(), 1);

        session.set_total_cycles(2);
        session.start();
        ticks(&mut session, 19);

        assert!(session.is_running());
        assert_eq!(session.current_cycle(), 2);
    }

    #[test]
    fn test_snapshot_fills_left_to_right() {
        let mut session = Session::new(relaxing(), 1);
        session.start();
        session.tick();
        session.tick();

        let snapshot = session.snapshot();

        assert_eq!(snapshot.segments[0], Segment::Filled);
        assert_eq!(snapshot.segments[1], Segment::Filled);
        assert_eq!(snapshot.segments[2], Segment::Empty);
        assert_eq!(snapshot.segments[3], Segment::Empty);
    }

    #[test]
    fn test_snapshot_hides_slots_beyond_current_phase() {
        let session = Session::new(relaxing(), 1);

        let snapshot = session.snapshot();

        // Capacity is sized to Exhale's 8 segments; Inhale only shows 4.
        assert_eq!(snapshot.segments.len(), 8);
        assert!(snapshot.segments[4..].iter().all(|s| *s == Segment::Hidden));
    }

    #[test]
    fn test_filled_is_clamped_when_segments_differ_from_duration() {
        let coarse = Phase {
            name: "Inhale".to_string(),
            duration: 6,
            segments: 3,
        };
        let mut session = Session::new(vec![coarse], 1);
        session.start();

        for _ in 0..5 {
            session.tick();
            let snapshot = session.snapshot();
            assert!(filled_count(&snapshot) <= 3);
        }
    }

    #[test]
    fn test_headline_follows_status() {
        let mut session = Session::new(relaxing(), 1);
        assert_eq!(session.snapshot().headline, IDLE_PROMPT);

        session.start();
        assert_eq!(session.snapshot().headline, "Inhale");

        ticks(&mut session, 19);
        assert_eq!(session.snapshot().headline, DONE_MESSAGE);
    }

    #[test]
    fn test_cycle_label_format() {
        let mut session = Session::new(relaxing(), 3);
        session.start();
        ticks(&mut session, 19);

        assert_eq!(session.snapshot().cycle_label, "Cycle 2 / 3");
    }

    #[test]
    fn test_cycles_editable_only_while_not_running() {
        let mut session = Session::new(relaxing(), 1);
        assert!(session.snapshot().cycles_editable);

        session.start();
        assert!(!session.snapshot().cycles_editable);

        session.reset();
        assert!(session.snapshot().cycles_editable);
    }
}

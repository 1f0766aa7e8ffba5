//! Timer state record and the phase state machine

use chrono::NaiveDate;
use serde::Serialize;

use super::{Phase, Snapshot, Theme, ThemePreference};

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer is paused; nothing changed
    Idle,
    /// One second elapsed and time remains
    Counting,
    /// The countdown reached zero and the phase must complete
    Expired,
}

/// What a phase completion produced.
///
/// `next` is a request: the caller applies `switch_mode(next)` after the
/// completion delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub finished: Phase,
    pub next: Phase,
    pub title: &'static str,
    pub message: &'static str,
}

/// Mutable session state owned by the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub completed_focus_sessions: u32,
    pub total_focus_minutes_today: u32,
    pub task_label: String,
    pub theme_preference: ThemePreference,
    /// Calendar day `total_focus_minutes_today` belongs to
    pub day: NaiveDate,
}

impl TimerState {
    /// Create a paused focus session with zeroed counters
    pub fn new(today: NaiveDate) -> Self {
        Self {
            phase: Phase::Focus,
            remaining_seconds: Phase::Focus.duration_seconds(),
            running: false,
            completed_focus_sessions: 0,
            total_focus_minutes_today: 0,
            task_label: String::new(),
            theme_preference: ThemePreference::Auto,
            day: today,
        }
    }

    /// Rebuild state from a snapshot, resetting the daily minutes when the
    /// snapshot was taken on another day.
    ///
    /// The session count is lifetime, not daily, and survives the rollover.
    pub fn restore(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let same_day = snapshot.last_saved_date == Some(today);
        Self {
            completed_focus_sessions: snapshot.completed_focus_sessions,
            total_focus_minutes_today: if same_day { snapshot.total_focus_minutes_today } else { 0 },
            task_label: snapshot.task_label.clone(),
            theme_preference: snapshot.theme_preference,
            ..Self::new(today)
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            completed_focus_sessions: self.completed_focus_sessions,
            total_focus_minutes_today: self.total_focus_minutes_today,
            task_label: self.task_label.clone(),
            theme_preference: self.theme_preference,
            last_saved_date: Some(self.day),
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        self.phase.duration_seconds()
    }

    /// Returns false when already running or when nothing is left to count
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Returns false when already paused
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Counting
        }
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.duration_seconds();
    }

    /// End the current phase early, with the same accounting as a timeout
    pub fn skip(&mut self, today: NaiveDate) -> Completion {
        self.running = false;
        self.complete(today)
    }

    pub fn complete(&mut self, today: NaiveDate) -> Completion {
        self.running = false;

        let finished = self.phase;
        if finished == Phase::Focus {
            self.roll_over(today);
            self.completed_focus_sessions += 1;
            self.total_focus_minutes_today += Phase::Focus.duration_minutes();
        }

        Completion {
            finished,
            next: finished.next(self.completed_focus_sessions),
            title: finished.completion_title(),
            message: finished.completion_message(),
        }
    }

    /// Returns false when `target` is already the active phase
    pub fn switch_mode(&mut self, target: Phase) -> bool {
        if target == self.phase {
            return false;
        }
        self.running = false;
        self.phase = target;
        self.remaining_seconds = target.duration_seconds();
        true
    }

    pub fn edit_task(&mut self, label: impl Into<String>) {
        self.task_label = label.into();
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme_preference = self.theme_preference.next();
        self.theme_preference
    }

    /// Zero the daily minutes once the calendar day has moved on
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if today == self.day {
            return false;
        }
        self.day = today;
        self.total_focus_minutes_today = 0;
        true
    }

    /// Remaining time as `MM:SS`; minutes are not capped at 59
    pub fn formatted_remaining(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// Elapsed fraction of the current phase, from 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let total = self.duration_seconds();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_seconds);
        elapsed as f64 / total as f64
    }

    pub fn view(&self, system_theme: Theme) -> TimerView {
        let formatted_remaining = self.formatted_remaining();
        TimerView {
            phase: self.phase,
            label: self.phase.label(),
            document_title: format!("{} - {}", formatted_remaining, self.phase.label()),
            formatted_remaining,
            remaining_seconds: self.remaining_seconds,
            duration_seconds: self.duration_seconds(),
            progress: self.progress(),
            running: self.running,
            accent: self.phase.accent(),
            gradient: self.phase.gradient(),
            completed_focus_sessions: self.completed_focus_sessions,
            total_focus_minutes_today: self.total_focus_minutes_today,
            task_label: self.task_label.clone(),
            theme_preference: self.theme_preference,
            theme: self.theme_preference.resolve(system_theme),
        }
    }
}

/// Derived values the view layer renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub phase: Phase,
    pub label: &'static str,
    pub formatted_remaining: String,
    pub document_title: String,
    pub remaining_seconds: u32,
    pub duration_seconds: u32,
    pub progress: f64,
    pub running: bool,
    pub accent: &'static str,
    pub gradient: &'static str,
    pub completed_focus_sessions: u32,
    pub total_focus_minutes_today: u32,
    pub task_label: String,
    pub theme_preference: ThemePreference,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    fn run_out(state: &mut TimerState) -> Completion {
        assert!(state.start());
        loop {
            match state.tick() {
                TickOutcome::Counting => {}
                TickOutcome::Expired => return state.complete(today()),
                TickOutcome::Idle => panic!("timer stopped while counting"),
            }
        }
    }

    #[test]
    fn starts_paused_in_focus() {
        let state = TimerState::new(today());
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1500);
        assert!(!state.running);
        assert_eq!(state.formatted_remaining(), "25:00");
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut state = TimerState::new(today());
        assert!(state.start());
        let running = state.clone();
        assert!(!state.start());
        assert_eq!(state, running);

        assert!(state.pause());
        let paused = state.clone();
        assert!(!state.pause());
        assert_eq!(state, paused);
    }

    #[test]
    fn tick_only_counts_while_running() {
        let mut state = TimerState::new(today());
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.remaining_seconds, 1500);

        state.start();
        assert_eq!(state.tick(), TickOutcome::Counting);
        assert_eq!(state.remaining_seconds, 1499);
        assert_eq!(state.formatted_remaining(), "24:59");
    }

    #[test]
    fn full_focus_countdown_completes() {
        let mut state = TimerState::new(today());
        let completion = run_out(&mut state);

        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 0);
        assert_eq!(state.completed_focus_sessions, 1);
        assert_eq!(state.total_focus_minutes_today, 25);
        assert_eq!(completion.finished, Phase::Focus);
        assert_eq!(completion.next, Phase::ShortBreak);
        assert_eq!(completion.message, "Great work! Time for a break.");

        assert!(state.switch_mode(completion.next));
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.remaining_seconds, 300);
    }

    #[test]
    fn skip_counts_like_a_full_countdown() {
        let mut state = TimerState::new(today());
        state.start();
        let completion = state.skip(today());

        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.completed_focus_sessions, 1);
        assert_eq!(state.total_focus_minutes_today, 25);
        assert_eq!(completion.next, Phase::ShortBreak);
    }

    #[test]
    fn break_completion_does_not_count() {
        let mut state = TimerState::new(today());
        state.switch_mode(Phase::LongBreak);
        let completion = state.skip(today());
        assert_eq!(state.completed_focus_sessions, 0);
        assert_eq!(state.total_focus_minutes_today, 0);
        assert_eq!(completion.next, Phase::Focus);
        assert_eq!(completion.title, "Long break over");
    }

    #[test]
    fn completing_n_focus_sessions_accumulates() {
        let mut state = TimerState::new(today());
        let mut next_phases = Vec::new();
        for _ in 0..8 {
            let completion = state.skip(today());
            next_phases.push(completion.next);
            state.switch_mode(completion.next);
            let back = state.skip(today());
            assert_eq!(back.next, Phase::Focus);
            state.switch_mode(Phase::Focus);
        }

        assert_eq!(state.completed_focus_sessions, 8);
        assert_eq!(state.total_focus_minutes_today, 200);
        assert_eq!(
            next_phases,
            [
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut state = TimerState::new(today());
        state.start();
        for _ in 0..700 {
            state.tick();
        }
        assert_eq!(state.remaining_seconds, 800);

        state.reset();
        assert!(!state.running);
        assert_eq!(state.phase, Phase::Focus);
        assert_eq!(state.remaining_seconds, 1500);

        let before = state.clone();
        state.reset();
        assert_eq!(state, before);
    }

    #[test]
    fn switching_to_active_phase_is_noop() {
        let mut state = TimerState::new(today());
        state.start();
        state.tick();
        assert!(!state.switch_mode(Phase::Focus));
        assert!(state.running);
        assert_eq!(state.remaining_seconds, 1499);
    }

    #[test]
    fn switching_loads_full_duration_and_pauses() {
        let mut state = TimerState::new(today());
        for phase in [Phase::LongBreak, Phase::ShortBreak, Phase::Focus] {
            state.start();
            state.tick();
            assert!(state.switch_mode(phase));
            assert!(!state.running);
            assert_eq!(state.remaining_seconds, phase.duration_seconds());
            assert!(state.remaining_seconds <= state.duration_seconds());
        }
    }

    #[test]
    fn cannot_start_an_exhausted_countdown() {
        let mut state = TimerState::new(today());
        run_out(&mut state);
        assert!(!state.start());
        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn theme_toggles_through_three_states() {
        let mut state = TimerState::new(today());
        assert_eq!(state.toggle_theme(), ThemePreference::Light);
        assert_eq!(state.toggle_theme(), ThemePreference::Dark);
        assert_eq!(state.toggle_theme(), ThemePreference::Auto);
    }

    #[test]
    fn snapshot_round_trip_same_day() {
        let mut state = TimerState::new(today());
        state.skip(today());
        state.skip(today());
        state.edit_task("draft chapter 3");
        state.toggle_theme();

        let restored = TimerState::restore(&state.snapshot(), today());
        assert_eq!(restored.completed_focus_sessions, 2);
        assert_eq!(restored.total_focus_minutes_today, 50);
        assert_eq!(restored.task_label, "draft chapter 3");
        assert_eq!(restored.theme_preference, ThemePreference::Light);
        assert_eq!(restored.phase, Phase::Focus);
        assert!(!restored.running);
    }

    // The session count is intentionally lifetime-scoped: only the minutes
    // reset on a new day.
    #[test]
    fn restore_on_new_day_keeps_session_count() {
        let snapshot = Snapshot {
            completed_focus_sessions: 6,
            total_focus_minutes_today: 150,
            task_label: String::new(),
            theme_preference: ThemePreference::Auto,
            last_saved_date: today().pred_opt(),
        };

        let restored = TimerState::restore(&snapshot, today());
        assert_eq!(restored.total_focus_minutes_today, 0);
        assert_eq!(restored.completed_focus_sessions, 6);
        assert_eq!(restored.day, today());
    }

    #[test]
    fn restore_without_date_resets_minutes() {
        let snapshot = Snapshot {
            total_focus_minutes_today: 40,
            ..Snapshot::default()
        };
        assert_eq!(TimerState::restore(&snapshot, today()).total_focus_minutes_today, 0);
    }

    #[test]
    fn completion_after_midnight_rolls_minutes_over() {
        let mut state = TimerState::new(today());
        state.skip(today());
        assert_eq!(state.total_focus_minutes_today, 25);

        let tomorrow = today().succ_opt().unwrap();
        state.switch_mode(Phase::Focus);
        state.skip(tomorrow);
        assert_eq!(state.total_focus_minutes_today, 25);
        assert_eq!(state.completed_focus_sessions, 2);
        assert_eq!(state.day, tomorrow);
    }

    #[test]
    fn formats_unbounded_minutes() {
        let mut state = TimerState::new(today());
        state.remaining_seconds = 6005;
        assert_eq!(state.formatted_remaining(), "100:05");
        state.remaining_seconds = 9;
        assert_eq!(state.formatted_remaining(), "00:09");
    }

    #[test]
    fn view_reflects_phase_tables() {
        let mut state = TimerState::new(today());
        state.switch_mode(Phase::ShortBreak);
        state.start();
        for _ in 0..75 {
            state.tick();
        }

        let view = state.view(Theme::Dark);
        assert_eq!(view.label, "Short Break");
        assert_eq!(view.accent, "#3498db");
        assert_eq!(view.formatted_remaining, "03:45");
        assert_eq!(view.document_title, "03:45 - Short Break");
        assert!((view.progress - 0.25).abs() < f64::EPSILON);
        assert_eq!(view.theme, Theme::Dark);
    }
}

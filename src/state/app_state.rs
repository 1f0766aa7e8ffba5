//! Session controller: owns the timer state and its background tasks

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use chrono::{Local, NaiveDate};
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, trace, warn};

use super::{
    Completion, Phase, SessionEvent, Shortcut, Theme, TickOutcome, TimerState, TimerView,
};
use crate::{
    services::SnapshotStore,
    tasks::{countdown_task, mode_switch_task},
};

/// Path the completion tone is served from
pub const TONE_URL: &str = "/api/tone.wav";

/// Knobs for the session controller
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Theme `Auto` resolves to
    pub system_theme: Theme,
    /// Advertise the completion tone in completion events
    pub tone_enabled: bool,
    /// Pause between a completion and the switch to the next phase
    pub completion_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            system_theme: Theme::Light,
            tone_enabled: true,
            completion_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug)]
struct PendingSwitch {
    id: u64,
    target: Phase,
    handle: JoinHandle<()>,
}

/// Everything guarded by the controller lock
#[derive(Debug)]
struct Session {
    timer: TimerState,
    /// Bumped on every start; ticks from an older countdown are ignored
    generation: u64,
    countdown: Option<JoinHandle<()>>,
    switch_seq: u64,
    pending_switch: Option<PendingSwitch>,
}

impl Session {
    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }

    fn cancel_pending_switch(&mut self) -> Option<Phase> {
        self.pending_switch.take().map(|pending| {
            pending.handle.abort();
            pending.target
        })
    }
}

/// The single session controller of the process
#[derive(Debug)]
pub struct AppState {
    session: Mutex<Session>,
    store: Arc<dyn SnapshotStore>,
    pub options: ControllerOptions,
    pub start_time: Instant,
    /// Channel for view-layer notifications
    pub event_tx: broadcast::Sender<SessionEvent>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl AppState {
    /// Create the controller, restoring whatever the store holds
    pub fn new(store: Arc<dyn SnapshotStore>, options: ControllerOptions) -> Self {
        Self::restore(store, options, today())
    }

    /// Restore against an explicit calendar day.
    ///
    /// An unreadable snapshot is logged and replaced by defaults.
    pub fn restore(store: Arc<dyn SnapshotStore>, options: ControllerOptions, today: NaiveDate) -> Self {
        let timer = match store.load() {
            Ok(Some(snapshot)) => {
                let timer = TimerState::restore(&snapshot, today);
                info!(
                    "Restored session: {} focus sessions, {} minutes today",
                    timer.completed_focus_sessions, timer.total_focus_minutes_today
                );
                timer
            }
            Ok(None) => {
                info!("No saved session, starting fresh");
                TimerState::new(today)
            }
            Err(e) => {
                warn!("Ignoring unreadable session snapshot: {}", e);
                TimerState::new(today)
            }
        };

        let (event_tx, _) = broadcast::channel(100);

        Self {
            session: Mutex::new(Session {
                timer,
                generation: 0,
                countdown: None,
                switch_seq: 0,
                pending_switch: None,
            }),
            store,
            options,
            start_time: Instant::now(),
            event_tx,
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| {
            warn!("Session lock was poisoned, recovering");
            e.into_inner()
        })
    }

    fn publish(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("No event subscribers");
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(&session.timer.snapshot()) {
            warn!("Failed to persist session: {}", e);
        }
    }

    /// Publish the current view and release the lock
    fn publish_view(&self, session: MutexGuard<'_, Session>) -> TimerView {
        let view = session.timer.view(self.options.system_theme);
        drop(session);
        self.publish(SessionEvent::State(view.clone()));
        view
    }

    pub fn view(&self) -> TimerView {
        self.session().timer.view(self.options.system_theme)
    }

    /// Copy of the raw timer state
    pub fn timer(&self) -> TimerState {
        self.session().timer.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn has_pending_switch(&self) -> bool {
        self.session().pending_switch.is_some()
    }

    /// Begin counting down; false if already running
    pub fn start(self: &Arc<Self>) -> bool {
        let mut session = self.session();
        if !session.timer.start() {
            debug!("Start ignored, timer already running or exhausted");
            return false;
        }

        session.generation += 1;
        let generation = session.generation;
        session.stop_countdown();
        session.countdown = Some(tokio::spawn(countdown_task(Arc::clone(self), generation)));

        info!("Timer started: {} at {}", session.timer.phase, session.timer.formatted_remaining());
        self.publish_view(session);
        true
    }

    /// Stop counting down; false if already paused
    pub fn pause(&self) -> bool {
        let mut session = self.session();
        if !session.timer.pause() {
            debug!("Pause ignored, timer not running");
            return false;
        }
        session.stop_countdown();

        info!("Timer paused at {}", session.timer.formatted_remaining());
        self.publish_view(session);
        true
    }

    pub fn toggle(self: &Arc<Self>) -> bool {
        let running = self.session().timer.running;
        if running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Apply one second from the countdown with the given generation.
    ///
    /// Returns false once that countdown should stop.
    pub fn tick(self: &Arc<Self>, generation: u64) -> bool {
        let mut session = self.session();
        if session.generation != generation {
            trace!("Stale tick from countdown {}", generation);
            return false;
        }

        match session.timer.tick() {
            TickOutcome::Idle => false,
            TickOutcome::Counting => {
                trace!("Tick: {}", session.timer.formatted_remaining());
                self.publish_view(session);
                true
            }
            TickOutcome::Expired => {
                // Dropping our own handle detaches it; the task returns right after
                session.countdown.take();
                let completion = session.timer.complete(today());
                self.finish_phase(session, completion);
                false
            }
        }
    }

    pub fn reset(&self) {
        let mut session = self.session();
        session.stop_countdown();
        session.timer.reset();

        info!("Timer reset to {}", session.timer.formatted_remaining());
        self.publish_view(session);
    }

    /// End the current phase now, with the same accounting as a timeout
    pub fn skip(self: &Arc<Self>) -> Completion {
        let mut session = self.session();
        session.stop_countdown();
        let completion = session.timer.skip(today());

        info!("Skipped {}", completion.finished);
        self.finish_phase(session, completion)
    }

    fn finish_phase(self: &Arc<Self>, mut session: MutexGuard<'_, Session>, completion: Completion) -> Completion {
        self.schedule_switch(&mut session, completion.next);
        self.persist(&session);

        info!(
            "{} complete ({} focus sessions, {} minutes today), next: {}",
            completion.finished,
            session.timer.completed_focus_sessions,
            session.timer.total_focus_minutes_today,
            completion.next
        );

        let view = session.timer.view(self.options.system_theme);
        drop(session);

        self.publish(SessionEvent::Completed {
            title: completion.title.to_string(),
            message: completion.message.to_string(),
            finished: completion.finished,
            next: completion.next,
            tone_url: self.options.tone_enabled.then(|| TONE_URL.to_string()),
        });
        self.publish(SessionEvent::State(view));
        completion
    }

    /// Request the switch to `target` after the completion delay.
    ///
    /// At most one switch is ever pending; a newer request replaces it.
    fn schedule_switch(self: &Arc<Self>, session: &mut Session, target: Phase) {
        if let Some(previous) = session.cancel_pending_switch() {
            debug!("Replacing pending switch to {}", previous);
        }

        session.switch_seq += 1;
        let id = session.switch_seq;
        let handle = tokio::spawn(mode_switch_task(
            Arc::clone(self),
            id,
            self.options.completion_delay,
        ));
        session.pending_switch = Some(PendingSwitch { id, target, handle });
    }

    /// Called by the deferred switch task once its delay elapsed
    pub fn apply_scheduled_switch(&self, id: u64) {
        let mut session = self.session();
        let target = match session.pending_switch.take() {
            Some(pending) if pending.id == id => pending.target,
            other => {
                debug!("Scheduled switch {} was superseded", id);
                session.pending_switch = other;
                return;
            }
        };

        self.apply_switch(session, target);
    }

    /// Move to `target`; false if it is already the active phase.
    ///
    /// An explicit switch supersedes a pending automatic one.
    pub fn switch_mode(&self, target: Phase) -> bool {
        let mut session = self.session();
        if session.timer.phase == target {
            debug!("Already in {}", target);
            return false;
        }

        if let Some(pending) = session.cancel_pending_switch() {
            debug!("Cancelled pending switch to {}", pending);
        }
        self.apply_switch(session, target)
    }

    fn apply_switch(&self, mut session: MutexGuard<'_, Session>, target: Phase) -> bool {
        if !session.timer.switch_mode(target) {
            return false;
        }
        session.stop_countdown();

        info!("Switched to {}", target);
        self.publish(SessionEvent::mode_switched(target));
        self.publish_view(session);
        true
    }

    pub fn edit_task(&self, label: impl Into<String>) {
        let mut session = self.session();
        session.timer.edit_task(label);
        self.persist(&session);

        info!("Task label set to {:?}", session.timer.task_label);
        self.publish_view(session);
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut session = self.session();
        let preference = session.timer.toggle_theme();
        let theme = preference.resolve(self.options.system_theme);
        self.persist(&session);

        info!("Theme preference now {}", preference.as_str());
        self.publish(SessionEvent::ThemeChanged { preference, theme });
        self.publish_view(session);
        theme
    }

    /// Run the command bound to a keyboard shortcut.
    ///
    /// Returns the matched shortcut and whether the state changed.
    pub fn shortcut(self: &Arc<Self>, code: &str, input_focused: bool) -> (Option<Shortcut>, bool) {
        let shortcut = Shortcut::from_key(code, input_focused);
        let changed = match shortcut {
            Some(Shortcut::ToggleRunning) => self.toggle(),
            Some(Shortcut::Reset) => {
                self.reset();
                true
            }
            Some(Shortcut::Skip) => {
                self.skip();
                true
            }
            Some(Shortcut::EditTask) => false,
            None => {
                debug!("No shortcut for {} (input focused: {})", code, input_focused);
                false
            }
        };
        (shortcut, changed)
    }

    /// Stop all background work and write a final snapshot
    pub fn shutdown(&self) {
        let mut session = self.session();
        session.stop_countdown();
        session.cancel_pending_switch();
        session.timer.pause();
        self.persist(&session);
        info!("Session saved");
    }

    /// Server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

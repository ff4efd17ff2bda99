use crate::domain::{Task, TaskId, TaskStatus};
use crate::remote::AuthState;
use crate::store::{StoreError, TaskDraft, TaskStore};
use crate::timer::{FocusTimer, Tick};
use tracing::debug;

/// A discrete user action on the board
#[derive(Debug, Clone)]
pub enum UserAction {
    Add(TaskDraft),
    /// Assign a task to a column. Dropping onto In Progress routes through
    /// Start, so entering that column always (re)starts the timer.
    Move { id: TaskId, to: TaskStatus },
    Start(TaskId),
    CompleteActive,
    Delete(TaskId),
    ToggleTimer,
    EnterFocus,
    ExitFocus,
}

/// Everything the session reacts to, consumed through one dispatch point:
/// user actions, one-second ticks, and collaborator pushes.
#[derive(Debug, Clone)]
pub enum Event {
    Action(UserAction),
    Tick,
    /// Full current collection pushed by the document collaborator
    TasksSnapshot(Vec<Task>),
    /// Auth subscription update from the identity collaborator
    AuthChanged(AuthState),
}

/// Signals surfaced to the shell after handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The countdown ran to zero; fired exactly once per run
    TimerFinished { task_id: Option<TaskId> },
}

/// Session controller: composes the task store and the focus timer,
/// tracks which task is active, and owns the exclusive focus-mode flag.
///
/// `active_task` holds an id only; the task itself lives in the store.
/// `focus_mode` is meaningful only while a task is active and is forced
/// off whenever the active task goes away.
pub struct Session<S: TaskStore> {
    store: S,
    timer: FocusTimer,
    active_task: Option<TaskId>,
    focus_mode: bool,
}

impl<S: TaskStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            timer: FocusTimer::new(),
            active_task: None,
            focus_mode: false,
        }
    }

    /// Single dispatch point. Each event is applied in full before the
    /// caller can hand over the next one; store mutation, timer reset, and
    /// view-state clearing are never interleaved with another action.
    pub fn handle(&mut self, event: Event) -> Result<Option<Signal>, StoreError> {
        match event {
            Event::Action(action) => self.handle_action(action).map(|_| None),
            Event::Tick => Ok(self.tick()),
            Event::TasksSnapshot(tasks) => {
                self.absorb_snapshot(tasks);
                Ok(None)
            }
            Event::AuthChanged(state) => {
                self.auth_changed(state);
                Ok(None)
            }
        }
    }

    fn handle_action(&mut self, action: UserAction) -> Result<(), StoreError> {
        match action {
            UserAction::Add(draft) => self.store.add_task(&draft).map(|_| ()),
            UserAction::Move { id, to } => self.move_task(&id, to),
            UserAction::Start(id) => self.start_task(&id),
            UserAction::CompleteActive => self.complete_active(),
            UserAction::Delete(id) => self.delete_task(&id),
            UserAction::ToggleTimer => {
                self.timer.toggle();
                Ok(())
            }
            UserAction::EnterFocus => {
                self.enter_focus();
                Ok(())
            }
            UserAction::ExitFocus => {
                self.exit_focus();
                Ok(())
            }
        }
    }

    /// Make a task the active one and (re)start the countdown from its
    /// estimate. Moves it into In Progress first if it isn't there yet.
    pub fn start_task(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(task) = self.store.task(id) else {
            return Ok(());
        };
        let duration = task.estimate_seconds();
        let needs_move = task.status != TaskStatus::InProgress;

        let result = if needs_move {
            self.store.move_task(id, TaskStatus::InProgress)
        } else {
            Ok(())
        };

        // Activate and start regardless of whether persisting the move
        // succeeded; the in-memory state is authoritative
        self.active_task = Some(id.to_string());
        self.timer.start(duration);
        debug!(task = id, duration, "started task");
        result
    }

    /// Assign a task to a column. In Progress routes through start; any
    /// other column is a plain move that leaves the timer alone.
    pub fn move_task(&mut self, id: &str, to: TaskStatus) -> Result<(), StoreError> {
        if to == TaskStatus::InProgress {
            self.start_task(id)
        } else {
            self.store.move_task(id, to)
        }
    }

    /// Complete the active task, crediting the timer's elapsed seconds.
    /// No-op without an active task. The clearing sequence runs even when
    /// persistence fails; the error surfaces afterwards.
    pub fn complete_active(&mut self) -> Result<(), StoreError> {
        let Some(id) = self.active_task.take() else {
            return Ok(());
        };
        let result = self.store.complete_task(&id, self.timer.time_spent());
        self.timer.reset();
        self.focus_mode = false;
        debug!(task = %id, "completed active task");
        result
    }

    /// Delete a task; deleting the active one also clears the timer and
    /// leaves focus mode.
    pub fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        let result = self.store.delete_task(id);
        if self.active_task.as_deref() == Some(id) {
            self.clear_active();
        }
        result
    }

    /// Enter the exclusive focus view. Only effective with an active task.
    /// A paused countdown resumes; the duration is never restarted.
    pub fn enter_focus(&mut self) {
        if self.active_task.is_none() {
            return;
        }
        self.focus_mode = true;
        if !self.timer.is_running() {
            self.timer.resume();
        }
    }

    /// Leave the focus view. The timer keeps whatever state it had.
    pub fn exit_focus(&mut self) {
        self.focus_mode = false;
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Option<Signal> {
        match self.timer.tick() {
            Tick::Finished => Some(Signal::TimerFinished {
                task_id: self.active_task.clone(),
            }),
            Tick::Advanced | Tick::Idle => None,
        }
    }

    /// Absorb a collection snapshot, then reconcile: if the active task
    /// vanished remotely, the timer and focus view go with it.
    fn absorb_snapshot(&mut self, tasks: Vec<Task>) {
        self.store.sync_snapshot(tasks);
        if let Some(id) = self.active_task.clone() {
            if self.store.task(&id).is_none() {
                debug!(task = %id, "active task disappeared from snapshot");
                self.clear_active();
            }
        }
    }

    /// Auth updates: signing out ends the working session; the store swap
    /// itself is the owner's concern.
    fn auth_changed(&mut self, state: AuthState) {
        if state == AuthState::SignedOut {
            self.clear_active();
        }
    }

    fn clear_active(&mut self) {
        self.active_task = None;
        self.timer.reset();
        self.focus_mode = false;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.active_task.as_deref()
    }

    /// The active task, if it still exists in the store
    pub fn active_task(&self) -> Option<&Task> {
        self.active_task.as_deref().and_then(|id| self.store.task(id))
    }

    pub fn focus_mode(&self) -> bool {
        self.focus_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use pretty_assertions::assert_eq;

    fn session() -> Session<LocalStore> {
        Session::new(LocalStore::in_memory())
    }

    fn add(session: &mut Session<LocalStore>, name: &str, minutes: &str) -> TaskId {
        session
            .handle(Event::Action(UserAction::Add(TaskDraft::new(
                name,
                minutes,
                "2026-08-05",
            ))))
            .unwrap();
        session.store().tasks().last().unwrap().id.clone()
    }

    #[test]
    fn test_write_report_scenario() {
        let mut session = session();
        let id = add(&mut session, "Write report", "25");

        // Lands in Week
        assert_eq!(
            session.store().task(&id).unwrap().status,
            TaskStatus::Week
        );

        // Start: moves to In Progress, timer shows 25:00 running
        session
            .handle(Event::Action(UserAction::Start(id.clone())))
            .unwrap();
        assert_eq!(
            session.store().task(&id).unwrap().status,
            TaskStatus::InProgress
        );
        assert_eq!(session.active_task_id(), Some(id.as_str()));
        assert!(session.timer().is_running());
        assert_eq!(session.timer().clock(), "25:00");

        // 300 ticks later the clock reads 20:00
        for _ in 0..300 {
            session.handle(Event::Tick).unwrap();
        }
        assert_eq!(session.timer().clock(), "20:00");

        // Complete: Done, five minutes credited, session state cleared
        session
            .handle(Event::Action(UserAction::CompleteActive))
            .unwrap();
        let task = session.store().task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed);
        assert_eq!(task.time_spent, 5);
        assert_eq!(session.active_task_id(), None);
        assert!(!session.focus_mode());
        assert_eq!(session.timer().time_left(), 0);
    }

    #[test]
    fn test_drop_into_in_progress_restarts_timer() {
        let mut session = session();
        let id = add(&mut session, "Task", "25");

        session
            .handle(Event::Action(UserAction::Start(id.clone())))
            .unwrap();
        for _ in 0..60 {
            session.handle(Event::Tick).unwrap();
        }
        assert_eq!(session.timer().time_spent(), 60);

        // Dropping onto In Progress again goes through start: fresh countdown
        session
            .handle(Event::Action(UserAction::Move {
                id: id.clone(),
                to: TaskStatus::InProgress,
            }))
            .unwrap();
        assert_eq!(session.timer().time_left(), 1500);
        assert_eq!(session.timer().time_spent(), 0);
        assert!(session.timer().is_running());
    }

    #[test]
    fn test_plain_move_leaves_timer_alone() {
        let mut session = session();
        let active = add(&mut session, "Active", "25");
        let other = add(&mut session, "Other", "10");

        session
            .handle(Event::Action(UserAction::Start(active.clone())))
            .unwrap();
        for _ in 0..10 {
            session.handle(Event::Tick).unwrap();
        }

        session
            .handle(Event::Action(UserAction::Move {
                id: other.clone(),
                to: TaskStatus::Today,
            }))
            .unwrap();

        assert_eq!(session.store().task(&other).unwrap().status, TaskStatus::Today);
        assert_eq!(session.timer().time_spent(), 10);
        assert_eq!(session.active_task_id(), Some(active.as_str()));
    }

    #[test]
    fn test_start_missing_task_is_noop() {
        let mut session = session();
        session
            .handle(Event::Action(UserAction::Start("ghost".into())))
            .unwrap();
        assert_eq!(session.active_task_id(), None);
        assert!(!session.timer().is_running());
    }

    #[test]
    fn test_complete_without_active_is_noop() {
        let mut session = session();
        add(&mut session, "Task", "25");
        session
            .handle(Event::Action(UserAction::CompleteActive))
            .unwrap();
        assert_eq!(session.store().stats().completed, 0);
    }

    #[test]
    fn test_delete_non_active_keeps_session_state() {
        let mut session = session();
        let active = add(&mut session, "Active", "25");
        let other = add(&mut session, "Other", "10");

        session
            .handle(Event::Action(UserAction::Start(active.clone())))
            .unwrap();
        session
            .handle(Event::Action(UserAction::Delete(other.clone())))
            .unwrap();

        assert!(session.store().task(&other).is_none());
        assert_eq!(session.active_task_id(), Some(active.as_str()));
        assert!(session.timer().is_running());
    }

    #[test]
    fn test_delete_active_clears_timer_and_focus() {
        let mut session = session();
        let active = add(&mut session, "Active", "25");

        session
            .handle(Event::Action(UserAction::Start(active.clone())))
            .unwrap();
        session.handle(Event::Action(UserAction::EnterFocus)).unwrap();
        assert!(session.focus_mode());

        session
            .handle(Event::Action(UserAction::Delete(active.clone())))
            .unwrap();

        assert_eq!(session.active_task_id(), None);
        assert!(!session.focus_mode());
        assert!(!session.timer().is_running());
        assert_eq!(session.timer().time_left(), 0);
    }

    #[test]
    fn test_focus_mode_requires_active_task() {
        let mut session = session();
        session.handle(Event::Action(UserAction::EnterFocus)).unwrap();
        assert!(!session.focus_mode());
    }

    #[test]
    fn test_enter_focus_resumes_paused_countdown() {
        let mut session = session();
        let id = add(&mut session, "Task", "25");

        session
            .handle(Event::Action(UserAction::Start(id)))
            .unwrap();
        for _ in 0..1200 {
            session.handle(Event::Tick).unwrap();
        }
        session
            .handle(Event::Action(UserAction::ToggleTimer))
            .unwrap();
        assert!(!session.timer().is_running());
        assert_eq!(session.timer().time_left(), 300);

        session.handle(Event::Action(UserAction::EnterFocus)).unwrap();
        assert!(session.focus_mode());
        assert!(session.timer().is_running());
        // Resumed, not restarted
        assert_eq!(session.timer().time_left(), 300);
    }

    #[test]
    fn test_exit_focus_leaves_timer_running() {
        let mut session = session();
        let id = add(&mut session, "Task", "25");
        session
            .handle(Event::Action(UserAction::Start(id)))
            .unwrap();
        session.handle(Event::Action(UserAction::EnterFocus)).unwrap();

        session.handle(Event::Action(UserAction::ExitFocus)).unwrap();
        assert!(!session.focus_mode());
        assert!(session.timer().is_running());
    }

    #[test]
    fn test_timer_finished_signal_carries_active_task() {
        let mut session = session();
        let id = add(&mut session, "Task", "1");
        session
            .handle(Event::Action(UserAction::Start(id.clone())))
            .unwrap();

        let mut signals = Vec::new();
        for _ in 0..120 {
            if let Some(signal) = session.handle(Event::Tick).unwrap() {
                signals.push(signal);
            }
        }
        assert_eq!(
            signals,
            vec![Signal::TimerFinished {
                task_id: Some(id.clone())
            }]
        );
        // The task stays in progress; finishing the countdown does not
        // complete it
        assert_eq!(
            session.store().task(&id).unwrap().status,
            TaskStatus::InProgress
        );
    }

    #[test]
    fn test_snapshot_dropping_active_task_clears_session() {
        let mut session = session();
        let id = add(&mut session, "Task", "25");
        session
            .handle(Event::Action(UserAction::Start(id)))
            .unwrap();
        session.handle(Event::Action(UserAction::EnterFocus)).unwrap();

        session.handle(Event::TasksSnapshot(Vec::new())).unwrap();

        assert!(session.store().tasks().is_empty());
        assert_eq!(session.active_task_id(), None);
        assert!(!session.focus_mode());
        assert!(!session.timer().is_running());
    }

    #[test]
    fn test_sign_out_clears_session_state() {
        let mut session = session();
        let id = add(&mut session, "Task", "25");
        session
            .handle(Event::Action(UserAction::Start(id)))
            .unwrap();

        session
            .handle(Event::AuthChanged(AuthState::SignedOut))
            .unwrap();
        assert_eq!(session.active_task_id(), None);
        assert!(!session.timer().is_running());
    }
}

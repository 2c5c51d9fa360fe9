//! Action controller — arbitrates one action button between user clicks,
//! trigger responses and poll-observed progress.
//!
//! Every transition goes through the [`ActionMachine`] under a short-lived
//! lock that is never held across an await point. Every accepted transition
//! is published to the view before that lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use vlab_dashboard_domain::action::{
    ActionKind, ActionMachine, ActionState, ActionStatus, ButtonView, Submission, TriggerOutcome,
};

use crate::ports::{DashboardBackend, DashboardView};

/// Owns the state machine of one action and talks to its trigger endpoint.
pub struct ActionController<B, V> {
    machine: Mutex<ActionMachine>,
    backend: Arc<B>,
    view: Arc<V>,
    cooldown: Duration,
}

impl<B, V> ActionController<B, V>
where
    B: DashboardBackend,
    V: DashboardView,
{
    /// Create a controller in the idle state.
    ///
    /// `cooldown` is how long a rejection stays on the button before it
    /// becomes clickable again.
    pub fn new(kind: ActionKind, backend: Arc<B>, view: Arc<V>, cooldown: Duration) -> Self {
        Self {
            machine: Mutex::new(ActionMachine::new(kind)),
            backend,
            view,
            cooldown,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.lock().kind()
    }

    pub fn state(&self) -> ActionState {
        self.lock().state().clone()
    }

    pub fn button(&self) -> ButtonView {
        self.lock().button()
    }

    /// Push the current button to the view.
    pub fn publish(&self) {
        self.show(&self.lock());
    }

    /// Register a click.
    ///
    /// Returns the submission to hand to [`submit`](Self::submit), or `None`
    /// when the button is not idle and the click must be dropped.
    #[tracing::instrument(skip(self), fields(action = %self.kind()))]
    pub fn click(&self) -> Option<Submission> {
        let mut machine = self.lock();
        let submission = machine.click();
        match submission {
            Some(_) => self.show(&machine),
            None => tracing::debug!("click ignored, action busy"),
        }
        submission
    }

    /// Send the trigger request of an accepted click and apply its outcome.
    ///
    /// A rejection stays visible for the cooldown before the button returns
    /// to idle, unless a poll moved it on in the meantime.
    #[tracing::instrument(skip(self), fields(action = %submission.kind))]
    pub async fn submit(&self, submission: Submission) {
        let outcome = match self.backend.trigger(submission.kind).await {
            Ok(response) => TriggerOutcome::from(response),
            Err(err) => {
                tracing::warn!(%err, endpoint = err.endpoint(), "trigger request failed");
                TriggerOutcome::failed()
            }
        };

        let rejected = matches!(outcome, TriggerOutcome::Rejected(_));
        if let TriggerOutcome::Rejected(message) = &outcome {
            tracing::warn!(%message, "trigger rejected");
        }

        {
            let mut machine = self.lock();
            if !machine.resolve(submission, outcome) {
                tracing::debug!("trigger outcome superseded by a poll");
                return;
            }
            self.show(&machine);
        }

        if rejected {
            tokio::time::sleep(self.cooldown).await;
            let mut machine = self.lock();
            if machine.cooldown_elapsed(submission) {
                self.show(&machine);
            }
        }
    }

    /// Click and, when accepted, submit. Returns whether a request was sent.
    pub async fn trigger(&self) -> bool {
        match self.click() {
            Some(submission) => {
                self.submit(submission).await;
                true
            }
            None => false,
        }
    }

    /// Apply the server-side status observed by a board poll.
    pub fn reconcile(&self, status: ActionStatus) {
        let mut machine = self.lock();
        if machine.observe(status) {
            self.show(&machine);
        }
    }

    /// Called with the machine locked, so buttons reach the view in the
    /// order of the transitions that produced them.
    fn show(&self, machine: &ActionMachine) {
        self.view.show_action(machine.kind(), &machine.button());
    }

    fn lock(&self) -> MutexGuard<'_, ActionMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::thread;

    use vlab_dashboard_domain::action::{SUBMITTING_LABEL, TriggerResponse};
    use vlab_dashboard_domain::board::{
        BoardSnapshot, BoardclassSummary, BoardsPayload, FleetTotals,
    };
    use vlab_dashboard_domain::error::FetchError;
    use vlab_dashboard_domain::stats::{
        DenialLog, HourlyStats, StatsSummary, UserStats,
    };
    use vlab_dashboard_domain::time::LocalTime;

    struct StubBackend {
        response: Mutex<Result<TriggerResponse, FetchError>>,
        triggers: AtomicUsize,
    }

    impl StubBackend {
        fn answering(response: Result<TriggerResponse, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                response: Mutex::new(response),
                triggers: AtomicUsize::new(0),
            })
        }

        fn accepting() -> Arc<Self> {
            Self::answering(Ok(TriggerResponse {
                ok: true,
                error: None,
            }))
        }

        fn triggers(&self) -> usize {
            self.triggers.load(Ordering::SeqCst)
        }
    }

    impl DashboardBackend for StubBackend {
        async fn fetch_boards(&self) -> Result<BoardsPayload, FetchError> {
            Ok(BoardsPayload::default())
        }

        async fn fetch_hourly(&self) -> Result<HourlyStats, FetchError> {
            Ok(HourlyStats::default())
        }

        async fn fetch_summary(&self) -> Result<StatsSummary, FetchError> {
            Ok(StatsSummary::default())
        }

        async fn fetch_users(&self) -> Result<UserStats, FetchError> {
            Ok(UserStats::default())
        }

        async fn fetch_denials(&self) -> Result<DenialLog, FetchError> {
            Ok(DenialLog::default())
        }

        fn trigger(
            &self,
            _kind: ActionKind,
        ) -> impl Future<Output = Result<TriggerResponse, FetchError>> + Send {
            self.triggers.fetch_add(1, Ordering::SeqCst);
            let response = self.response.lock().unwrap().clone();
            async { response }
        }
    }

    /// Holds the first `show_action` call until released.
    struct Gate {
        entered: mpsc::Sender<()>,
        release: mpsc::Receiver<()>,
    }

    #[derive(Default)]
    struct RecordingView {
        buttons: Mutex<HashMap<ActionKind, Vec<ButtonView>>>,
        gate: Mutex<Option<Gate>>,
    }

    impl RecordingView {
        fn history(&self, kind: ActionKind) -> Vec<ButtonView> {
            self.buttons
                .lock()
                .unwrap()
                .get(&kind)
                .cloned()
                .unwrap_or_default()
        }

        fn last_label(&self, kind: ActionKind) -> String {
            self.history(kind).last().unwrap().label.clone()
        }
    }

    impl DashboardView for RecordingView {
        fn show_totals(&self, _totals: &FleetTotals) {}
        fn show_boards(&self, _boards: &[BoardSnapshot]) {}
        fn show_boardclass_summary(&self, _summary: &BoardclassSummary) {}
        fn show_connectivity(&self, _ok: bool) {}
        fn show_last_updated(&self, _at: LocalTime) {}
        fn show_action(&self, kind: ActionKind, button: &ButtonView) {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.entered.send(()).unwrap();
                let _ = gate.release.recv_timeout(Duration::from_secs(2));
            }
            self.buttons
                .lock()
                .unwrap()
                .entry(kind)
                .or_default()
                .push(button.clone());
        }
        fn show_stats_summary(&self, _summary: &StatsSummary) {}
        fn show_users(&self, _users: &UserStats) {}
        fn show_denials(&self, _denials: &DenialLog) {}
    }

    fn controller(
        backend: &Arc<StubBackend>,
        view: &Arc<RecordingView>,
    ) -> ActionController<StubBackend, RecordingView> {
        ActionController::new(
            ActionKind::HardwareTest,
            Arc::clone(backend),
            Arc::clone(view),
            Duration::from_secs(3),
        )
    }

    #[tokio::test]
    async fn should_disable_button_while_submitting() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        let submission = ctrl.click();

        assert!(submission.is_some());
        assert!(matches!(ctrl.state(), ActionState::Submitting { .. }));
        let button = ctrl.button();
        assert_eq!(button.label, SUBMITTING_LABEL);
        assert!(button.disabled);
        assert_eq!(view.last_label(ActionKind::HardwareTest), SUBMITTING_LABEL);
    }

    #[tokio::test]
    async fn should_not_send_second_request_when_clicked_twice() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        let first = ctrl.click().unwrap();
        assert!(ctrl.click().is_none());
        ctrl.submit(first).await;
        assert!(!ctrl.trigger().await);

        assert_eq!(backend.triggers(), 1);
    }

    #[tokio::test]
    async fn should_show_queued_when_trigger_accepted() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        assert!(ctrl.trigger().await);

        assert_eq!(ctrl.state(), ActionState::ServerQueued);
        assert_eq!(view.last_label(ActionKind::HardwareTest), "Queued...");
        assert!(ctrl.button().disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn should_show_rejection_then_recover_after_cooldown() {
        let backend = StubBackend::answering(Ok(TriggerResponse {
            ok: false,
            error: Some("Test already queued".to_string()),
        }));
        let view = Arc::new(RecordingView::default());
        let ctrl = Arc::new(controller(&backend, &view));

        let submission = ctrl.click().unwrap();
        let task = tokio::spawn({
            let ctrl = Arc::clone(&ctrl);
            async move { ctrl.submit(submission).await }
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(ctrl.button().label, "Test already queued");
        assert!(ctrl.button().disabled);

        tokio::time::sleep(Duration::from_secs(3)).await;
        task.await.unwrap();

        assert_eq!(ctrl.state(), ActionState::Idle);
        assert_eq!(view.last_label(ActionKind::HardwareTest), "Run HW Test");
    }

    #[tokio::test(start_paused = true)]
    async fn should_show_generic_error_when_transport_fails() {
        let backend = StubBackend::answering(Err(FetchError::Transport {
            endpoint: "/api/hwtest/trigger",
            message: "connection refused".to_string(),
        }));
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        ctrl.trigger().await;

        let labels: Vec<String> = view
            .history(ActionKind::HardwareTest)
            .into_iter()
            .map(|button| button.label)
            .collect();
        assert_eq!(labels, vec!["Queuing...", "Error", "Run HW Test"]);
    }

    #[tokio::test]
    async fn should_force_running_from_idle_when_poll_reports_running() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        ctrl.reconcile(ActionStatus::Running);

        assert_eq!(ctrl.state(), ActionState::ServerRunning);
        assert_eq!(view.last_label(ActionKind::HardwareTest), "Testing...");
    }

    #[tokio::test]
    async fn should_not_publish_when_reconcile_changes_nothing() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        ctrl.reconcile(ActionStatus::Idle);
        ctrl.reconcile(ActionStatus::Idle);

        assert!(view.history(ActionKind::HardwareTest).is_empty());
    }

    #[tokio::test]
    async fn should_ignore_trigger_outcome_when_poll_already_reported_running() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let ctrl = controller(&backend, &view);

        let submission = ctrl.click().unwrap();
        ctrl.reconcile(ActionStatus::Running);
        ctrl.submit(submission).await;

        assert_eq!(ctrl.state(), ActionState::ServerRunning);
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_poll_state_when_cooldown_ends() {
        let backend = StubBackend::answering(Ok(TriggerResponse {
            ok: false,
            error: None,
        }));
        let view = Arc::new(RecordingView::default());
        let ctrl = Arc::new(controller(&backend, &view));

        let submission = ctrl.click().unwrap();
        let task = tokio::spawn({
            let ctrl = Arc::clone(&ctrl);
            async move { ctrl.submit(submission).await }
        });
        tokio::time::sleep(Duration::from_secs(1)).await;
        ctrl.reconcile(ActionStatus::Requested);
        tokio::time::sleep(Duration::from_secs(3)).await;
        task.await.unwrap();

        assert_eq!(ctrl.state(), ActionState::ServerQueued);
    }

    #[test]
    fn should_show_latest_button_when_poll_races_a_slow_publish() {
        let backend = StubBackend::accepting();
        let view = Arc::new(RecordingView::default());
        let (entered_tx, entered) = mpsc::channel();
        let (release, release_rx) = mpsc::channel();
        *view.gate.lock().unwrap() = Some(Gate {
            entered: entered_tx,
            release: release_rx,
        });
        let controller = Arc::new(controller(&backend, &view));

        let clicker = thread::spawn({
            let controller = Arc::clone(&controller);
            move || controller.click()
        });
        entered.recv().unwrap();
        let poller = thread::spawn({
            let controller = Arc::clone(&controller);
            move || controller.reconcile(ActionStatus::Running)
        });
        thread::sleep(Duration::from_millis(50));
        release.send(()).unwrap();
        clicker.join().unwrap();
        poller.join().unwrap();
        controller.reconcile(ActionStatus::Running);

        assert_eq!(controller.state(), ActionState::ServerRunning);
        assert_eq!(view.last_label(ActionKind::HardwareTest), "Testing...");
        let labels: Vec<String> = view
            .history(ActionKind::HardwareTest)
            .into_iter()
            .map(|button| button.label)
            .collect();
        assert_eq!(labels, [SUBMITTING_LABEL, "Testing..."]);
    }
}

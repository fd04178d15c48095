//! Buttons that call the protected person service with a bearer token.
//!
//! DESIGN
//! ======
//! Each trigger spawns one task: wait out the configured delay, fetch a
//! token, send one request, notify. Triggers are independent; overlapping
//! requests are neither serialized nor deduplicated. Tasks live in a
//! `JoinSet` owned by the panel, so tearing the panel down (or dropping it)
//! aborts anything still sleeping or in flight.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors and non-2xx statuses both become [`Outcome::Failed`];
//! the notifier cannot tell them apart. A token-provider failure is not an
//! outcome at all: the request is never sent, nothing is notified, and the
//! error is logged.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use reqwest::Method;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::auth::{TokenError, TokenProvider};
use crate::config::ClientConfig;
use crate::net::api::{ApiError, PersonApi};
use crate::view::{Component, Node};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelAction {
    Create,
    Update,
    /// Calls a route the demo user lacks the role for.
    NotPermitted,
}

impl PanelAction {
    pub const ALL: [Self; 3] = [Self::Create, Self::Update, Self::NotPermitted];

    pub fn method(self) -> Method {
        match self {
            Self::Create => Method::POST,
            Self::Update => Method::PUT,
            Self::NotPermitted => Method::PATCH,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Create Person",
            Self::Update => "Update Person",
            Self::NotPermitted => "Not permitted Route",
        }
    }

    /// Stable identifier used as the rendered button's action.
    pub fn key(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::NotPermitted => "patch",
        }
    }
}

/// Result shown to the user once a request resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Succeeded => "Action successful",
            Self::Failed => "Action failed",
        }
    }
}

/// What the panel shows. A request on the wire wins over a task still
/// waiting out its delay; with nothing outstanding the last outcome stays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStatus {
    #[default]
    Idle,
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl PanelStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending => "Pending",
            Self::InFlight => "Sending",
            Self::Succeeded => Outcome::Succeeded.message(),
            Self::Failed => Outcome::Failed.message(),
        }
    }
}

impl From<Outcome> for PanelStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => Self::Succeeded,
            Outcome::Failed => Self::Failed,
        }
    }
}

/// Sink for user-facing outcomes (an alert box, stdout, a toast).
pub trait Notifier: Send + Sync {
    fn notify(&self, outcome: Outcome);
}

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// No token could be obtained, so no request was sent.
    #[error("token unavailable: {0}")]
    Token(#[from] TokenError),
}

// =============================================================================
// SINGLE ACTION
// =============================================================================

/// Fetch a token and send the action's request once.
///
/// # Errors
///
/// Returns [`ActionError::Token`] if the provider fails. HTTP and transport
/// failures are reported as `Ok(Outcome::Failed)`.
pub async fn perform(api: &PersonApi, tokens: &dyn TokenProvider, action: PanelAction) -> Result<Outcome, ActionError> {
    let token = tokens.token().await?;
    let method = action.method();

    match api.send(method.clone(), &token).await {
        Ok(status) if status.is_success() => {
            info!(%method, status = status.as_u16(), "action succeeded");
            Ok(Outcome::Succeeded)
        }
        Ok(status) => {
            warn!(%method, status = status.as_u16(), "action rejected");
            Ok(Outcome::Failed)
        }
        Err(e) => {
            warn!(%method, error = %e, "action request failed");
            Ok(Outcome::Failed)
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

#[derive(Debug, Default)]
struct Activity {
    pending: usize,
    in_flight: usize,
    last: Option<PanelStatus>,
}

impl Activity {
    fn status(&self) -> PanelStatus {
        if self.in_flight > 0 {
            PanelStatus::InFlight
        } else if self.pending > 0 {
            PanelStatus::Pending
        } else {
            self.last.unwrap_or_default()
        }
    }
}

/// Phase counts shared by every task, republished on each change.
#[derive(Clone)]
struct StatusBoard {
    activity: Arc<Mutex<Activity>>,
    tx: Arc<watch::Sender<PanelStatus>>,
}

impl StatusBoard {
    fn new() -> Self {
        let (tx, _) = watch::channel(PanelStatus::Idle);
        Self { activity: Arc::new(Mutex::new(Activity::default())), tx: Arc::new(tx) }
    }

    fn update(&self, change: impl FnOnce(&mut Activity)) {
        let mut activity = self.activity.lock().unwrap_or_else(PoisonError::into_inner);
        change(&mut activity);
        self.tx.send_replace(activity.status());
    }

    fn scheduled(&self) {
        self.update(|a| a.pending += 1);
    }

    fn sending(&self) {
        self.update(|a| {
            a.pending = a.pending.saturating_sub(1);
            a.in_flight += 1;
        });
    }

    fn finished(&self, status: PanelStatus) {
        self.update(|a| {
            a.in_flight = a.in_flight.saturating_sub(1);
            a.last = Some(status);
        });
    }
}

// =============================================================================
// PANEL
// =============================================================================

pub struct ActionPanel {
    api: PersonApi,
    tokens: Arc<dyn TokenProvider>,
    notifier: Arc<dyn Notifier>,
    delay: Duration,
    status: StatusBoard,
    tasks: JoinSet<()>,
}

impl ActionPanel {
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            api: PersonApi::new(config)?,
            tokens,
            notifier,
            delay: config.action_delay,
            status: StatusBoard::new(),
            tasks: JoinSet::new(),
        })
    }

    /// Subscribe to status transitions.
    pub fn status(&self) -> watch::Receiver<PanelStatus> {
        self.status.tx.subscribe()
    }

    pub fn current_status(&self) -> PanelStatus {
        *self.status.tx.borrow()
    }

    /// Number of tasks not yet reaped.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Schedule `action` to run after the configured delay.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn trigger(&mut self, action: PanelAction) {
        while self.tasks.try_join_next().is_some() {}

        let api = self.api.clone();
        let tokens = Arc::clone(&self.tokens);
        let notifier = Arc::clone(&self.notifier);
        let status = self.status.clone();
        let delay = self.delay;

        status.scheduled();
        debug!(action = action.key(), delay_ms = delay.as_millis(), "action scheduled");

        self.tasks.spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            status.sending();

            match perform(&api, tokens.as_ref(), action).await {
                Ok(outcome) => {
                    status.finished(outcome.into());
                    notifier.notify(outcome);
                }
                Err(e) => {
                    error!(action = action.key(), error = %e, "action abandoned before request");
                    status.finished(PanelStatus::Failed);
                }
            }
        });
    }

    /// Wait for every scheduled task to finish.
    pub async fn wait_idle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "action task did not complete");
            }
        }
    }

    /// Abort every scheduled or in-flight task. Dropping the panel does the
    /// same; this variant also logs how much work was discarded.
    pub fn teardown(mut self) {
        let outstanding = self.tasks.len();
        self.tasks.abort_all();
        debug!(outstanding, "action panel torn down");
    }
}

impl Component for ActionPanel {
    fn render(&self) -> Node {
        let mut children = Vec::new();
        for (i, action) in PanelAction::ALL.into_iter().enumerate() {
            if i > 0 {
                children.push(Node::element("br", None, Vec::new()));
            }
            children.push(Node::Button { action: action.key(), label: action.label().into() });
        }
        children.push(Node::element("p", Some("action-status"), vec![Node::text(self.current_status().label())]));
        Node::element("div", Some("action-panel"), children)
    }
}

#[cfg(test)]
#[path = "action_panel_test.rs"]
mod tests;

//! Session store: the process-wide authentication state machine.
//!
//! ```text
//! Init ──initialize()──▶ Checking ──▶ Authenticated ⇄ Unauthenticated
//! ```
//!
//! The store is created once per application run. `loading` stays `true`
//! until the first account check settles and never returns to `true`.
//! Consumers read [`SessionSnapshot`]s, either on demand through
//! [`SessionStore::snapshot`] or as a stream through [`SessionStore::subscribe`].

use crate::api::MarketApi;
use crate::auth::{AuthResult, LoginForm, RegisterRequest, Session};
use crate::error::{AuthError, SdkError};
use async_lock::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Init,
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Point-in-time view of the session store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub session: Option<Session>,
    /// `true` until the first account check settles.
    pub loading: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            status: SessionStatus::Init,
            session: None,
            loading: true,
        }
    }
}

impl SessionSnapshot {
    pub fn authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// What the navigation bar should show.
    pub fn navbar(&self) -> NavbarState {
        if self.loading {
            return NavbarState::Hidden;
        }
        match (&self.status, &self.session) {
            (SessionStatus::Authenticated, Some(session)) => NavbarState::SignedIn {
                display_name: session.display_name.clone(),
                balance: session.balance,
            },
            _ => NavbarState::Anonymous,
        }
    }
}

/// Account area of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavbarState {
    /// First account check still outstanding: show nothing account-specific.
    Hidden,
    /// Show login / register links.
    Anonymous,
    SignedIn {
        display_name: String,
        balance: Decimal,
    },
}

/// Owns the signed-in [`Session`].
///
/// Refreshes are single-flight: calls that arrive while a refresh is running
/// wait for the lock, and a caller whose request is already covered by a
/// refresh that started after it was made takes that result instead of
/// issuing another request. Logout holds the same lock, so a refresh can
/// never restore a session that logout cleared.
pub struct SessionStore {
    api: Arc<dyn MarketApi>,
    state: watch::Sender<SessionSnapshot>,
    lock: Mutex<()>,
    /// Refresh tickets handed out.
    requested: AtomicU64,
    /// Highest ticket whose request has been answered.
    answered: AtomicU64,
}

impl SessionStore {
    /// A store in `Init`. Nothing is fetched until [`initialize`](Self::initialize).
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        Self {
            api,
            state,
            lock: Mutex::new(()),
            requested: AtomicU64::new(0),
            answered: AtomicU64::new(0),
        }
    }

    /// Run the first account check.
    pub async fn initialize(&self) -> SessionSnapshot {
        self.begin_checking();
        self.refresh().await
    }

    /// Re-fetch the account. Any failure leaves the store unauthenticated.
    pub async fn refresh(&self) -> SessionSnapshot {
        let ticket = self.requested.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = self.lock.lock().await;

        if self.answered.load(Ordering::SeqCst) >= ticket {
            tracing::debug!(ticket, "Session refresh already covered");
            return self.snapshot();
        }

        self.begin_checking();
        let started = self.requested.load(Ordering::SeqCst);
        let result = self.api.account().await;

        match result {
            Ok(session) => self.set_authenticated(session),
            Err(e) => {
                tracing::debug!("Account check failed: {}", e);
                self.set_unauthenticated();
            }
        }
        self.answered.fetch_max(started, Ordering::SeqCst);
        self.snapshot()
    }

    /// Submit credentials, then refresh the session.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult {
        let form = LoginForm::new(username, password);
        match self.api.login(&form).await {
            Ok(()) => {
                tracing::debug!(username, "Login accepted");
                self.refresh().await;
                AuthResult::Ok
            }
            Err(e) => {
                tracing::warn!(username, "Login rejected: {}", e);
                AuthResult::Failed {
                    error: e.api_message().unwrap_or_else(|| "Login failed".to_string()),
                }
            }
        }
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> AuthResult {
        let request = RegisterRequest::new(username, email, password);
        match self.api.register(&request).await {
            Ok(()) => AuthResult::Ok,
            Err(e) => {
                tracing::warn!(username, "Registration rejected: {}", e);
                AuthResult::Failed {
                    error: e
                        .api_message()
                        .unwrap_or_else(|| "Registration failed".to_string()),
                }
            }
        }
    }

    /// End the session. The local state is cleared whether or not the
    /// backend call succeeds, and also if this future is dropped mid-call.
    pub async fn logout(&self) {
        let _guard = self.lock.lock().await;
        let _reset = ResetOnDrop(self);

        if let Err(e) = self.api.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
    }

    /// Credit the signed-in account and publish the new balance.
    pub async fn add_funds(&self, amount: Decimal) -> Result<Decimal, SdkError> {
        self.require_session()?;
        if amount <= Decimal::ZERO {
            return Err(SdkError::Validation("Amount must be positive".to_string()));
        }
        let balance = self.api.add_funds(amount).await?;
        self.state.send_if_modified(|s| match s.session.as_mut() {
            Some(session) if s.status == SessionStatus::Authenticated => {
                session.balance = balance;
                true
            }
            _ => false,
        });
        tracing::info!(%amount, %balance, "Funds added");
        Ok(balance)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().authenticated()
    }

    /// Current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn require_session(&self) -> Result<Session, AuthError> {
        self.session().ok_or(AuthError::NotAuthenticated)
    }

    fn begin_checking(&self) {
        self.state.send_if_modified(|s| {
            if s.status == SessionStatus::Init {
                s.status = SessionStatus::Checking;
                true
            } else {
                false
            }
        });
    }

    fn set_authenticated(&self, session: Session) {
        let was = self.state.borrow().status;
        if was != SessionStatus::Authenticated {
            tracing::info!(username = %session.username, "Session authenticated");
        }
        self.state.send_replace(SessionSnapshot {
            status: SessionStatus::Authenticated,
            session: Some(session),
            loading: false,
        });
    }

    fn set_unauthenticated(&self) {
        let was = self.state.borrow().status;
        if was == SessionStatus::Authenticated {
            tracing::info!("Session ended");
        }
        self.state.send_replace(SessionSnapshot {
            status: SessionStatus::Unauthenticated,
            session: None,
            loading: false,
        });
    }
}

/// Clears the session when dropped, and marks every refresh requested so far
/// as answered by the logout.
struct ResetOnDrop<'a>(&'a SessionStore);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        let store = self.0;
        store.set_unauthenticated();
        let requested = store.requested.load(Ordering::SeqCst);
        store.answered.fetch_max(requested, Ordering::SeqCst);
    }
}

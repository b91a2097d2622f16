//! Navigation guard: gates protected views on session state.

use crate::auth::{SessionSnapshot, SessionStore};
use crate::shared::MarketId;
use std::fmt;
use std::sync::Arc;

/// Application views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Markets,
    MarketDetail(MarketId),
    Portfolio,
}

impl Route {
    /// Whether the view needs a signed-in session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::Markets => "/markets".to_string(),
            Route::MarketDetail(id) => format!("/markets/{id}"),
            Route::Portfolio => "/portfolio".to_string(),
        }
    }

    /// Parse an application path. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/markets" => Some(Route::Markets),
            "/portfolio" => Some(Route::Portfolio),
            _ => trimmed
                .strip_prefix("/markets/")
                .and_then(|id| id.parse().ok())
                .map(Route::MarketDetail),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// What to do with a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// The first account check is still outstanding: show a neutral
    /// placeholder, do not redirect yet.
    Pending,
    Redirect(Route),
}

/// Decide whether `route` may render for the given session state.
///
/// Never redirects while `loading` is set. Once loading is over, a protected
/// route without an authenticated session always redirects to login.
pub fn guard(route: Route, session: &SessionSnapshot) -> GuardDecision {
    if !route.is_protected() {
        return GuardDecision::Render;
    }
    if session.loading {
        return GuardDecision::Pending;
    }
    if session.authenticated() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(Route::Login)
    }
}

/// Applies [`guard`] against a live [`SessionStore`].
#[derive(Clone)]
pub struct Navigator {
    session: Arc<SessionStore>,
}

impl Navigator {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    pub fn check(&self, route: Route) -> GuardDecision {
        let decision = guard(route, &self.session.snapshot());
        if let GuardDecision::Redirect(to) = decision {
            tracing::debug!(from = %route, to = %to, "Navigation redirected");
        }
        decision
    }

    /// Wait out the first account check, then decide.
    ///
    /// The check only starts with [`SessionStore::initialize`]; on a store
    /// that was never initialized this waits indefinitely.
    pub async fn resolve(&self, route: Route) -> GuardDecision {
        let mut rx = self.session.subscribe();
        let settled = rx.wait_for(|s| !s.loading).await.map(|s| (*s).clone());
        match settled {
            Ok(snapshot) => guard(route, &snapshot),
            // Store dropped: fall back to the last published state.
            Err(_) => self.check(route),
        }
    }
}

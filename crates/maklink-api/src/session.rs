// Session state for the cookie-based MAK Mobile login.
//
// The cookie jar itself lives inside the reqwest client; this tracks
// whether the cookies it holds are believed valid, and serializes login
// attempts so only one executes at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

/// Authentication state owned by the [`GrillClient`](crate::GrillClient).
///
/// The `authenticated` flag read outside the login lock is a best-effort
/// hint only: any authenticated call that observes a redirect-to-login
/// clears it, and a concurrent login may set it again. A spurious extra
/// reauthentication is harmless.
#[derive(Debug, Default)]
pub(crate) struct Session {
    authenticated: AtomicBool,
    login_lock: Mutex<()>,
}

impl Session {
    /// Hint: do we believe the current cookies are valid?
    pub(crate) fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    /// Acquire the login lock. Held for the duration of a login attempt;
    /// concurrent callers block here and then observe its result.
    pub(crate) async fn login_guard(&self) -> MutexGuard<'_, ()> {
        self.login_lock.lock().await
    }

    pub(crate) fn mark_authenticated(&self) {
        self.authenticated.store(true, Ordering::Release);
    }

    /// Mark the session invalid (redirect-to-login observed, or explicit
    /// shutdown). The next `ensure_authenticated` performs a fresh login.
    pub(crate) fn invalidate(&self) {
        self.authenticated.store(false, Ordering::Release);
    }
}

//! Request-scoped private key binding.
//!
//! A decrypt request carries the owner's private key. That key must be
//! visible to exactly one logical request and must be gone when the
//! request ends — success, failure, or cancellation alike. A task-local
//! gives exactly that contract: the binding lives inside the scoped
//! future and is dropped with it, and concurrent requests on the same
//! runtime (even on the same worker thread) each see only their own
//! binding. There is no process-wide slot to clear or to leak across
//! requests.

use crate::keys::PrivateKeyHandle;

tokio::task_local! {
    static ACTIVE_PRIVATE_KEY: PrivateKeyHandle;
}

/// Binds a private key to the lifetime of one unit of work.
pub struct SecretScope;

impl SecretScope {
    /// Runs `fut` with `key` active. The binding is released on every exit
    /// path: normal completion, error return, panic unwind, or drop of the
    /// future on cancellation.
    pub async fn activate<F>(key: PrivateKeyHandle, fut: F) -> F::Output
    where
        F: Future,
    {
        ACTIVE_PRIVATE_KEY.scope(key, fut).await
    }

    /// Synchronous variant for non-async call paths.
    pub fn activate_sync<F, T>(key: PrivateKeyHandle, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        ACTIVE_PRIVATE_KEY.sync_scope(key, f)
    }

    /// The key bound to the current task, if any.
    ///
    /// Returns `None` outside any scope; callers that require a key must
    /// treat that as a hard error, never fall through to a default.
    pub fn current() -> Option<PrivateKeyHandle> {
        ACTIVE_PRIVATE_KEY.try_with(|key| key.clone()).ok()
    }
}

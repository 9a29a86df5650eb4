//! crates/learning_dashboard_core/src/identity.rs
//!
//! The identity store: owns the active session and the account table.
//!
//! The account table is never cached; `register` and `login` read it from storage
//! each time. Passwords are stored and compared in plaintext and sessions never
//! expire. Both are known weaknesses of this design, kept on purpose.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError, RwLock,
};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{CredentialRecord, User};
use crate::ports::{
    KeyValueStore, LatencyService, PortError, PortResult, ACCOUNTS_KEY, SESSION_KEY,
};

pub struct IdentityStore {
    storage: Arc<dyn KeyValueStore>,
    latency: Arc<dyn LatencyService>,
    session: RwLock<Option<User>>,
    loading: AtomicBool,
    /// Serializes the read-check-write section of `register` and `login`.
    commit: Mutex<()>,
}

impl IdentityStore {
    /// Creates a store with no session. `is_loading` stays true until [`Self::restore`] runs.
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: Arc<dyn LatencyService>) -> Self {
        Self {
            storage,
            latency,
            session: RwLock::new(None),
            loading: AtomicBool::new(true),
            commit: Mutex::new(()),
        }
    }

    /// Restores the persisted session pointer, if any.
    ///
    /// This is a single attempt: an unreadable pointer is logged and treated as
    /// absent, and `is_loading` becomes false either way.
    pub fn restore(&self) {
        match self.read_session_pointer() {
            Ok(Some(user)) => {
                info!("Restored session for {}", user.email);
                self.set_session(Some(user));
            }
            Ok(None) => debug!("No persisted session to restore"),
            Err(e) => warn!("Ignoring unreadable session pointer: {}", e),
        }
        self.loading.store(false, Ordering::Release);
    }

    pub fn session(&self) -> Option<User> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Creates an account and signs it in.
    ///
    /// Returns `Ok(false)` without touching any state if `email` is already taken.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> PortResult<bool> {
        self.latency.wait().await?;

        let _guard = self.lock_commit()?;
        let previous = self.storage.get(ACCOUNTS_KEY)?;
        let mut accounts = parse_accounts(previous.as_deref())?;
        if accounts.iter().any(|record| record.user.email == email) {
            warn!("Registration rejected: {} is already registered", email);
            return Ok(false);
        }

        let user = User {
            id: Utc::now().timestamp_millis().to_string(),
            name: name.to_string(),
            email: email.to_string(),
        };
        accounts.push(CredentialRecord {
            user: user.clone(),
            password: password.to_string(),
        });

        let accounts_json = serde_json::to_string(&accounts)?;
        let session_json = serde_json::to_string(&user)?;
        self.storage.put(ACCOUNTS_KEY, &accounts_json)?;
        if let Err(e) = self.storage.put(SESSION_KEY, &session_json) {
            self.rollback_accounts(previous.as_deref());
            return Err(e);
        }

        info!("Registered new account {} ({})", user.email, user.id);
        self.set_session(Some(user));
        Ok(true)
    }

    /// Signs in with an exact email and password match.
    ///
    /// Returns `Ok(false)` and leaves the session unchanged when no record matches.
    pub async fn login(&self, email: &str, password: &str) -> PortResult<bool> {
        self.latency.wait().await?;

        let _guard = self.lock_commit()?;
        let accounts = parse_accounts(self.storage.get(ACCOUNTS_KEY)?.as_deref())?;
        let Some(record) = accounts
            .into_iter()
            .find(|record| record.matches(email, password))
        else {
            warn!("Login rejected for {}", email);
            return Ok(false);
        };

        let user = record.into_user();
        self.storage
            .put(SESSION_KEY, &serde_json::to_string(&user)?)?;

        info!("Logged in {}", user.email);
        self.set_session(Some(user));
        Ok(true)
    }

    /// Ends the session. The account table is left untouched.
    pub fn logout(&self) -> PortResult<()> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = self.session() {
            info!("Logged out {}", user.email);
        }
        self.set_session(None);
        Ok(())
    }

    //=====================================================================================
    // Helpers
    //=====================================================================================

    fn read_session_pointer(&self) -> PortResult<Option<User>> {
        match self.storage.get(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_session(&self, user: Option<User>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    fn lock_commit(&self) -> PortResult<MutexGuard<'_, ()>> {
        self.commit
            .lock()
            .map_err(|_| PortError::Unexpected("identity store lock poisoned".to_string()))
    }

    fn rollback_accounts(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(raw) => self.storage.put(ACCOUNTS_KEY, raw),
            None => self.storage.remove(ACCOUNTS_KEY),
        };
        if let Err(e) = restored {
            warn!("Failed to roll back the account table: {}", e);
        }
    }
}

fn parse_accounts(raw: Option<&str>) -> PortResult<Vec<CredentialRecord>> {
    match raw {
        Some(raw) => Ok(serde_json::from_str(raw)?),
        None => Ok(Vec::new()),
    }
}

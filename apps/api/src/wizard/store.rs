//! In-memory session store. Sessions live until the client ends them, until they sit
//! idle longer than the configured timeout, or until the process exits; nothing is
//! persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::wizard::controller::Session;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

struct Slot {
    session: Session,
    last_touched: Instant,
}

impl Slot {
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.duration_since(self.last_touched) > idle_timeout
    }
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Slot>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_timeout,
        }
    }

    /// Starts a new empty session and returns a copy of it.
    /// Idle sessions are swept out first.
    pub async fn create(&self) -> Session {
        let session = Session::new();
        let mut sessions = self.sessions.write().await;

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, slot| !slot.is_expired(now, self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle session(s)");
        }

        sessions.insert(
            session.id,
            Slot {
                session: session.clone(),
                last_touched: now,
            },
        );
        debug!("Session {} created", session.id);
        session
    }

    /// Returns a snapshot of the session. Later mutations do not affect it.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.update(id, |s| Ok::<_, AppError>(s.clone())).await
    }

    /// Runs `f` against the live session under the write lock and marks it as used.
    ///
    /// `f` must be synchronous; never hold the lock across an LLM call or a render.
    pub async fn update<T, E, F>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Session) -> Result<T, E>,
        E: Into<AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        if sessions
            .get(&id)
            .is_some_and(|slot| slot.is_expired(now, self.idle_timeout))
        {
            sessions.remove(&id);
            info!("Session {id} expired after sitting idle");
        }

        let slot = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        slot.last_touched = now;
        f(&mut slot.session).map_err(Into::into)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| debug!("Session {id} ended"))
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::controller::{PersonalInfoInput, WizardError, WizardStep};

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::default();
        let session = store.create().await;

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert_eq!(fetched.current_step, WizardStep::PersonalInfo);
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_mutates_live_session() {
        let store = SessionStore::default();
        let id = store.create().await.id;

        store
            .update(id, |s| {
                s.update_personal_info(PersonalInfoInput {
                    name: Some("Jane Doe".to_string()),
                    ..Default::default()
                });
                Ok::<_, WizardError>(())
            })
            .await
            .unwrap();

        assert_eq!(store.get(id).await.unwrap().record.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_failed_update_propagates_error() {
        let store = SessionStore::default();
        let id = store.create().await.id;

        let result = store.update(id, |s| s.next()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(
            store.get(id).await.unwrap().current_step,
            WizardStep::PersonalInfo
        );
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::default();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_ends_session() {
        let store = SessionStore::default();
        let id = store.create().await.id;
        store.remove(id).await.unwrap();
        assert!(store.get(id).await.is_err());
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_expires_on_access() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await.id;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_access_keeps_session_alive() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create().await.id;

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(45)).await;
            assert!(store.get(id).await.is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_sweeps_idle_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let stale = store.create().await.id;
        let busy = store.create().await.id;

        tokio::time::advance(Duration::from_secs(40)).await;
        store.get(busy).await.unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;

        let fresh = store.create().await.id;
        assert_eq!(store.active_count().await, 2);
        assert!(store.get(stale).await.is_err());
        assert!(store.get(busy).await.is_ok());
        assert!(store.get(fresh).await.is_ok());
    }
}

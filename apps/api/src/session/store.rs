use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::state::SessionState;

/// In-memory session map. Sessions live until deleted or the process exits.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
}

impl SessionStore {
    pub async fn create(&self) -> (Uuid, SessionState) {
        let id = Uuid::new_v4();
        let state = SessionState::default();
        self.sessions.write().await.insert(id, state.clone());
        debug!("Session {id} created");
        (id, state)
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionState, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| debug!("Session {id} discarded"))
            .ok_or_else(|| not_found(id))
    }

    /// Applies a transition under the write lock and stores its result.
    /// When the transition errors, the stored state is left unchanged.
    pub async fn update<T, F>(&self, id: Uuid, transition: F) -> Result<(SessionState, T), AppError>
    where
        F: FnOnce(&SessionState) -> Result<(SessionState, T), AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let current = sessions.get(&id).ok_or_else(|| not_found(id))?;
        let (next, outcome) = transition(current)?;
        sessions.insert(id, next.clone());
        Ok((next, outcome))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

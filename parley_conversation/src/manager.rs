//! Session-scoped history operations.
//!
//! `HistoryStore` is the entry point the request handlers use: every call
//! names the session it acts on, loads that session from storage, applies
//! one change, and writes it back.

use std::sync::Arc;

use parley_core::{Session, SessionId, SessionStorage, Turn};
use thiserror::Error;
use tracing::{debug, info};

use crate::history::{HistoryConfig, HistoryLog};

/// Errors that can occur during history management.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Invalid index")]
    InvalidIndex { index: i64, len: usize },

    #[error("Session storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Bounded per-session conversation log backed by a [`SessionStorage`].
///
/// There is no per-session lock. Two requests on the same session that
/// overlap each load, modify and save independently; the later save wins.
pub struct HistoryStore<S = Arc<dyn SessionStorage>>
where
    S: Send + Sync,
{
    storage: S,
    config: HistoryConfig,
}

impl<S> HistoryStore<S>
where
    S: SessionStorage + Send + Sync,
{
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: HistoryConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Current log for `id`, empty if the session has none.
    pub async fn get_history(&self, id: &SessionId) -> Result<Vec<Turn>> {
        let mut session = self.storage.load(id).await?;
        Ok(self.take_log(&mut session).into_turns())
    }

    /// Record a turn and mark the session permanent.
    pub async fn append(
        &self,
        id: &SessionId,
        user_input: impl Into<String>,
        bot_response: impl Into<String>,
    ) -> Result<()> {
        let mut session = self.storage.load(id).await?;
        let mut log = self.take_log(&mut session);

        let dropped = log.push(Turn::new(user_input, bot_response));
        if dropped > 0 {
            debug!("Session {id}: history capped at {}", log.len());
        }

        if !session.permanent {
            info!("Session {id} marked permanent");
        }
        session.permanent = true;
        self.commit(session, log).await
    }

    /// Replace the log with an empty one.
    ///
    /// A log that is already empty is left alone, so clearing never creates
    /// a stored session.
    pub async fn clear(&self, id: &SessionId) -> Result<()> {
        let mut session = self.storage.load(id).await?;
        let mut log = self.take_log(&mut session);
        if log.is_empty() {
            debug!("Session {id}: history already empty");
            return Ok(());
        }
        log.clear();

        info!("Cleared history for session {id}");
        self.commit(session, log).await
    }

    /// Remove the turn at `index`.
    ///
    /// An out-of-range index is reported without touching storage.
    pub async fn delete_at(&self, id: &SessionId, index: i64) -> Result<Turn> {
        let mut session = self.storage.load(id).await?;
        let mut log = self.take_log(&mut session);

        let removed = log.remove(index)?;

        debug!("Session {id}: deleted turn {index}, {} left", log.len());
        self.commit(session, log).await?;
        Ok(removed)
    }

    fn take_log(&self, session: &mut Session) -> HistoryLog {
        HistoryLog::from_turns(std::mem::take(&mut session.history), self.config)
    }

    async fn commit(&self, mut session: Session, log: HistoryLog) -> Result<()> {
        session.history = log.into_turns();
        session.touch();
        self.storage.save(session).await?;
        Ok(())
    }
}

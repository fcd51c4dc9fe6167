use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use parley_core::{Session, SessionId, SessionStorage};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Lifetime rules for stored sessions, measured from the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Lifetime of a session that has not been marked permanent
    pub idle_timeout: TimeDelta,
    /// Extended lifetime once the session is permanent
    pub permanent_lifetime: TimeDelta,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: TimeDelta::hours(24),
            permanent_lifetime: TimeDelta::days(31),
        }
    }
}

impl SessionPolicy {
    #[must_use]
    pub const fn lifetime(&self, session: &Session) -> TimeDelta {
        if session.permanent {
            self.permanent_lifetime
        } else {
            self.idle_timeout
        }
    }

    #[must_use]
    pub fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(session.updated_at) > self.lifetime(session)
    }
}

/// Keyed session store held in memory.
///
/// The lock guards the map itself; callers never hold it across I/O.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, Session>>,
    policy: SessionPolicy,
}

impl SessionManager {
    #[must_use]
    pub fn new(policy: SessionPolicy) -> Self {
        info!(
            "SessionManager initialized (idle timeout {}s, permanent lifetime {}s)",
            policy.idle_timeout.num_seconds(),
            policy.permanent_lifetime.num_seconds()
        );
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Drop every session that has outlived its policy.
    fn sweep(&self, sessions: &mut HashMap<SessionId, Session>, now: DateTime<Utc>) {
        let before = sessions.len();
        sessions.retain(|_, s| !self.policy.is_expired(s, now));
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {purged} expired session(s)");
        }
    }
}

#[async_trait]
impl SessionStorage for SessionManager {
    /// A live session is touched on every load, so its lifetime runs from
    /// the last request rather than the last write.
    async fn load(&self, id: &SessionId) -> anyhow::Result<Session> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let expired = match sessions.get_mut(id) {
            Some(session) if !self.policy.is_expired(session, now) => {
                session.updated_at = now;
                return Ok(session.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Session {id} expired, starting fresh");
            sessions.remove(id);
        }
        Ok(Session::new(*id))
    }

    async fn save(&self, session: Session) -> anyhow::Result<()> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        self.sweep(&mut sessions, now);

        debug!(
            "Saved session {} ({} turn(s))",
            session.id,
            session.history.len()
        );
        sessions.insert(session.id, session);
        Ok(())
    }
}

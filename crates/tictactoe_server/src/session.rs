//! Per-session game state.
//!
//! Every browser tab or client gets its own [`Game`], keyed by the id it
//! sends. All sessions live behind one lock, held for the whole
//! read-modify-write of a request, so two requests never interleave on
//! the same board. When the table is full, the longest-idle session past
//! the idle timeout makes room for a new one.

use derive_more::Display;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tictactoe_engine::{Game, GreedyPolicy};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Session used when the client sends no id.
pub const DEFAULT_SESSION: &str = "default";

/// One player's game and the opponent playing it.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state.
    pub game: Game,
    /// The computer opponent for this game.
    pub policy: GreedyPolicy,
    /// Last time a request touched this session.
    pub last_used: Instant,
}

impl GameSession {
    /// Creates a session with a fresh game.
    #[instrument(skip(policy))]
    pub fn new(id: SessionId, policy: GreedyPolicy) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            game: Game::new(),
            policy,
            last_used: Instant::now(),
        }
    }
}

/// The session table is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Session limit of {} reached", _0)]
pub struct SessionLimitReached(pub usize);

impl std::error::Error for SessionLimitReached {}

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<SessionId, GameSession>,
    created: u64,
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    inner: Arc<Mutex<Sessions>>,
    seed: Option<u64>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionManager {
    /// Creates an empty manager.
    ///
    /// With a `seed`, the n-th session created plays with
    /// `seed + n`; otherwise each session is seeded from the OS.
    /// Sessions untouched for `idle_timeout` may be evicted once the
    /// table holds `max_sessions`.
    #[instrument]
    pub fn new(seed: Option<u64>, max_sessions: usize, idle_timeout: Duration) -> Self {
        info!("Creating session manager");
        Self {
            inner: Arc::new(Mutex::new(Sessions::default())),
            seed,
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    /// Runs `f` on the session `id`, creating it on first use.
    ///
    /// The lock is held for the duration of `f`.
    #[instrument(skip(self, f))]
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameSession) -> T,
    ) -> Result<T, SessionLimitReached> {
        let mut sessions = self.lock();
        let now = Instant::now();

        if !sessions.by_id.contains_key(id) && sessions.by_id.len() >= self.max_sessions {
            self.evict_idle(&mut sessions.by_id, now)?;
        }

        let Sessions { by_id, created } = &mut *sessions;
        let session = match by_id.entry(id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let policy = match self.seed {
                    Some(seed) => GreedyPolicy::seeded(seed.wrapping_add(*created)),
                    None => GreedyPolicy::from_os_rng(),
                };
                *created += 1;
                entry.insert(GameSession::new(id.to_string(), policy))
            }
        };
        session.last_used = now;

        Ok(f(session))
    }

    /// Reads the game of session `id` without creating it.
    ///
    /// An unknown id sees a fresh game.
    #[instrument(skip(self, f))]
    pub fn view<T>(&self, id: &str, f: impl FnOnce(&Game) -> T) -> T {
        match self.lock().by_id.get(id) {
            Some(session) => f(&session.game),
            None => f(&Game::new()),
        }
    }

    // Removes the longest-idle session, provided it has been idle past the timeout.
    fn evict_idle(
        &self,
        by_id: &mut HashMap<SessionId, GameSession>,
        now: Instant,
    ) -> Result<(), SessionLimitReached> {
        let stale = by_id
            .values()
            .min_by_key(|session| session.last_used)
            .filter(|session| now.duration_since(session.last_used) >= self.idle_timeout)
            .map(|session| session.id.clone());

        match stale {
            Some(stale) => {
                by_id.remove(&stale);
                info!(session_id = %stale, "Evicted idle session");
                Ok(())
            }
            None => {
                warn!(limit = self.max_sessions, "Session limit reached");
                Err(SessionLimitReached(self.max_sessions))
            }
        }
    }

    /// Drops a session; returns whether it existed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.lock().by_id.remove(id).is_some();
        debug!(removed, "Session removed");
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().by_id.len()
    }

    /// True when no session exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Games commit whole rounds or nothing, so a panic mid-request cannot
    // leave a half-applied board behind the poisoned lock.
    fn lock(&self) -> MutexGuard<'_, Sessions> {
        self.inner.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Session lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::Player;

    const IDLE: Duration = Duration::from_secs(3600);

    #[test]
    fn test_sessions_are_isolated() {
        let manager = SessionManager::new(Some(1), 8, IDLE);
        manager
            .with_session("a", |s| s.game.submit_human_move(0, &mut s.policy))
            .unwrap()
            .unwrap();

        let untouched = manager.with_session("b", |s| s.game.clone()).unwrap();
        assert_eq!(untouched, Game::new());

        let played = manager.with_session("a", |s| s.game.board().count(Player::Human));
        assert_eq!(played, Ok(1));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_session_limit() {
        let manager = SessionManager::new(None, 1, IDLE);
        assert!(manager.with_session("a", |_| ()).is_ok());
        assert_eq!(
            manager.with_session("b", |_| ()),
            Err(SessionLimitReached(1))
        );
        // Existing sessions stay reachable at the cap.
        assert!(manager.with_session("a", |_| ()).is_ok());

        assert!(manager.remove("a"));
        assert!(manager.with_session("b", |_| ()).is_ok());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_view_does_not_create_session() {
        let manager = SessionManager::new(None, 1, IDLE);
        let game = manager.view("ghost", |game| game.clone());
        assert_eq!(game, Game::new());
        assert!(manager.is_empty());

        manager
            .with_session("a", |s| s.game.submit_human_move(0, &mut s.policy))
            .unwrap()
            .unwrap();
        let human = manager.view("a", |game| game.board().count(Player::Human));
        assert_eq!(human, 1);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_idle_session_evicted_at_limit() {
        let manager = SessionManager::new(None, 2, Duration::ZERO);
        manager.with_session("a", |_| ()).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        manager.with_session("b", |_| ()).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        // Touch "a" so "b" is the longest idle.
        manager.with_session("a", |_| ()).unwrap();

        assert!(manager.with_session("c", |_| ()).is_ok());
        assert_eq!(manager.len(), 2);
        assert!(manager.remove("a"));
        assert!(!manager.remove("b"));
        assert!(manager.remove("c"));
    }
}

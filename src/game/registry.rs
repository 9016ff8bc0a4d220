//! Per-player session registry
//!
//! Each player owns at most one live coordinator. Lookups clone the `Arc` out
//! of the map, so players never wait on each other once they hold their handle.

use super::coordinator::SessionCoordinator;
use rustc_hash::FxHashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<FxHashMap<String, Arc<SessionCoordinator>>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player's session, returning the one it replaces
    pub fn insert(
        &self,
        player: impl Into<String>,
        coordinator: SessionCoordinator,
    ) -> Option<Arc<SessionCoordinator>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(player.into(), Arc::new(coordinator))
    }

    #[must_use]
    pub fn get(&self, player: &str) -> Option<Arc<SessionCoordinator>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player)
            .cloned()
    }

    pub fn remove(&self, player: &str) -> Option<Arc<SessionCoordinator>> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(player)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::game::config::GameConfig;
    use crate::game::coordinator::Collaborators;
    use crate::game::session::GameStatus;
    use crate::game::validator::AcceptAll;
    use crate::wordlists::WordPool;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::thread;

    fn coordinator(target: &str) -> SessionCoordinator {
        let collaborators = Collaborators {
            pool: Arc::new(WordPool::embedded()),
            remote: None,
            validator: Arc::new(AcceptAll),
        };
        let config = GameConfig {
            override_target: Some(Word::new(target).unwrap()),
            ..GameConfig::default()
        };
        SessionCoordinator::start_classic(&config, &collaborators, &mut StdRng::seed_from_u64(0))
            .unwrap()
    }

    #[test]
    fn players_are_isolated() {
        let registry = SessionRegistry::new();
        registry.insert("alice", coordinator("chat"));
        registry.insert("bob", coordinator("chien"));

        registry.get("alice").unwrap().submit("chat").unwrap();

        assert_eq!(registry.get("alice").unwrap().snapshot().status, GameStatus::Won);
        assert_eq!(registry.get("bob").unwrap().snapshot().current_turn, 0);
        assert!(registry.get("carol").is_none());
    }

    #[test]
    fn insert_replaces_previous_session() {
        let registry = SessionRegistry::new();
        assert!(registry.insert("alice", coordinator("chat")).is_none());
        assert!(registry.insert("alice", coordinator("rouge")).is_some());
        assert_eq!(registry.len(), 1);

        registry.remove("alice");
        assert!(registry.is_empty());
    }

    #[test]
    fn parallel_players() {
        let registry = Arc::new(SessionRegistry::new());
        for player in 0..8 {
            registry.insert(format!("player-{player}"), coordinator("maison"));
        }

        let handles: Vec<_> = (0..8)
            .map(|player| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let session = registry.get(&format!("player-{player}")).unwrap();
                    session.submit("raison").unwrap();
                    session.submit("maison").unwrap().status
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), GameStatus::Won);
        }
    }
}

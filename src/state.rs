use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::Mutex;

use crate::{battle::BattleSession, config::Config, pokeapi::PokeApi, team::Team};

/// In-memory store of items addressed by a numeric id
pub struct Registry<T> {
    next_id: AtomicU64,
    items: Mutex<HashMap<u64, Arc<Mutex<T>>>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            items: Mutex::new(HashMap::new()),
        }
    }

    /// Stores `item` and returns its new id
    pub async fn insert(&self, item: T) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.items.lock().await.insert(id, Arc::new(Mutex::new(item)));
        id
    }

    pub async fn get(&self, id: u64) -> Option<Arc<Mutex<T>>> {
        self.items.lock().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: u64) -> Option<Arc<Mutex<T>>> {
        self.items.lock().await.remove(&id)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the HTTP handlers share
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn PokeApi>,
    pub battles: Registry<BattleSession>,
    pub teams: Registry<Team>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<dyn PokeApi>) -> Self {
        Self {
            config,
            api,
            battles: Registry::new(),
            teams: Registry::new(),
        }
    }
}

//! In-memory key-value storage backing the repositories.

use tokio::sync::RwLock;
use uuid::Uuid;

use domain::{Account, User};

/// Anything stored by id.
pub trait Identified: Clone + Send + Sync {
    fn id(&self) -> Uuid;
}

impl Identified for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Entities kept in first-insertion order; saving an existing id replaces it
/// in place.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    entities: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Identified> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `entities`
    pub fn with_entities(entities: Vec<T>) -> Self {
        Self {
            entities: RwLock::new(entities),
        }
    }

    pub(crate) async fn get(&self, id: Uuid) -> Option<T> {
        self.entities
            .read()
            .await
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    pub(crate) async fn snapshot(&self) -> Vec<T> {
        self.entities.read().await.clone()
    }

    pub(crate) async fn upsert(&self, entity: T) -> T {
        let mut entities = self.entities.write().await;
        match entities.iter_mut().find(|e| e.id() == entity.id()) {
            Some(slot) => *slot = entity.clone(),
            None => entities.push(entity.clone()),
        }
        entity
    }

    /// Number of stored entities
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }
}

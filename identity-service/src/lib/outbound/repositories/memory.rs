use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

#[derive(Default)]
struct Store {
    identities: HashMap<IdentityId, Identity>,
    ids_by_email: HashMap<String, IdentityId>,
}

/// Process-local credential store.
///
/// The email check and the insert happen under one write lock, so concurrent
/// registrations of the same email admit exactly one.
#[derive(Clone, Default)]
pub struct InMemoryIdentityRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.identities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut store = self.store.write().await;

        if store.ids_by_email.contains_key(identity.email.as_str()) {
            return Err(IdentityError::EmailTaken);
        }

        store
            .ids_by_email
            .insert(identity.email.as_str().to_string(), identity.id);
        store.identities.insert(identity.id, identity.clone());

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self.store.read().await.identities.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        let store = self.store.read().await;

        Ok(store
            .ids_by_email
            .get(email)
            .and_then(|id| store.identities.get(id))
            .cloned())
    }
}

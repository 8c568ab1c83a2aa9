use std::{path::PathBuf, sync::Arc};
use std::sync::atomic::{AtomicI32, Ordering};

use sea_orm::{ActiveModelTrait, ActiveValue, Iterable, Set, TryIntoModel};

use models::customer;

use crate::customer::domain::Customer;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Map-backed store keyed by id, in memory or persisted to a JSON file.
///
/// Ids come from a counter seeded with the largest stored id and are never
/// handed out twice by one process.
pub struct MapCustomerRepository {
    store: Arc<JsonMapStore<i32, Customer>>,
    last_id: AtomicI32,
}

impl MapCustomerRepository {
    pub async fn new(store: Arc<JsonMapStore<i32, Customer>>) -> Self {
        let last_id = store.last_key().await.unwrap_or(0).max(0);
        Self { store, last_id: AtomicI32::new(last_id) }
    }

    pub async fn in_memory() -> Self {
        Self::new(JsonMapStore::in_memory()).await
    }

    /// Load (or create) the JSON file at `path`.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self::new(JsonMapStore::new(path).await?).await)
    }

    fn allocate_id(&self) -> Result<i32, ServiceError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| ServiceError::Db("customer id space exhausted".into()))
    }
}

#[async_trait::async_trait]
impl CustomerRepository for MapCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn save(&self, customer: customer::ActiveModel) -> Result<Customer, ServiceError> {
        match customer.id.clone() {
            ActiveValue::NotSet => {
                self.store
                    .update_map(|m| {
                        let mut am = customer;
                        let id = self.allocate_id()?;
                        am.id = Set(id);
                        let model = am.try_into_model().map_err(ServiceError::db)?;
                        m.insert(id, model.clone());
                        Ok(model)
                    })
                    .await
            }
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => {
                self.store
                    .update_map(|m| {
                        let existing = m
                            .get(&id)
                            .cloned()
                            .ok_or_else(|| ServiceError::Db("record not updated".into()))?;
                        // only Set columns overwrite the stored row
                        let mut merged: customer::ActiveModel = existing.into();
                        for col in customer::Column::iter() {
                            if let ActiveValue::Set(v) = customer.get(col) {
                                merged.set(col, v);
                            }
                        }
                        let model = merged.try_into_model().map_err(ServiceError::db)?;
                        m.insert(id, model.clone());
                        Ok(model)
                    })
                    .await
            }
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.store.remove(&id).await?;
        Ok(())
    }
}

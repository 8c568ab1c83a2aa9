use async_trait::async_trait;

use models::customer;

use super::domain::Customer;
use crate::errors::ServiceError;

/// Persistence contract for customers.
///
/// `save` inserts when the model's `id` is `NotSet` (the store assigns the id)
/// and updates the row with that id otherwise. Deleting an unknown id is not
/// an error.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError>;
    async fn save(&self, customer: customer::ActiveModel) -> Result<Customer, ServiceError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError>;
}

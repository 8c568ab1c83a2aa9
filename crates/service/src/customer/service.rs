use std::sync::Arc;
use tracing::{info, instrument};

use models::customer;

use super::domain::{Customer, CustomerRequest};
use super::repository::CustomerRepository;
use crate::errors::ServiceError;

/// Customer business service independent of web framework and store.
pub struct CustomerService<R: CustomerRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CustomerService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All customers in the store's iteration order.
    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.find_all().await
    }

    /// Store a new customer from the request values; the store picks the id.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CustomerRequest) -> Result<Customer, ServiceError> {
        let created = self.repo.save(input.into_new_customer()).await?;
        info!(customer_id = created.id, "customer_created");
        Ok(created)
    }

    /// Overwrite the fields present in `input` on an existing customer.
    ///
    /// Fails with [`ServiceError::CustomerNotFound`] for an unknown id; nothing
    /// is written in that case.
    #[instrument(skip(self, input), fields(customer_id = id))]
    pub async fn update(&self, id: i32, input: CustomerRequest) -> Result<Customer, ServiceError> {
        let mut am: customer::ActiveModel = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::CustomerNotFound(id))?
            .into();
        input.apply_to(&mut am);
        let updated = self.repo.save(am).await?;
        info!(customer_id = id, "customer_updated");
        Ok(updated)
    }

    /// Delete by id without checking existence first.
    #[instrument(skip(self), fields(customer_id = id))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.repo.delete_by_id(id).await?;
        info!(customer_id = id, "customer_deleted");
        Ok(())
    }
}

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder};

use models::customer;

use crate::customer::domain::Customer;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

/// PostgreSQL-backed store. Rows come back in primary key order.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, ServiceError> {
        customer::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)
    }

    async fn save(&self, customer: customer::ActiveModel) -> Result<Customer, ServiceError> {
        match customer.id {
            ActiveValue::NotSet => customer.insert(&self.db).await.map_err(ServiceError::db),
            _ => customer.update(&self.db).await.map_err(ServiceError::db),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        customer::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        Ok(())
    }
}

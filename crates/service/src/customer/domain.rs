use sea_orm::Set;
use serde::{Deserialize, Serialize};

use models::customer;

/// Stored customer record.
pub type Customer = customer::Model;

/// Body of create and update requests.
///
/// Absent and `null` fields both decode to `None`. On update `None` means
/// "keep the stored value"; on create it stores `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl CustomerRequest {
    /// Unsaved customer carrying the request values verbatim.
    pub fn into_new_customer(self) -> customer::ActiveModel {
        customer::new_active(self.name, self.email, self.age)
    }

    /// Overwrite only the fields present in the request.
    pub fn apply_to(self, am: &mut customer::ActiveModel) {
        if let Some(name) = self.name { am.name = Set(Some(name)); }
        if let Some(email) = self.email { am.email = Set(Some(email)); }
        if let Some(age) = self.age { am.age = Set(Some(age)); }
    }
}

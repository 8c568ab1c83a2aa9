//! Service layer for customer records.
//! - `customer`: repository abstraction, its stores and the business service.
//! - `storage`: reusable map store persisted as JSON.

pub mod errors;
pub mod customer;
pub mod storage;
#[cfg(test)]
pub mod test_support;

//! Customer module: domain types, repository abstraction with its stores, and the service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Customer, CustomerRequest};
pub use repository::CustomerRepository;
pub use service::CustomerService;

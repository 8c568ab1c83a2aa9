pub mod db;
pub mod customer;

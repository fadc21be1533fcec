//! Framework-independent catalog, content, account and order entities.

pub mod account;
pub mod auth;
pub mod blog;
pub mod category;
pub mod gallery;
pub mod order;
pub mod product;
pub mod review;
pub mod stats;
pub mod types;
pub mod variation;

//! Diesel row types and their conversions into domain entities.

pub mod account;
pub mod blog;
pub mod category;
pub mod config;
pub mod gallery;
pub mod order;
pub mod product;
pub mod review;
pub mod variation;

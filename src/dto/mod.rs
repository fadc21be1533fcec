//! View-models handed to Tera templates.

pub mod blog;
pub mod product;

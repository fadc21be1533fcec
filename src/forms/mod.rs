//! Form payloads submitted by browsers, validated before reaching services.

pub mod admin;
pub mod reviews;

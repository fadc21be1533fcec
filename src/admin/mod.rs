//! Presentation helpers for the admin screens: coloured badges and the
//! generic list table they are rendered into.

pub mod badges;
pub mod tables;

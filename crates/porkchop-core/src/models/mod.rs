//! Data models for bill processing.

pub mod bill;
pub mod comparison;
pub mod config;
pub mod score;

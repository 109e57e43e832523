//! Route handlers: HTML record pages, JSON search and health.

pub mod health;
pub mod records;
pub mod search;

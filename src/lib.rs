//! Terminal administrative console for HR and operations data.
//!
//! Server-driven lists with offset and keyset pagination, a debounced text
//! filter, and a lazily loaded organization tree for assignments.

pub mod api;
pub mod app;
pub mod config;
pub mod debounce;
pub mod error;
pub mod events;
pub mod list;
pub mod logger;
pub mod pagination;
pub mod state;
pub mod tree;
pub mod ui;

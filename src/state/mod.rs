//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, Focus, ListFocus)
//! - Sidebar groups and the assignment page
//! - Toast notifications and state error handling

mod assignment;
mod error;
mod navigation;
mod notice;
mod sidebar;

pub use assignment::AssignmentPage;
pub use error::StateError;
pub use navigation::{Focus, ListFocus, View};
pub use notice::{Toast, ToastKind, TOAST_DURATION};
pub use sidebar::{MenuGroup, Sidebar, SidebarEntry};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;

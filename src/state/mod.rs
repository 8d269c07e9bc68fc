/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The gallery page's transitions and request tokens (gallery.rs)

pub mod data;
pub mod gallery;

pub use gallery::Gallery;

/// State management module
///
/// This module handles all application state:
/// - Shared data structures (data.rs)
/// - The fetch/save controller and its observable fields (controller.rs)

pub mod controller;
pub mod data;

pub use controller::CatController;

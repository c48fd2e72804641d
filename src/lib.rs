//! Fetch a random cat, show it, and keep a copy in the pictures folder.
//!
//! The binary in `main.rs` is the iced front end; everything it drives
//! lives here so it can be tested without a window.

pub mod config;
pub mod error;
pub mod logging;
pub mod net;
pub mod state;
pub mod storage;
pub mod ui;

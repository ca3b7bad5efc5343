//! Flapboard TUI - Terminal surface for the split-flap engine
//!
//! This crate draws a [`flapboard_core::FlapEngine`] in the terminal and
//! feeds it from the keyboard: a rotation of messages, a loading toggle, and
//! the purely visual board finish and tile size.
//!
//! # Architecture
//!
//! - **App**: event loop, owns the engine and the single tick deadline
//! - **BoardWidget**: ratatui widget painting tiles from cell views
//! - **Theme**: terminal colors for flaps, swatches and chrome
//! - **Messages**: the message deck and command line unescaping

pub mod app;
pub mod board_widget;
pub mod messages;
pub mod theme;

pub use app::App;
pub use board_widget::BoardWidget;
pub use messages::MessageDeck;

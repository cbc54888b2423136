//! UI layer for the roster window: app shell and card widgets.

pub mod app;
pub mod widgets;

pub use app::RosterApp;

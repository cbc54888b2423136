//! Controller layer: UI events, reducer dispatch, and command orchestration.

pub mod events;
pub mod orchestration;

//! Bridge between the egui thread and the backend worker that talks to the service.

pub mod commands;
pub mod runtime;

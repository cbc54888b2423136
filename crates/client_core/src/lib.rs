//! Client core for the student roster: validation, the roster reducer, the
//! remote gateway and the session that ties them together.

pub mod config;
pub mod error;
pub mod gateway;
pub mod roster;
pub mod session;
pub mod validation;

pub use error::{FailureKind, GatewayError};
pub use gateway::{run_effect, GraphqlGateway, MissingStudentGateway, StudentGateway};
pub use roster::{
    RemoteEffect, RosterAction, RosterState, SubmissionPhase, SubmitKind, Transition,
};
pub use session::RosterSession;
pub use validation::{validate_draft, ValidationError};

use std::sync::Arc;

use config::Settings;

/// Builds the gateway described by `settings`.
pub fn gateway_from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn StudentGateway>> {
    let endpoint = settings.endpoint_url()?;
    Ok(Arc::new(GraphqlGateway::new(
        endpoint,
        settings.api_key.clone(),
    )))
}

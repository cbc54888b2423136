use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::{Student, StudentDraft, StudentId},
    error::ApiError,
    protocol::{
        create_student_mutation, delete_student_mutation, list_students_query,
        update_student_mutation, CreateStudentData, CreateStudentInput, DeleteStudentData,
        DeleteStudentInput, GraphqlRequest, GraphqlResponse, ListStudentsData, MutationVariables,
        NoVariables, UpdateStudentData, UpdateStudentInput,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    error::GatewayError,
    roster::{RemoteEffect, RosterAction, SubmitKind},
};

pub const API_KEY_HEADER: &str = "x-api-key";

/// The four remote operations. Each call is a single attempt.
#[async_trait]
pub trait StudentGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<Student>, GatewayError>;
    async fn create(&self, draft: &StudentDraft) -> Result<Student, GatewayError>;
    async fn update(&self, draft: &StudentDraft) -> Result<Student, GatewayError>;
    async fn delete(&self, id: &StudentId) -> Result<(), GatewayError>;
}

pub struct MissingStudentGateway {
    reason: String,
}

impl MissingStudentGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> GatewayError {
        GatewayError::Transport(format!("student service unavailable: {}", self.reason))
    }
}

#[async_trait]
impl StudentGateway for MissingStudentGateway {
    async fn list(&self) -> Result<Vec<Student>, GatewayError> {
        Err(self.unavailable())
    }

    async fn create(&self, _draft: &StudentDraft) -> Result<Student, GatewayError> {
        Err(self.unavailable())
    }

    async fn update(&self, _draft: &StudentDraft) -> Result<Student, GatewayError> {
        Err(self.unavailable())
    }

    async fn delete(&self, _id: &StudentId) -> Result<(), GatewayError> {
        Err(self.unavailable())
    }
}

/// Talks to a GraphQL endpoint over HTTP POST.
pub struct GraphqlGateway {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl GraphqlGateway {
    pub fn new(endpoint: Url, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_key,
        }
    }

    async fn execute<V, T>(
        &self,
        operation: &str,
        query: String,
        variables: V,
    ) -> Result<T, GatewayError>
    where
        V: Serialize + Send + Sync,
        T: DeserializeOwned,
    {
        debug!(operation, endpoint = %self.endpoint, "graphql request");
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphqlRequest { query, variables });
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(operation, status = status.as_u16(), "graphql request rejected");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Errors may come with a partially null `data`, so the payload is only
        // decoded into `T` once the error list is known to be empty.
        let body: GraphqlResponse<Value> = response
            .json()
            .await
            .map_err(|err| GatewayError::Decode(err.to_string()))?;
        if !body.errors.is_empty() {
            warn!(operation, errors = body.errors.len(), "graphql errors in response");
            return Err(GatewayError::Server(
                body.errors.into_iter().map(ApiError::from).collect(),
            ));
        }
        let data = body.data.filter(|data| !data.is_null()).ok_or_else(|| {
            GatewayError::Decode(format!("{operation}: response carried no data"))
        })?;
        serde_json::from_value(data)
            .map_err(|err| GatewayError::Decode(format!("{operation}: {err}")))
    }
}

#[async_trait]
impl StudentGateway for GraphqlGateway {
    async fn list(&self) -> Result<Vec<Student>, GatewayError> {
        let data: ListStudentsData = self
            .execute("listStudents", list_students_query(), NoVariables::default())
            .await?;
        if data.list_students.next_token.is_some() {
            debug!("listStudents returned a continuation token; only the first page is shown");
        }
        Ok(data.list_students.items)
    }

    async fn create(&self, draft: &StudentDraft) -> Result<Student, GatewayError> {
        let data: CreateStudentData = self
            .execute(
                "createStudent",
                create_student_mutation(),
                MutationVariables {
                    input: CreateStudentInput::from(draft),
                },
            )
            .await?;
        Ok(data.create_student)
    }

    async fn update(&self, draft: &StudentDraft) -> Result<Student, GatewayError> {
        let id = draft.id.clone().ok_or(GatewayError::MissingId("updated"))?;
        let data: UpdateStudentData = self
            .execute(
                "updateStudent",
                update_student_mutation(),
                MutationVariables {
                    input: UpdateStudentInput::new(id, draft),
                },
            )
            .await?;
        Ok(data.update_student)
    }

    async fn delete(&self, id: &StudentId) -> Result<(), GatewayError> {
        let _: DeleteStudentData = self
            .execute(
                "deleteStudent",
                delete_student_mutation(),
                MutationVariables {
                    input: DeleteStudentInput { id: id.clone() },
                },
            )
            .await?;
        Ok(())
    }
}

/// Runs one effect against the gateway and reports the outcome as the action
/// the reducer expects next.
pub async fn run_effect(gateway: &dyn StudentGateway, effect: RemoteEffect) -> RosterAction {
    match effect {
        RemoteEffect::Reload => match gateway.list().await {
            Ok(students) => RosterAction::Loaded(students),
            Err(err) => {
                warn!("failed to load students: {err}");
                RosterAction::LoadFailed(err.kind())
            }
        },
        RemoteEffect::Create(draft) => submit(gateway, SubmitKind::Create, &draft).await,
        RemoteEffect::Update(draft) => submit(gateway, SubmitKind::Update, &draft).await,
        RemoteEffect::Delete(id) => match gateway.delete(&id).await {
            Ok(()) => RosterAction::DeleteSucceeded(id),
            Err(err) => {
                warn!(%id, "failed to delete student: {err}");
                RosterAction::DeleteFailed {
                    id,
                    failure: err.kind(),
                }
            }
        },
    }
}

async fn submit(
    gateway: &dyn StudentGateway,
    kind: SubmitKind,
    draft: &StudentDraft,
) -> RosterAction {
    let result = match kind {
        SubmitKind::Create => gateway.create(draft).await,
        SubmitKind::Update => gateway.update(draft).await,
    };
    match result {
        Ok(student) => RosterAction::SubmitSucceeded { kind, student },
        Err(err) => {
            warn!(?kind, "failed to submit student: {err}");
            RosterAction::SubmitFailed {
                kind,
                failure: err.kind(),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;

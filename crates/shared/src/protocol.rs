//! GraphQL wire format for the student roster service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Student, StudentDraft, StudentId};

const STUDENT_FIELDS: &str = "id name mark1 mark2 createdAt updatedAt";

pub fn list_students_query() -> String {
    format!(
        "query ListStudents($filter: ModelStudentFilterInput, $limit: Int, $nextToken: String) {{ \
         listStudents(filter: $filter, limit: $limit, nextToken: $nextToken) {{ \
         items {{ {STUDENT_FIELDS} }} nextToken }} }}"
    )
}

pub fn create_student_mutation() -> String {
    format!(
        "mutation CreateStudent($input: CreateStudentInput!) {{ \
         createStudent(input: $input) {{ {STUDENT_FIELDS} }} }}"
    )
}

pub fn update_student_mutation() -> String {
    format!(
        "mutation UpdateStudent($input: UpdateStudentInput!) {{ \
         updateStudent(input: $input) {{ {STUDENT_FIELDS} }} }}"
    )
}

pub fn delete_student_mutation() -> String {
    "mutation DeleteStudent($input: DeleteStudentInput!) { deleteStudent(input: $input) { id } }"
        .to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlRequest<V> {
    pub query: String,
    pub variables: V,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlErrorEntry {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationVariables<I> {
    pub input: I,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentInput {
    pub name: String,
    pub mark1: Value,
    pub mark2: Value,
}

impl From<&StudentDraft> for CreateStudentInput {
    fn from(draft: &StudentDraft) -> Self {
        Self {
            name: draft.name.clone(),
            mark1: mark_value(&draft.mark1),
            mark2: mark_value(&draft.mark2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentInput {
    pub id: StudentId,
    pub name: String,
    pub mark1: Value,
    pub mark2: Value,
}

impl UpdateStudentInput {
    pub fn new(id: StudentId, draft: &StudentDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            mark1: mark_value(&draft.mark1),
            mark2: mark_value(&draft.mark2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStudentInput {
    pub id: StudentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentConnection {
    pub items: Vec<Student>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsData {
    pub list_students: StudentConnection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentData {
    pub create_student: Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentData {
    pub update_student: Student,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedStudent {
    pub id: StudentId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStudentData {
    pub delete_student: Option<DeletedStudent>,
}

/// Numeric marks travel as JSON numbers; anything else is forwarded as text
/// so the service reports the type mismatch.
pub fn mark_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_marks_as_numbers_when_possible() {
        assert_eq!(mark_value("50"), Value::from(50));
        assert_eq!(mark_value(" 7 "), Value::from(7));
        assert_eq!(mark_value("99.5"), Value::from(99.5));
        assert_eq!(mark_value("abc"), Value::String("abc".to_string()));
    }

    #[test]
    fn create_request_serializes_input_envelope() {
        let draft = StudentDraft::new("Anna", "50", "60");
        let request = GraphqlRequest {
            query: create_student_mutation(),
            variables: MutationVariables {
                input: CreateStudentInput::from(&draft),
            },
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json["variables"]["input"],
            serde_json::json!({ "name": "Anna", "mark1": 50, "mark2": 60 })
        );
        assert!(json["query"]
            .as_str()
            .expect("query text")
            .contains("createStudent(input: $input)"));
    }

    #[test]
    fn decodes_list_response_with_errors_and_null_data() {
        let response: GraphqlResponse<ListStudentsData> = serde_json::from_str(
            r#"{"data":null,"errors":[{"message":"Not Authorized","errorType":"Unauthorized"}]}"#,
        )
        .expect("decode");

        assert!(response.data.is_none());
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].error_type.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn decodes_list_items() {
        let response: GraphqlResponse<ListStudentsData> = serde_json::from_str(
            r#"{"data":{"listStudents":{"items":[{"id":"1","name":"Anna","mark1":50,"mark2":60}],"nextToken":null}}}"#,
        )
        .expect("decode");

        let data = response.data.expect("data");
        assert_eq!(data.list_students.items.len(), 1);
        assert_eq!(data.list_students.items[0].name, "Anna");
        assert!(response.errors.is_empty());
    }

    #[test]
    fn one_record_with_a_null_mark_keeps_the_list() {
        let response: GraphqlResponse<ListStudentsData> = serde_json::from_str(
            r#"{"data":{"listStudents":{"items":[{"id":"1","name":"Anna","mark1":50,"mark2":60},{"id":"2","name":"Bert","mark1":null,"mark2":70}]}}}"#,
        )
        .expect("decode");

        let items = response.data.expect("data").list_students.items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].mark1, "");
        assert_eq!(items[1].mark2, "70");
    }

    #[test]
    fn missing_data_field_decodes_as_none() {
        let response: GraphqlResponse<ListStudentsData> =
            serde_json::from_str(r#"{"errors":[{"message":"boom"}]}"#).expect("decode");

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "boom");
    }
}

//! Submission relay: forwards an idea to the workflow engine.
//!
//! The engine was built around a hosted form product, so each submission is
//! wrapped in that product's form-response envelope with the same question
//! keys, labels, and field types. One POST per submission; no retry.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use ideate_config::WorkflowConfig;
use ideate_core::entities::IdeaInput;

use crate::error::RelayError;
use crate::http::{build_client, check_response};

const FORM_ID: &str = "custom";
const FORM_NAME: &str = "InspirAI Custom Form";
const CONSENT_OPTION_ID: &str = "107bdc99-f188-4158-8ade-8373b6f95c32";
const CONSENT_TEXT: &str = "I agree to let my idea be used for improving the AI Ideator MVP.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Dropdown,
    InputText,
    Textarea,
    InputNumber,
    InputDate,
    FileUpload,
    InputEmail,
    Checkboxes,
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponseData {
    pub response_id: String,
    pub submission_id: String,
    pub respondent_id: String,
    pub form_id: String,
    pub form_name: String,
    pub created_at: String,
    pub fields: Vec<FormField>,
}

/// The envelope the workflow engine's webhook expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponseEnvelope {
    pub event_id: String,
    pub event_type: String,
    pub created_at: String,
    pub data: FormResponseData,
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string().chars().take(7).collect()
}

fn field(key: &str, label: &str, field_type: FieldType, value: Value) -> FormField {
    FormField {
        key: key.into(),
        label: label.into(),
        field_type,
        value,
        options: None,
    }
}

/// Translate a submission into the engine's envelope.
#[must_use]
pub fn build_envelope(input: &IdeaInput, now: DateTime<Utc>) -> FormResponseEnvelope {
    let created_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let consent_value = if input.consent {
        json!([CONSENT_OPTION_ID])
    } else {
        json!([])
    };

    let mut domain = field(
        "question_oG9bQX",
        "What is the domain you are focusing on?",
        FieldType::Dropdown,
        json!([input.domain]),
    );
    domain.options = Some(Vec::new());

    let mut consent = field(
        "question_jPeaY6",
        "Consent",
        FieldType::Checkboxes,
        consent_value,
    );
    consent.options = Some(vec![json!({ "id": CONSENT_OPTION_ID, "text": CONSENT_TEXT })]);

    let fields = vec![
        domain,
        field(
            "question_Glexy2",
            "If \"Other\", please specify your domain",
            FieldType::InputText,
            json!(input.other_domain.as_deref().filter(|d| !d.is_empty())),
        ),
        field(
            "question_OGQDyp",
            "What is the motivation behind this idea?",
            FieldType::Textarea,
            json!(input.motivation),
        ),
        field(
            "question_VJpLAE",
            "Describe your idea",
            FieldType::Textarea,
            json!(input.idea),
        ),
        field(
            "question_PORded",
            "How confident are you about this idea on a scale of 10?",
            FieldType::InputNumber,
            json!(input.confidence),
        ),
        field(
            "question_EWqkEq",
            "Deadline or goal date (optional)",
            FieldType::InputDate,
            json!(input.deadline.as_deref().filter(|d| !d.is_empty())),
        ),
        field(
            "question_rPDj15",
            "Upload optional voice note or any relevant files",
            FieldType::FileUpload,
            Value::Null,
        ),
        field(
            "question_4ra4yB",
            "Email address",
            FieldType::InputEmail,
            json!(input.email),
        ),
        consent,
        field(
            &format!("question_jPeaY6_{CONSENT_OPTION_ID}"),
            &format!("Consent ({CONSENT_TEXT})"),
            FieldType::Checkboxes,
            json!(input.consent),
        ),
    ];

    FormResponseEnvelope {
        event_id: Uuid::new_v4().to_string(),
        event_type: "FORM_RESPONSE".into(),
        created_at: created_at.clone(),
        data: FormResponseData {
            response_id: short_id(),
            submission_id: short_id(),
            respondent_id: short_id(),
            form_id: FORM_ID.into(),
            form_name: FORM_NAME.into(),
            created_at,
            fields,
        },
    }
}

/// Client for the workflow engine's webhook.
pub struct WorkflowClient {
    http: reqwest::Client,
    webhook_url: String,
}

impl WorkflowClient {
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &WorkflowConfig) -> Result<Self, RelayError> {
        Ok(Self {
            http: build_client(&config.user_agent, config.timeout_secs)?,
            webhook_url: config.webhook_url.clone(),
        })
    }

    /// Forward one submission. Exactly one POST is issued.
    ///
    /// # Errors
    ///
    /// [`RelayError::Upstream`] with the upstream status and body on a
    /// non-success answer, [`RelayError::Http`] on transport failure.
    pub async fn submit(&self, input: &IdeaInput) -> Result<(), RelayError> {
        let envelope = build_envelope(input, Utc::now());
        tracing::info!(
            event_id = %envelope.event_id,
            owner = %input.email,
            "forwarding submission to workflow engine"
        );

        let resp = self.http.post(&self.webhook_url).json(&envelope).send().await?;
        let status = resp.status().as_u16();
        check_response(resp).await.inspect_err(|e| {
            tracing::error!(
                event_id = %envelope.event_id,
                error = %e,
                "workflow engine rejected submission"
            );
        })?;

        tracing::debug!(event_id = %envelope.event_id, status, "submission accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn input(consent: bool) -> IdeaInput {
        serde_json::from_value(json!({
            "domain": "Other",
            "otherDomain": "Agritech",
            "motivation": "Farmers lose crops to late irrigation",
            "idea": "Cheap soil moisture sensors",
            "confidence": "8",
            "email": "student@example.edu",
            "consent": consent
        }))
        .unwrap()
    }

    #[test]
    fn envelope_has_expected_shape() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let envelope = build_envelope(&input(true), now);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["eventType"], "FORM_RESPONSE");
        assert_eq!(value["createdAt"], "2026-03-01T12:00:00.000Z");
        assert_eq!(value["data"]["formName"], FORM_NAME);
        assert_eq!(value["data"]["responseId"].as_str().unwrap().len(), 7);

        let fields = value["data"]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 10);
        assert_eq!(fields[0]["type"], "DROPDOWN");
        assert_eq!(fields[0]["value"], json!(["Other"]));
        assert_eq!(fields[1]["value"], "Agritech");
        assert_eq!(fields[4]["type"], "INPUT_NUMBER");
        assert_eq!(fields[4]["value"], 8);
        assert_eq!(fields[5]["value"], Value::Null);
        assert_eq!(fields[7]["value"], "student@example.edu");
        assert_eq!(fields[8]["value"], json!([CONSENT_OPTION_ID]));
        assert_eq!(fields[9]["value"], true);
        assert!(fields[2].get("options").is_none());
    }

    #[test]
    fn no_consent_sends_empty_selection() {
        let envelope = build_envelope(&input(false), Utc::now());
        let consent = &envelope.data.fields[8];
        assert_eq!(consent.value, json!([]));
        assert_eq!(envelope.data.fields[9].value, json!(false));
    }

    #[test]
    fn ids_are_fresh_per_envelope() {
        let a = build_envelope(&input(true), Utc::now());
        let b = build_envelope(&input(true), Utc::now());
        assert_ne!(a.event_id, b.event_id);
        assert_ne!(a.data.submission_id, b.data.submission_id);
    }
}

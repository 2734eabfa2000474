//! Write operations against the content backend.
//!
//! The only mutation this site performs is recording form submissions.
//! Failures are logged and reported as `None`; the route layer maps that to
//! a 500 without naming the backend.

use serde_json::{Value, json};

use crate::store::ContentStore;

/// Reference to a freshly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct CreatedRecord {
    pub id: i64,
}

/// Record a submission against a form definition.
pub async fn create_form_submission(
    store: &ContentStore,
    form_id: i64,
    data: Value,
) -> Option<CreatedRecord> {
    create_submission_record(
        store,
        "create_form_submission",
        json!({
            "form": form_id,
            "data": data,
            "status": "pending",
        }),
    )
    .await
}

/// Record a free-standing contact submission (not linked to a form).
pub async fn create_contact_submission(
    store: &ContentStore,
    name: &str,
    email: &str,
    message: &str,
    phone: Option<&str>,
) -> Option<CreatedRecord> {
    create_submission_record(
        store,
        "create_contact_submission",
        json!({
            "form": null,
            "data": {
                "name": name,
                "email": email,
                "phone": phone,
                "message": message,
            },
            "status": "pending",
        }),
    )
    .await
}

async fn create_submission_record(
    store: &ContentStore,
    context: &str,
    payload: Value,
) -> Option<CreatedRecord> {
    match store.backend().create("form_submissions", payload).await {
        Ok(record) => match serde_json::from_value(record) {
            Ok(created) => Some(created),
            Err(e) => {
                tracing::error!(context, error = %e, "created record failed to decode");
                None
            }
        },
        Err(e) => {
            tracing::error!(context, error = %e, "content backend request failed");
            None
        }
    }
}

//! Form definitions fetched for `block_form` sections.

use serde::{Deserialize, Serialize};

use crate::content::de_null_vec;

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Textarea,
    Select,
    Checkbox,
    Radio,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// One field of a form definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    pub id: i64,
    pub label: String,
    pub field_type: FieldType,
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub sort: Option<i64>,
}

/// A form definition: field list plus submit behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub submit_button_text: Option<String>,
    pub success_message: Option<String>,
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub email_notifications: bool,
    pub notification_email: Option<String>,
    #[serde(default, deserialize_with = "de_null_vec")]
    pub fields: Vec<FormField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_decodes_with_fields() {
        let json = r#"{
            "id": 9,
            "name": "Booking",
            "slug": "booking",
            "submit_button_text": "Book now",
            "fields": [
                {"id": 1, "label": "Name", "field_type": "text", "required": true},
                {"id": 2, "label": "Email", "field_type": "email"},
                {"id": 3, "label": "Topic", "field_type": "select",
                 "options": [{"label": "Checkup", "value": "checkup"}]}
            ]
        }"#;
        let form: Form = serde_json::from_str(json).expect("decode form");
        assert_eq!(form.fields.len(), 3);
        assert!(form.fields[0].required);
        assert_eq!(form.fields[2].field_type, FieldType::Select);
        assert_eq!(form.fields[2].options.len(), 1);
    }

    #[test]
    fn test_form_tolerates_null_fields() {
        let form: Form = serde_json::from_str(
            r#"{"id": 9, "name": "Empty", "slug": "empty", "fields": null}"#,
        )
        .expect("decode form");
        assert!(form.fields.is_empty());
    }
}

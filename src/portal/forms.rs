//! Form payloads posted by the portal pages.
//!
//! Field names on the wire are the backend's camelCase names. No field is
//! validated here; the backend owns validation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_INQUIRY_TYPE: &str = "General Inquiry";

fn default_inquiry_type() -> String {
    DEFAULT_INQUIRY_TYPE.to_string()
}

/// An empty inquiry type counts as unset.
fn inquiry_type_or_default(value: &str) -> &str {
    if value.is_empty() { DEFAULT_INQUIRY_TYPE } else { value }
}

fn serialize_inquiry_type<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(inquiry_type_or_default(value))
}

fn deserialize_inquiry_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(inquiry_type_or_default(&value).to_string())
}

/// `POST /contact`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(
        rename = "type",
        default = "default_inquiry_type",
        serialize_with = "serialize_inquiry_type",
        deserialize_with = "deserialize_inquiry_type"
    )]
    pub inquiry_type: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            inquiry_type: default_inquiry_type(),
            message: message.into(),
        }
    }

    pub fn with_type(mut self, inquiry_type: impl Into<String>) -> Self {
        let inquiry_type: String = inquiry_type.into();
        self.inquiry_type = inquiry_type_or_default(&inquiry_type).to_string();
        self
    }
}

/// `POST /academy/partnership`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnershipForm {
    pub college_name: String,
    pub email: String,
    pub phone: String,
}

/// `POST /careers/apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub job_role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_type_defaults_when_missing() {
        let form: ContactForm = serde_json::from_value(json!({
            "name": "Asha",
            "email": "asha@example.org",
            "message": "Hello"
        }))
        .unwrap();
        assert_eq!(form.inquiry_type, DEFAULT_INQUIRY_TYPE);
        assert_eq!(serde_json::to_value(&form).unwrap()["type"], "General Inquiry");
    }

    #[test]
    fn contact_empty_or_null_type_gets_default() {
        for raw in [json!(""), json!(null)] {
            let form: ContactForm = serde_json::from_value(json!({
                "name": "Asha",
                "email": "asha@example.org",
                "type": raw,
                "message": "Hello"
            }))
            .unwrap();
            assert_eq!(form.inquiry_type, DEFAULT_INQUIRY_TYPE);
        }

        let form = ContactForm::new("Asha", "asha@example.org", "Hello").with_type("");
        assert_eq!(form.inquiry_type, DEFAULT_INQUIRY_TYPE);

        let mut form = ContactForm::new("Asha", "asha@example.org", "Hello");
        form.inquiry_type.clear();
        assert_eq!(serde_json::to_value(&form).unwrap()["type"], "General Inquiry");

        let form = form.with_type("Partnership");
        assert_eq!(serde_json::to_value(&form).unwrap()["type"], "Partnership");
    }

    #[test]
    fn partnership_uses_camel_case() {
        let form = PartnershipForm {
            college_name: "City College".into(),
            email: "dean@city.edu".into(),
            phone: "+91 99999 00000".into(),
        };
        let v = serde_json::to_value(&form).unwrap();
        assert_eq!(v["collegeName"], "City College");
        assert!(v.get("college_name").is_none());
    }

    #[test]
    fn career_optional_links_omitted() {
        let app = CareerApplication {
            name: "Ravi".into(),
            email: "ravi@example.org".into(),
            resume_link: None,
            cover_letter: Some("Keen on ML".into()),
            job_role: "ML Engineer".into(),
        };
        let v = serde_json::to_value(&app).unwrap();
        assert_eq!(v["jobRole"], "ML Engineer");
        assert_eq!(v["coverLetter"], "Keen on ML");
        assert!(v.get("resumeLink").is_none());
    }
}

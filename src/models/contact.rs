use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub ip_address: String,
    #[serde(serialize_with = "super::serialize_timestamp")]
    pub timestamp: i64,
    pub read: bool,
}

/// Contact form as submitted. Fields are taken verbatim; a missing field is
/// rejected by the storage layer, not here.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// Build a form from decoded key/value pairs. The first value of a
    /// repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "message" => &mut form.message,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }
}

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub ip_address: String,
    pub timestamp: i64,
}

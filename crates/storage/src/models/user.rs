use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user referenced by a competition as delegate or organizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
    pub wca_id: Option<String>,
    pub country_iso2: Option<String>,
    #[serde(skip_serializing)]
    pub email: Option<String>,
}

impl UserRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            wca_id: None,
            country_iso2: None,
            email: None,
        }
    }

    pub fn with_wca_id(mut self, wca_id: impl Into<String>) -> Self {
        self.wca_id = Some(wca_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

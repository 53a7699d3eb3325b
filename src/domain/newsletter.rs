use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

use crate::domain::{
    iso8601,
    EmailAddress,
};

/// A newsletter subscription. The email is unique across subscriptions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Newsletter {
    pub id: String,
    pub email: String,
    #[serde(with = "iso8601")]
    pub subscribed_at: DateTime<Utc>,
}

impl Newsletter {
    pub fn new(email: EmailAddress) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.as_ref().to_string(),
            subscribed_at: iso8601::now(),
        }
    }
}

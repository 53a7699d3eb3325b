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
    BoundedText,
    EmailAddress,
};

/// Workflow state of a contact form submission. Every submission starts as
/// `New`; the other states are set by the back office, not by this API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    InProgress,
    Completed,
    Closed,
}

pub type ContactName = BoundedText<255>;
pub type Company = BoundedText<255>;
pub type Phone = BoundedText<50>;
pub type Interest = BoundedText<100>;
pub type Message = BoundedText<5000>;

/// A validated contact form submission, not yet stored.
#[derive(Debug)]
pub struct NewContactForm {
    pub name: ContactName,
    pub email: EmailAddress,
    pub company: Option<Company>,
    pub phone: Option<Phone>,
    pub interest: Interest,
    pub message: Message,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub interest: String,
    pub message: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ContactStatus,
}

impl From<NewContactForm> for ContactForm {
    fn from(form: NewContactForm) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: form.name.into_inner(),
            email: form.email.as_ref().to_string(),
            company: form.company.map(BoundedText::into_inner),
            phone: form.phone.map(BoundedText::into_inner),
            interest: form.interest.into_inner(),
            message: form.message.into_inner(),
            created_at: iso8601::now(),
            status: ContactStatus::default(),
        }
    }
}

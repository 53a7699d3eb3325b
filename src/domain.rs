pub use bounded_text::BoundedText;
pub use contact_form::{
    Company,
    ContactForm,
    ContactName,
    ContactStatus,
    Interest,
    Message,
    NewContactForm,
    Phone,
};
pub use email_address::EmailAddress;
pub use errors::MalformedInput;
pub use newsletter::Newsletter;
pub use service_name::ServiceName;
pub use status_check::StatusCheck;

mod bounded_text;
mod contact_form;
mod email_address;
mod errors;
pub mod iso8601;
mod newsletter;
mod service_name;
mod status_check;

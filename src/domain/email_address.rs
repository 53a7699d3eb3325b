use std::convert::TryFrom;

use validator::validate_email;

use crate::domain::errors::MalformedInput;

const MAX_LENGTH: usize = 255;

/// A syntactically valid email address with a lowercased domain part.
#[derive(Clone, Debug, PartialEq)]
pub struct EmailAddress(String);

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = MalformedInput;

    fn try_from(email: String) -> Result<Self, Self::Error> {
        let email = email.trim();
        if email.is_empty() {
            return Err(MalformedInput::Blank);
        }
        let length = email.chars().count();
        if length > MAX_LENGTH {
            return Err(MalformedInput::TooLong {
                max: MAX_LENGTH,
                length,
            });
        }
        if !validate_email(email) {
            return Err(MalformedInput::InvalidEmail {
                email: email.to_string(),
            });
        }
        // validate_email guarantees exactly one usable `@` separator
        match email.rsplit_once('@') {
            Some((local, domain)) => Ok(Self(format!("{}@{}", local, domain.to_lowercase()))),
            None => Err(MalformedInput::InvalidEmail {
                email: email.to_string(),
            }),
        }
    }
}

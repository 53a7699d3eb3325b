use std::convert::TryFrom;

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::errors::MalformedInput;

/// Non-blank text of at most `MAX` graphemes.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedText<const MAX: usize>(String);

impl<const MAX: usize> BoundedText<MAX> {
    /// Parses an optional field: absent and blank values both map to `None`.
    pub fn parse_optional(value: Option<String>) -> Result<Option<Self>, MalformedInput> {
        match value {
            Some(text) if !text.trim().is_empty() => Self::try_from(text).map(Some),
            _ => Ok(None),
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const MAX: usize> TryFrom<String> for BoundedText<MAX> {
    type Error = MalformedInput;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(MalformedInput::Blank);
        }
        let length = text.graphemes(true).count();
        if length > MAX {
            Err(MalformedInput::TooLong { max: MAX, length })
        } else {
            Ok(Self(text))
        }
    }
}

impl<const MAX: usize> AsRef<str> for BoundedText<MAX> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

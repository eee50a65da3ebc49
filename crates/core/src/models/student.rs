use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AdvisingError, AdvisingResult};

/// Number of digits in a student identifier.
pub const STUDENT_ID_LEN: usize = 7;

/// A validated, fixed-length numeric student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Strips everything but digits from typed input.
    pub fn sanitize(input: &str) -> String {
        input.chars().filter(char::is_ascii_digit).collect()
    }

    /// Whether typed input already holds a full identifier, which triggers
    /// an automatic lookup.
    pub fn is_complete(input: &str) -> bool {
        Self::sanitize(input).len() == STUDENT_ID_LEN
    }

    pub fn parse(input: &str) -> AdvisingResult<Self> {
        let digits = Self::sanitize(input);
        if digits.len() != STUDENT_ID_LEN {
            return Err(AdvisingError::Validation(format!(
                "Student ID must have exactly {} digits, got {}",
                STUDENT_ID_LEN,
                digits.len()
            )));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StudentId {
    type Error = AdvisingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StudentId> for String {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

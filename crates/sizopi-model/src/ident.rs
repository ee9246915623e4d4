use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const USERNAME_MAX_LEN: usize = 64;
pub const EMAIL_MAX_LEN: usize = 128;
const ANIMAL_ID_MAX_LEN: usize = 64;

/// Primary identifier of an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("username must not be empty".to_string()));
        }
        if s.len() > USERNAME_MAX_LEN {
            return Err(ValidationError(format!(
                "username exceeds max length {USERNAME_MAX_LEN}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
        {
            return Err(ValidationError(
                "username may contain only ASCII letters, digits, '_', '.', '-'".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("email must not be empty".to_string()));
        }
        if s.len() > EMAIL_MAX_LEN {
            return Err(ValidationError(format!(
                "email exceeds max length {EMAIL_MAX_LEN}"
            )));
        }
        let Some((local, domain)) = s.split_once('@') else {
            return Err(ValidationError("email must contain '@'".to_string()));
        };
        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(ValidationError(format!("email is malformed: {s:?}")));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque animal identifier; minted server-side, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AnimalId(String);

impl AnimalId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("animal id must not be empty".to_string()));
        }
        if s.len() > ANIMAL_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "animal id exceeds max length {ANIMAL_ID_MAX_LEN}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AnimalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimalId, Email, Username};

    #[test]
    fn username_trims_and_validates_charset() {
        assert_eq!(Username::parse("  budi.s ").expect("valid").as_str(), "budi.s");
        assert!(Username::parse("").is_err());
        assert!(Username::parse("has space").is_err());
        assert!(Username::parse(&"x".repeat(65)).is_err());
    }

    #[test]
    fn email_requires_local_and_dotted_domain() {
        assert!(Email::parse("doc@zoo.test").is_ok());
        assert!(Email::parse("doc@zoo").is_err());
        assert!(Email::parse("@zoo.test").is_err());
        assert!(Email::parse("no-at-sign").is_err());
    }

    #[test]
    fn animal_id_is_opaque_but_bounded() {
        assert!(AnimalId::parse("7").is_ok());
        assert!(AnimalId::parse("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(AnimalId::parse("   ").is_err());
    }
}

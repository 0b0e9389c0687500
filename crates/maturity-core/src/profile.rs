//! Respondent identity collected at the gate

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identity fields the gate asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityField {
    Name,
    Email,
}

impl IdentityField {
    /// All fields in prompt order
    pub const ALL: [IdentityField; 2] = [IdentityField::Name, IdentityField::Email];

    /// Label shown next to the input
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }
}

impl Display for IdentityField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// Who is taking the assessment
///
/// Values are stored exactly as typed; trimming happens at the gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentProfile {
    pub name: String,
    pub email: String,
}

impl RespondentProfile {
    /// Create profile from both fields
    #[inline]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Read a field
    #[inline]
    #[must_use]
    pub fn field(&self, field: IdentityField) -> &str {
        match field {
            IdentityField::Name => &self.name,
            IdentityField::Email => &self.email,
        }
    }

    /// Overwrite a field
    #[inline]
    pub fn set(&mut self, field: IdentityField, value: impl Into<String>) {
        let value = value.into();
        match field {
            IdentityField::Name => self.name = value,
            IdentityField::Email => self.email = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_targets_one_field() {
        let mut profile = RespondentProfile::new("Jane", "jane@co.com");
        profile.set(IdentityField::Email, "j@example.org");
        assert_eq!(profile.field(IdentityField::Name), "Jane");
        assert_eq!(profile.field(IdentityField::Email), "j@example.org");
    }

    #[test]
    fn field_display_and_label() {
        assert_eq!(IdentityField::Name.to_string(), "name");
        assert_eq!(IdentityField::Email.label(), "Email");
    }
}

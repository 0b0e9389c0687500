//! Identity gate in front of the assessment

use crate::error::ValidationError;
use crate::profile::{IdentityField, RespondentProfile};
use serde::{Deserialize, Serialize};

/// Heading of the gate screen
pub const GATE_HEADING: &str = "Access the Free Assessment";

/// Prompt under the gate heading
pub const GATE_PROMPT: &str = "Enter your name and email to begin.";

/// True iff name and email are both non-empty after trimming
#[inline]
#[must_use]
pub fn admit(profile: &RespondentProfile) -> bool {
    missing_fields(profile).is_empty()
}

/// Identity fields that are blank after trimming, in prompt order
#[must_use]
pub fn missing_fields(profile: &RespondentProfile) -> Vec<IdentityField> {
    IdentityField::ALL
        .into_iter()
        .filter(|field| profile.field(*field).trim().is_empty())
        .collect()
}

/// How strictly the gate looks at the email field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPolicy {
    /// Non-empty is enough
    Presence,
    /// Must look like `local@domain.tld`
    #[default]
    Shape,
}

/// Gate validator with a configurable email policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gate {
    policy: EmailPolicy,
}

impl Gate {
    #[inline]
    #[must_use]
    pub const fn new(policy: EmailPolicy) -> Self {
        Self { policy }
    }

    #[inline]
    #[must_use]
    pub const fn policy(&self) -> EmailPolicy {
        self.policy
    }

    /// Decide whether `profile` may enter the assessment
    ///
    /// # Errors
    /// - `IncompleteIdentity` when [`admit`] would return false
    /// - `MalformedEmail` under [`EmailPolicy::Shape`] for an unshaped address
    pub fn check(&self, profile: &RespondentProfile) -> Result<(), ValidationError> {
        let missing = missing_fields(profile);
        if !missing.is_empty() {
            return Err(ValidationError::IncompleteIdentity { missing });
        }

        let email = profile.email.trim();
        if self.policy == EmailPolicy::Shape && !looks_like_email(email) {
            return Err(ValidationError::MalformedEmail {
                email: email.to_string(),
            });
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

//! Trip member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// A person on the trip roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Identity issued by the account system
    pub id: MemberId,

    /// Name shown in tables and settlement plans
    pub display_name: String,

    /// When the member was added to the roster; defines roster order
    #[serde(default = "Utc::now")]
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            joined_at: Utc::now(),
        }
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(MemberValidationError::EmptyId);
        }
        if self.display_name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if self.display_name.len() > 50 {
            return Err(MemberValidationError::NameTooLong(self.display_name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member id cannot be empty")]
    EmptyId,
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Member name too long ({0} chars, max 50)")]
    NameTooLong(usize),
}

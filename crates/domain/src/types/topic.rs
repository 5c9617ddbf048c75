//! Course topics

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Create/update payload for a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TopicDraft {
    /// # Errors
    /// Returns `PortalError::InvalidInput` when the name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortalError::InvalidInput("topic name is required".into()));
        }
        Ok(())
    }
}

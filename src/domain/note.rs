use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::task::local_now;

/// Default preview length used by list displays
pub const PREVIEW_LEN: usize = 100;

/// A free-form note
///
/// `modified_at` stays unset until the first content edit. Title and
/// tags are fixed at creation; only the content is editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Unique numeric identifier, assigned monotonically by the store
    pub id: u32,
    pub title: String,
    /// Multi-line body
    pub content: String,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
    pub tags: Vec<String>,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            content: String::new(),
            created_at: local_now(),
            modified_at: None,
            tags: Vec::new(),
        }
    }
}

impl Note {
    /// Length-bounded prefix of the content for list display.
    ///
    /// Truncates to `max_len` characters and appends "..." when the
    /// content is longer; shorter content is returned unmodified.
    pub fn preview(&self, max_len: usize) -> String {
        if self.content.chars().count() > max_len {
            let truncated: String = self.content.chars().take(max_len).collect();
            format!("{}...", truncated)
        } else {
            self.content.clone()
        }
    }
}

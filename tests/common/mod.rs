//! Shared helpers for integration tests.

use taskdeck::{Priority, TaskDraft};

/// A draft with just a title, everything else defaulted
pub fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

/// A draft with a title and priority
#[allow(dead_code)]
pub fn prioritized(title: &str, priority: Priority) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        priority,
        ..Default::default()
    }
}

use std::cmp::Reverse;

use crate::domain::note::Note;
use crate::domain::task::local_now;
use crate::error::{StoreError, StoreResult};

/// Owns the note collection.
///
/// Same Vec-backed shape as `TaskStore`: insertion order preserved,
/// linear id lookup, id counter reconciled on load.
pub struct NoteStore {
    notes: Vec<Note>,
    next_id: u32,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a loaded snapshot, reconciling the id
    /// counter past any existing id.
    pub fn from_parts(notes: Vec<Note>, next_id: u32) -> Self {
        let max_id = notes.iter().map(|n| n.id).max().unwrap_or(0);
        Self {
            next_id: next_id.max(max_id + 1).max(1),
            notes,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Create a note. `modified_at` stays unset until the first edit.
    pub fn add(&mut self, title: String, content: String, tags: Vec<String>) -> &Note {
        let note = Note {
            id: self.next_id,
            title,
            content,
            created_at: local_now(),
            modified_at: None,
            tags,
        };
        self.next_id += 1;
        self.notes.push(note);
        self.notes.last().unwrap()
    }

    /// Find a note by its id
    pub fn get(&self, id: u32) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Replace a note's content and stamp the modification time.
    ///
    /// Title and tags are untouched; there is no rename operation.
    pub fn edit(&mut self, id: u32, new_content: String) -> StoreResult<&Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NoteNotFound(id))?;
        note.content = new_content;
        note.modified_at = Some(local_now());
        Ok(note)
    }

    /// Remove a note; returns whether it existed
    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() < before
    }

    /// All notes, newest first
    pub fn list(&self) -> Vec<&Note> {
        let mut items: Vec<&Note> = self.notes.iter().collect();
        items.sort_by_key(|n| Reverse(n.created_at));
        items
    }

    /// Case-insensitive substring search over title, content, and
    /// tags. An empty or whitespace-only term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&Note> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.notes
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&needle)
                    || n.content.to_lowercase().contains(&needle)
                    || n.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Post domain model and submission validation (UI-agnostic).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Opaque post identifier, unique within a collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored blog post.
///
/// Serialized as `{ id, title, content, timestamp, editedAt }` with RFC 3339
/// timestamps. A missing `editedAt` is read as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    edited_at: Option<OffsetDateTime>,
}

impl Post {
    /// Build a never-edited post from a validated draft.
    pub fn new(id: PostId, draft: PostDraft, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            created_at,
            edited_at: None,
        }
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn edited_at(&self) -> Option<OffsetDateTime> {
        self.edited_at
    }

    /// Replace title and content and stamp the edit time.
    ///
    /// The edit time never precedes `created_at`, even if the clock went backwards.
    pub(crate) fn revise(&mut self, draft: PostDraft, now: OffsetDateTime) {
        self.title = draft.title;
        self.content = draft.content;
        self.edited_at = Some(now.max(self.created_at));
    }

    pub(crate) fn reassign_id(&mut self, id: PostId) {
        self.id = id;
    }

    /// Whether the record satisfies the non-empty title/content invariant.
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Trimmed, non-empty title and content ready to be stored.
///
/// Only [`PostDraft::parse`] creates drafts, so the store never sees blank fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    /// Trim and validate raw form input, reporting every empty field at once.
    pub fn parse(title: &str, content: &str) -> Result<Self, ValidationErrors> {
        let title = title.trim();
        let content = content.trim();

        let errors = ValidationErrors {
            title: title.is_empty().then_some(FieldError::TitleRequired),
            content: content.is_empty().then_some(FieldError::ContentRequired),
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A single field-scoped validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Title is required.")]
    TitleRequired,
    #[error("Content is required.")]
    ContentRequired,
}

/// Validation outcome for the post form, one slot per field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub title: Option<FieldError>,
    pub content: Option<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [self.title, self.content]
            .into_iter()
            .flatten()
            .map(|err| err.to_string())
            .collect();
        f.write_str(&messages.join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

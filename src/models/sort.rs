// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Presentation ordering for posts. Sorting never touches the stored order.

use std::cmp::Ordering;

use deunicode::deunicode;

use crate::models::post::Post;

/// How the post list is ordered on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Newest, SortMode::Oldest, SortMode::Title];

    /// Stable key used for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Title => "title",
        }
    }

    /// Parse a persisted key; unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == key)
    }

    /// Label shown in the sort picker.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Newest => "Newest first",
            SortMode::Oldest => "Oldest first",
            SortMode::Title => "Title (A-Z)",
        }
    }
}

/// The persisted sort choice.
///
/// Keys this version does not know are kept verbatim and order the list by
/// insertion, so a preference written elsewhere survives a round trip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortPreference {
    Mode(SortMode),
    Unrecognized(String),
}

impl Default for SortPreference {
    fn default() -> Self {
        SortPreference::Mode(SortMode::default())
    }
}

impl From<SortMode> for SortPreference {
    fn from(mode: SortMode) -> Self {
        SortPreference::Mode(mode)
    }
}

impl SortPreference {
    /// Interpret a stored value; blank values mean the default.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() {
            return Self::default();
        }
        match SortMode::from_key(key) {
            Some(mode) => SortPreference::Mode(mode),
            None => SortPreference::Unrecognized(key.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            SortPreference::Mode(mode) => mode.as_str(),
            SortPreference::Unrecognized(key) => key,
        }
    }

    pub fn mode(&self) -> Option<SortMode> {
        match self {
            SortPreference::Mode(mode) => Some(*mode),
            SortPreference::Unrecognized(_) => None,
        }
    }

    /// Label shown in the sort picker.
    pub fn label(&self) -> &str {
        match self {
            SortPreference::Mode(mode) => mode.label(),
            SortPreference::Unrecognized(_) => "As added",
        }
    }
}

/// Return a new ordering of `posts` for the given mode.
///
/// The sort is stable, so posts with equal keys keep their insertion order.
pub fn sort_view(posts: &[Post], mode: SortMode) -> Vec<&Post> {
    let mut view: Vec<&Post> = posts.iter().collect();
    match mode {
        SortMode::Newest => view.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortMode::Oldest => view.sort_by_key(|post| post.created_at()),
        SortMode::Title => view.sort_by(|a, b| compare_titles(a.title(), b.title())),
    }
    view
}

/// Like [`sort_view`], but keyed by the persisted mode string.
///
/// Unrecognized keys leave the insertion order unchanged.
pub fn sort_view_by_key<'a>(posts: &'a [Post], key: &str) -> Vec<&'a Post> {
    match SortMode::from_key(key) {
        Some(mode) => sort_view(posts, mode),
        None => posts.iter().collect(),
    }
}

/// Locale-style title comparison.
///
/// Compares transliterated, case-folded text first, then accents, then case
/// (lowercase before uppercase), so "apfel" < "Apfel" < "Äpfel" < "banana".
fn compare_titles(a: &str, b: &str) -> Ordering {
    let primary = |s: &str| deunicode(s).to_lowercase();
    primary(a)
        .cmp(&primary(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

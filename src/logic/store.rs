// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-memory post collection kept in insertion order.

use std::collections::HashSet;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::models::post::{Post, PostDraft, PostId};

/// Raised when an update targets a post that no longer exists.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("post {0} not found")]
pub struct NotFound(pub PostId);

/// Ordered collection of posts with unique ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// Build a store from loaded records, repairing anything that breaks the invariants.
    ///
    /// Records with a blank title or content are dropped and duplicate ids are
    /// replaced with fresh ones. The flag is `true` when a repair happened and
    /// the collection should be written back.
    pub fn from_posts(loaded: Vec<Post>) -> (Self, bool) {
        let mut seen = HashSet::new();
        let mut repaired = false;
        let mut posts = Vec::with_capacity(loaded.len());

        for mut post in loaded {
            if !post.is_well_formed() {
                warn!(id = %post.id(), "dropping stored post with empty title or content");
                repaired = true;
                continue;
            }
            if !seen.insert(post.id().clone()) {
                let fresh = fresh_id(&seen);
                warn!(old = %post.id(), new = %fresh, "reassigning duplicate post id");
                seen.insert(fresh.clone());
                post.reassign_id(fresh);
                repaired = true;
            }
            posts.push(post);
        }

        (Self { posts }, repaired)
    }

    /// Append a new post stamped with the current time.
    pub fn create(&mut self, draft: PostDraft) -> &Post {
        self.create_at(draft, OffsetDateTime::now_utc())
    }

    pub(crate) fn create_at(&mut self, draft: PostDraft, now: OffsetDateTime) -> &Post {
        let ids: HashSet<PostId> = self.posts.iter().map(|p| p.id().clone()).collect();
        let id = fresh_id(&ids);
        debug!(%id, title = draft.title(), "creating post");
        self.posts.push(Post::new(id, draft, now));
        &self.posts[self.posts.len() - 1]
    }

    /// Replace title and content of an existing post and stamp the edit time.
    pub fn update(&mut self, id: &PostId, draft: PostDraft) -> Result<&Post, NotFound> {
        self.update_at(id, draft, OffsetDateTime::now_utc())
    }

    pub(crate) fn update_at(
        &mut self,
        id: &PostId,
        draft: PostDraft,
        now: OffsetDateTime,
    ) -> Result<&Post, NotFound> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| NotFound(id.clone()))?;
        debug!(%id, title = draft.title(), content_len = draft.content().len(), "updating post");
        post.revise(draft, now);
        Ok(&*post)
    }

    /// Remove the post with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &PostId) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id() != id);
        let removed = self.posts.len() != before;
        debug!(%id, removed, "deleting post");
        removed
    }

    pub fn find_by_id(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id() == id)
    }

    /// All posts in insertion order.
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Generate an id not present in `taken`.
fn fresh_id(taken: &HashSet<PostId>) -> PostId {
    loop {
        let id = PostId::generate();
        if !taken.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft::parse(title, content).unwrap()
    }

    #[test]
    fn create_appends_with_fresh_id_and_no_edit_time() {
        let mut store = PostStore::default();
        let first = store.create(draft("Hello", "World")).id().clone();
        let second = store.create(draft("Again", "More")).clone();

        assert_eq!(store.len(), 2);
        assert_ne!(first, *second.id());
        assert_eq!(second.edited_at(), None);
        assert_eq!(store.all()[1].title(), "Again");
    }

    #[test]
    fn update_changes_only_text_and_edit_time() {
        let mut store = PostStore::default();
        let created = datetime!(2024-01-01 09:00:00 UTC);
        let original = store.create_at(draft("Title", "Old"), created).clone();

        let edited_at = datetime!(2024-01-02 09:00:00 UTC);
        let updated = store
            .update_at(original.id(), draft("Title", "New"), edited_at)
            .unwrap()
            .clone();

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.created_at(), created);
        assert_eq!(updated.title(), "Title");
        assert_eq!(updated.content(), "New");
        assert_eq!(updated.edited_at(), Some(edited_at));
    }

    #[test]
    fn update_with_real_clock_keeps_edit_after_creation() {
        let mut store = PostStore::default();
        let id = store.create(draft("T", "C")).id().clone();

        let post = store.update(&id, draft("T", "C2")).unwrap();

        assert!(post.edited_at().unwrap() >= post.created_at());
    }

    #[test]
    fn update_of_missing_post_reports_not_found() {
        let mut store = PostStore::default();
        store.create(draft("T", "C"));
        let before = store.clone();

        let missing = PostId::from("gone");
        let err = store.update(&missing, draft("X", "Y")).unwrap_err();

        assert_eq!(err, NotFound(missing));
        assert_eq!(store, before);
    }

    #[test]
    fn delete_removes_exactly_one_post() {
        let mut store = PostStore::default();
        let keep = store.create(draft("Keep", "me")).id().clone();
        let drop = store.create(draft("Drop", "me")).id().clone();

        assert!(store.delete(&drop));
        assert_eq!(store.len(), 1);
        assert!(store.find_by_id(&drop).is_none());
        assert!(store.find_by_id(&keep).is_some());
    }

    #[test]
    fn delete_of_missing_post_is_a_quiet_no_op() {
        let mut store = PostStore::default();
        store.create(draft("Only", "one"));

        assert!(!store.delete(&PostId::from("nope")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn from_posts_reassigns_duplicate_ids() {
        let at = datetime!(2024-01-01 00:00:00 UTC);
        let loaded = vec![
            Post::new(PostId::from("1700000000000"), draft("A", "a"), at),
            Post::new(PostId::from("1700000000000"), draft("B", "b"), at),
        ];

        let (store, repaired) = PostStore::from_posts(loaded);

        assert!(repaired);
        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].id().as_str(), "1700000000000");
        assert_ne!(store.all()[1].id(), store.all()[0].id());
        assert_eq!(store.all()[1].title(), "B");
    }

    #[test]
    fn from_posts_drops_blank_records() {
        let raw = r#"[
            { "id": "1", "title": "  ", "content": "x", "timestamp": "2024-01-01T00:00:00Z", "editedAt": null },
            { "id": "2", "title": "Fine", "content": "x", "timestamp": "2024-01-01T00:00:00Z", "editedAt": null }
        ]"#;
        let loaded: Vec<Post> = serde_json::from_str(raw).unwrap();

        let (store, repaired) = PostStore::from_posts(loaded);

        assert!(repaired);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].id().as_str(), "2");
    }

    #[test]
    fn from_posts_leaves_clean_data_untouched() {
        let at = datetime!(2024-01-01 00:00:00 UTC);
        let loaded = vec![
            Post::new(PostId::from("a"), draft("A", "a"), at),
            Post::new(PostId::from("b"), draft("B", "b"), at),
        ];

        let (store, repaired) = PostStore::from_posts(loaded.clone());

        assert!(!repaired);
        assert_eq!(store.all(), loaded.as_slice());
    }
}

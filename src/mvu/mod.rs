// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring posts, the form, the list, and persistence.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, error, info};

use crate::logic::storage::{KeyValueStore, StorageAdapter};
use crate::logic::store::PostStore;
use crate::models::post::{Post, PostId};
use crate::models::sort::{SortMode, SortPreference};
use crate::ui::components::confirm::ConfirmMsg;
use crate::ui::components::post_form::{self, FormMode, PostFormEvent, PostFormModel, PostFormMsg};
use crate::ui::components::post_list::PostListMsg;

/// Top-level application state.
#[derive(Clone, Debug, Default)]
pub struct AppModel {
    /// All posts, in insertion order.
    pub store: PostStore,
    /// Create/edit form state.
    pub form: PostFormModel,
    /// Current presentation order, as persisted.
    pub sort: SortPreference,
    /// Destructive action waiting for the user's answer.
    pub confirmation: Option<Confirmation>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Saves that failed and have not succeeded since, with their error text.
    pub failed_saves: BTreeMap<SaveTarget, String>,
}

impl AppModel {
    /// Non-blocking persistence warning, present while any save is failing.
    pub fn notice(&self) -> Option<String> {
        if self.failed_saves.is_empty() {
            return None;
        }
        let reasons: Vec<&str> = self.failed_saves.values().map(String::as_str).collect();
        Some(format!(
            "Changes could not be saved and will be lost on exit: {}",
            reasons.join("; ")
        ))
    }
}

/// Persisted value a save command writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SaveTarget {
    Posts,
    SortPreference,
}

/// Actions gated behind a yes/no prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Confirmation {
    DeletePost(PostId),
    DiscardForm,
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::DeletePost(_) => "Delete post",
            Confirmation::DiscardForm => "Discard changes",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeletePost(_) => "Are you sure you want to delete this post?",
            Confirmation::DiscardForm => "You have unsaved changes. Discard and close the form?",
        }
    }

    pub fn accept_label(&self) -> &'static str {
        match self {
            Confirmation::DeletePost(_) => "Delete",
            Confirmation::DiscardForm => "Discard",
        }
    }
}

/// Application messages routed through the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    Form(PostFormMsg),
    List(PostListMsg),
    ToggleForm,
    SetSortMode(SortMode),
    Confirm(ConfirmMsg),
    Saved(SaveTarget),
    SaveFailed(SaveTarget, String),
    DismissNotice,
}

/// Side effects requested by `update`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Persist the full collection as one value.
    SavePosts(Vec<Post>),
    SaveSortPreference(SortMode),
}

/// Build the initial model from storage.
///
/// Returns a save command when loaded data had to be repaired.
pub fn init<S: KeyValueStore>(storage: &StorageAdapter<S>) -> (AppModel, Vec<Command>) {
    let (store, repaired) = PostStore::from_posts(storage.load());
    let sort = storage.load_sort_preference();
    info!(posts = store.len(), sort = sort.key(), "state loaded");

    let mut cmds = Vec::new();
    if repaired {
        cmds.push(Command::SavePosts(store.all().to_vec()));
    }

    let model = AppModel {
        store,
        sort,
        ..Default::default()
    };
    (model, cmds)
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    if model.confirmation.is_some() && blocked_by_prompt(&msg) {
        debug!(?msg, "ignoring input while a confirmation is pending");
        return;
    }

    match msg {
        Msg::Form(m) => match post_form::update(&mut model.form, m) {
            Some(PostFormEvent::Submitted { target, draft }) => match target {
                FormMode::Create => {
                    let post = model.store.create(draft);
                    info!(id = %post.id(), "post created");
                    model.status = Some("Post published.".into());
                    persist_posts(model, cmds);
                }
                FormMode::Edit(id) => match model.store.update(&id, draft) {
                    Ok(post) => {
                        info!(id = %post.id(), "post updated");
                        model.status = Some("Post updated.".into());
                        persist_posts(model, cmds);
                    }
                    Err(err) => debug!(error = %err, "edited post disappeared; nothing to save"),
                },
            },
            Some(PostFormEvent::CloseRequested) => request_close(model),
            None => {}
        },
        Msg::ToggleForm => {
            if model.form.is_open() {
                request_close(model);
            } else {
                model.form.open();
            }
        }
        Msg::List(PostListMsg::EditRequested(id)) => match model.store.find_by_id(&id) {
            Some(post) => model.form.begin_edit(post),
            None => debug!(%id, "edit requested for missing post"),
        },
        Msg::List(PostListMsg::DeleteRequested(id)) => {
            model.confirmation = Some(Confirmation::DeletePost(id));
        }
        Msg::Confirm(ConfirmMsg::Accepted) => match model.confirmation.take() {
            Some(Confirmation::DeletePost(id)) => {
                if model.store.delete(&id) {
                    info!(%id, "post deleted");
                    if model.form.is_editing(&id) {
                        model.form.close();
                    }
                    model.status = Some("Post deleted.".into());
                    persist_posts(model, cmds);
                } else {
                    debug!(%id, "delete confirmed for missing post");
                }
            }
            Some(Confirmation::DiscardForm) => model.form.close(),
            None => {}
        },
        Msg::Confirm(ConfirmMsg::Declined) => model.confirmation = None,
        Msg::SetSortMode(mode) => {
            if model.sort.mode() != Some(mode) {
                model.sort = mode.into();
                cmds.push(Command::SaveSortPreference(mode));
            }
        }
        Msg::Saved(target) => {
            model.failed_saves.remove(&target);
        }
        Msg::SaveFailed(target, message) => {
            error!(?target, error = %message, "persisting state failed");
            model.failed_saves.insert(target, message);
        }
        Msg::DismissNotice => model.failed_saves.clear(),
    }
}

/// Execute a command synchronously and return the resulting message.
pub fn run_command<S: KeyValueStore>(storage: &mut StorageAdapter<S>, cmd: Command) -> Msg {
    match cmd {
        Command::SavePosts(posts) => match storage.save(&posts) {
            Ok(()) => Msg::Saved(SaveTarget::Posts),
            Err(err) => Msg::SaveFailed(SaveTarget::Posts, err.to_string()),
        },
        Command::SaveSortPreference(mode) => match storage.save_sort_preference(mode) {
            Ok(()) => Msg::Saved(SaveTarget::SortPreference),
            Err(err) => Msg::SaveFailed(SaveTarget::SortPreference, err.to_string()),
        },
    }
}

/// Apply a message and run every resulting command to completion, in order.
pub fn dispatch<S: KeyValueStore>(
    model: &mut AppModel,
    storage: &mut StorageAdapter<S>,
    msg: Msg,
) {
    let mut queue = VecDeque::from([msg]);
    while let Some(msg) = queue.pop_front() {
        let mut cmds = Vec::new();
        update(model, msg, &mut cmds);
        queue.extend(cmds.into_iter().map(|cmd| run_command(storage, cmd)));
    }
}

fn persist_posts(model: &AppModel, cmds: &mut Vec<Command>) {
    cmds.push(Command::SavePosts(model.store.all().to_vec()));
}

/// Input that could start another prompt or change what a pending one refers to.
fn blocked_by_prompt(msg: &Msg) -> bool {
    matches!(msg, Msg::Form(_) | Msg::List(_) | Msg::ToggleForm)
}

/// Close the form, asking first when that would discard input.
fn request_close(model: &mut AppModel) {
    if model.form.has_unsaved_changes() {
        model.confirmation = Some(Confirmation::DiscardForm);
    } else {
        model.form.close();
    }
}

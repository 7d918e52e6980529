// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Post form as an MVU component: create/edit state machine, validation, and view.

use eframe::egui;

use crate::models::post::{FieldError, Post, PostDraft, PostId, ValidationErrors};

/// Whether a submission creates a new post or edits an existing one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(PostId),
}

/// Form state, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostFormModel {
    mode: FormMode,
    title: String,
    content: String,
    errors: ValidationErrors,
    open: bool,
}

/// Messages emitted by the form view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostFormMsg {
    TitleChanged(String),
    ContentChanged(String),
    Submit,
    CloseRequested,
}

/// Outcomes the parent must act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostFormEvent {
    /// Input passed validation; the form has already reset to create mode.
    Submitted { target: FormMode, draft: PostDraft },
    /// The user asked to close the form.
    CloseRequested,
}

impl PostFormModel {
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show an empty form in create mode.
    pub fn open(&mut self) {
        self.reset();
        self.open = true;
    }

    /// Preload a post and switch to edit mode.
    pub fn begin_edit(&mut self, post: &Post) {
        self.mode = FormMode::Edit(post.id().clone());
        self.title = post.title().to_string();
        self.content = post.content().to_string();
        self.errors = ValidationErrors::default();
        self.open = true;
    }

    /// Clear input and edit target, then collapse.
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    /// True when closing would discard typed text or an edit session.
    pub fn has_unsaved_changes(&self) -> bool {
        !self.title.trim().is_empty()
            || !self.content.trim().is_empty()
            || matches!(self.mode, FormMode::Edit(_))
    }

    pub fn is_editing(&self, id: &PostId) -> bool {
        matches!(&self.mode, FormMode::Edit(target) if target == id)
    }

    fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.title.clear();
        self.content.clear();
        self.errors = ValidationErrors::default();
    }
}

/// Apply a message to the form. Returns an event when the parent has work to do.
pub fn update(model: &mut PostFormModel, msg: PostFormMsg) -> Option<PostFormEvent> {
    match msg {
        PostFormMsg::TitleChanged(text) => {
            model.title = text;
            None
        }
        PostFormMsg::ContentChanged(text) => {
            model.content = text;
            None
        }
        PostFormMsg::Submit => match PostDraft::parse(&model.title, &model.content) {
            Ok(draft) => {
                let target = std::mem::take(&mut model.mode);
                model.close();
                Some(PostFormEvent::Submitted { target, draft })
            }
            Err(errors) => {
                model.errors = errors;
                None
            }
        },
        PostFormMsg::CloseRequested => Some(PostFormEvent::CloseRequested),
    }
}

/// Render the form and return any triggered messages.
pub fn view(ui: &mut egui::Ui, model: &PostFormModel) -> Vec<PostFormMsg> {
    let mut msgs = Vec::new();
    let editing = matches!(model.mode(), FormMode::Edit(_));

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.heading(if editing { "Edit Post" } else { "New Post" });
        ui.add_space(6.0);

        ui.label("Title");
        let mut title = model.title().to_string();
        if ui
            .add(
                egui::TextEdit::singleline(&mut title)
                    .hint_text("Post title")
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            msgs.push(PostFormMsg::TitleChanged(title));
        }
        field_error(ui, model.errors().title);
        ui.add_space(8.0);

        ui.label("Content");
        let mut content = model.content().to_string();
        if ui
            .add(
                egui::TextEdit::multiline(&mut content)
                    .hint_text("Write your post…")
                    .desired_rows(8)
                    .desired_width(f32::INFINITY),
            )
            .changed()
        {
            msgs.push(PostFormMsg::ContentChanged(content));
        }
        field_error(ui, model.errors().content);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let submit_label = if editing {
                format!("{} Save changes", egui_phosphor::regular::FLOPPY_DISK)
            } else {
                format!("{} Publish", egui_phosphor::regular::PAPER_PLANE_TILT)
            };
            if ui.button(submit_label).clicked() {
                msgs.push(PostFormMsg::Submit);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(PostFormMsg::CloseRequested);
            }
        });
    });

    msgs
}

/// Inline, field-scoped validation message.
fn field_error(ui: &mut egui::Ui, error: Option<FieldError>) {
    if let Some(err) = error {
        ui.label(
            egui::RichText::new(err.to_string())
                .small()
                .color(ui.visuals().error_fg_color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn filled(title: &str, content: &str) -> PostFormModel {
        let mut model = PostFormModel::default();
        model.open();
        update(&mut model, PostFormMsg::TitleChanged(title.into()));
        update(&mut model, PostFormMsg::ContentChanged(content.into()));
        model
    }

    fn existing_post() -> Post {
        Post::new(
            PostId::from("p1"),
            PostDraft::parse("Stored title", "Stored body").unwrap(),
            OffsetDateTime::now_utc(),
        )
    }

    #[test]
    fn submit_in_create_mode_emits_trimmed_draft_and_resets() {
        let mut model = filled(" Hello ", " World ");

        let event = update(&mut model, PostFormMsg::Submit).expect("submitted");

        match event {
            PostFormEvent::Submitted { target, draft } => {
                assert_eq!(target, FormMode::Create);
                assert_eq!(draft.title(), "Hello");
                assert_eq!(draft.content(), "World");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(model, PostFormModel::default());
    }

    #[test]
    fn submit_with_empty_title_sets_only_title_error() {
        let mut model = filled("", "World");

        assert!(update(&mut model, PostFormMsg::Submit).is_none());
        assert_eq!(model.errors().title, Some(FieldError::TitleRequired));
        assert_eq!(model.errors().content, None);
        assert_eq!(model.content(), "World");
        assert!(model.is_open());
    }

    #[test]
    fn submit_with_both_fields_blank_reports_both_errors() {
        let mut model = filled(" ", "");

        assert!(update(&mut model, PostFormMsg::Submit).is_none());
        assert!(model.errors().title.is_some());
        assert!(model.errors().content.is_some());
    }

    #[test]
    fn errors_clear_after_a_successful_submit() {
        let mut model = filled("", "Body");
        update(&mut model, PostFormMsg::Submit);
        update(&mut model, PostFormMsg::TitleChanged("Now titled".into()));

        assert!(update(&mut model, PostFormMsg::Submit).is_some());
        assert!(model.errors().is_empty());
    }

    #[test]
    fn begin_edit_preloads_and_targets_post() {
        let mut model = PostFormModel::default();
        let post = existing_post();

        model.begin_edit(&post);

        assert_eq!(model.mode(), &FormMode::Edit(PostId::from("p1")));
        assert_eq!(model.title(), "Stored title");
        assert_eq!(model.content(), "Stored body");
        assert!(model.is_open());
        assert!(model.is_editing(post.id()));
    }

    #[test]
    fn submit_in_edit_mode_targets_the_post_and_returns_to_create() {
        let mut model = PostFormModel::default();
        model.begin_edit(&existing_post());
        update(&mut model, PostFormMsg::ContentChanged("New body".into()));

        let event = update(&mut model, PostFormMsg::Submit).expect("submitted");

        assert_eq!(
            event,
            PostFormEvent::Submitted {
                target: FormMode::Edit(PostId::from("p1")),
                draft: PostDraft::parse("Stored title", "New body").unwrap(),
            }
        );
        assert_eq!(model.mode(), &FormMode::Create);
        assert!(!model.is_open());
    }

    #[test]
    fn close_clears_edit_session() {
        let mut model = PostFormModel::default();
        model.begin_edit(&existing_post());

        model.close();

        assert_eq!(model.mode(), &FormMode::Create);
        assert!(model.title().is_empty());
        assert!(!model.has_unsaved_changes());
    }

    #[test]
    fn unsaved_changes_tracks_text_and_edit_sessions() {
        let mut model = PostFormModel::default();
        model.open();
        assert!(!model.has_unsaved_changes());

        update(&mut model, PostFormMsg::TitleChanged("   ".into()));
        assert!(!model.has_unsaved_changes());

        update(&mut model, PostFormMsg::ContentChanged("draft".into()));
        assert!(model.has_unsaved_changes());

        model.begin_edit(&existing_post());
        update(&mut model, PostFormMsg::TitleChanged(String::new()));
        update(&mut model, PostFormMsg::ContentChanged(String::new()));
        assert!(model.has_unsaved_changes());
    }

    #[test]
    fn close_request_is_forwarded_without_touching_state() {
        let mut model = filled("Keep", "me");
        let before = model.clone();

        assert_eq!(
            update(&mut model, PostFormMsg::CloseRequested),
            Some(PostFormEvent::CloseRequested)
        );
        assert_eq!(model, before);
    }
}

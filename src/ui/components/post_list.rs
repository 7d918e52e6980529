// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Post list presenter: builds the sorted, display-ready list and renders it.

use eframe::egui;

use crate::logic::store::PostStore;
use crate::models::post::PostId;
use crate::models::sort::{SortPreference, sort_view_by_key};
use crate::utils::format_local;

/// Shown instead of the list when there are no posts.
pub const EMPTY_STATE_MESSAGE: &str = "No blog posts yet. Click '+ New Post' to get started!";

/// Messages emitted by per-post action triggers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostListMsg {
    EditRequested(PostId),
    DeleteRequested(PostId),
}

/// Display-ready data for one post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub posted_on: String,
    pub edited_on: Option<String>,
}

/// What the list area shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListView {
    Empty,
    Posts(Vec<PostCard>),
}

/// Build the list view for the current store contents and sort preference.
///
/// An unrecognized preference shows posts in insertion order.
pub fn present(store: &PostStore, sort: &SortPreference) -> ListView {
    if store.is_empty() {
        return ListView::Empty;
    }

    let cards = sort_view_by_key(store.all(), sort.key())
        .into_iter()
        .map(|post| PostCard {
            id: post.id().clone(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            posted_on: format_local(post.created_at()),
            edited_on: post.edited_at().map(format_local),
        })
        .collect();
    ListView::Posts(cards)
}

/// Render the list and return any triggered messages.
pub fn view(ui: &mut egui::Ui, list: &ListView) -> Vec<PostListMsg> {
    let mut msgs = Vec::new();

    match list {
        ListView::Empty => {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(EMPTY_STATE_MESSAGE)
                        .italics()
                        .color(egui::Color32::from_gray(110)),
                );
            });
        }
        ListView::Posts(cards) => {
            for card in cards {
                render_card(ui, card, &mut msgs);
                ui.add_space(8.0);
            }
        }
    }

    msgs
}

fn render_card(ui: &mut egui::Ui, card: &PostCard, msgs: &mut Vec<PostListMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&card.title).heading().strong());
        ui.add_space(4.0);
        ui.add(egui::Label::new(&card.content).wrap());
        ui.add_space(6.0);

        let meta = |text: String| {
            egui::RichText::new(text)
                .small()
                .italics()
                .color(egui::Color32::from_gray(110))
        };
        ui.label(meta(format!("Posted on: {}", card.posted_on)));
        if let Some(edited) = &card.edited_on {
            ui.label(meta(format!("Last edited: {edited}")));
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Edit", egui_phosphor::regular::PENCIL_SIMPLE))
                .clicked()
            {
                msgs.push(PostListMsg::EditRequested(card.id.clone()));
            }
            if ui
                .button(format!("{} Delete", egui_phosphor::regular::TRASH_SIMPLE))
                .clicked()
            {
                msgs.push(PostListMsg::DeleteRequested(card.id.clone()));
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::PostDraft;
    use crate::models::sort::SortMode;
    use time::macros::datetime;

    fn titles(list: &ListView) -> Vec<&str> {
        match list {
            ListView::Empty => Vec::new(),
            ListView::Posts(cards) => cards.iter().map(|c| c.title.as_str()).collect(),
        }
    }

    #[test]
    fn empty_store_presents_the_empty_state() {
        assert_eq!(present(&PostStore::default(), &SortMode::Newest.into()), ListView::Empty);
    }

    #[test]
    fn posts_are_presented_in_sort_order_without_reordering_the_store() {
        let mut store = PostStore::default();
        store.create_at(
            PostDraft::parse("Beta", "b").unwrap(),
            datetime!(2024-01-01 00:00:00 UTC),
        );
        store.create_at(
            PostDraft::parse("Alpha", "a").unwrap(),
            datetime!(2024-01-02 00:00:00 UTC),
        );

        assert_eq!(titles(&present(&store, &SortMode::Newest.into())), ["Alpha", "Beta"]);
        assert_eq!(titles(&present(&store, &SortMode::Oldest.into())), ["Beta", "Alpha"]);
        assert_eq!(titles(&present(&store, &SortMode::Title.into())), ["Alpha", "Beta"]);
        assert_eq!(store.all()[0].title(), "Beta");
    }

    #[test]
    fn unrecognized_preference_presents_insertion_order() {
        let mut store = PostStore::default();
        store.create_at(
            PostDraft::parse("Old", "o").unwrap(),
            datetime!(2024-01-01 00:00:00 UTC),
        );
        store.create_at(
            PostDraft::parse("New", "n").unwrap(),
            datetime!(2024-02-01 00:00:00 UTC),
        );

        let sort = SortPreference::Unrecognized("popular".into());

        assert_eq!(titles(&present(&store, &sort)), ["Old", "New"]);
    }

    #[test]
    fn edited_posts_carry_an_edit_label() {
        let mut store = PostStore::default();
        let id = store
            .create_at(
                PostDraft::parse("T", "C").unwrap(),
                datetime!(2024-01-01 00:00:00 UTC),
            )
            .id()
            .clone();

        let ListView::Posts(cards) = present(&store, &SortMode::Newest.into()) else {
            panic!("expected posts");
        };
        assert!(cards[0].edited_on.is_none());
        assert_eq!(cards[0].id, id);

        store
            .update_at(
                &id,
                PostDraft::parse("T", "C2").unwrap(),
                datetime!(2024-01-03 00:00:00 UTC),
            )
            .unwrap();

        let ListView::Posts(cards) = present(&store, &SortMode::Newest.into()) else {
            panic!("expected posts");
        };
        assert!(cards[0].edited_on.is_some());
        assert_eq!(cards[0].content, "C2");
    }
}

// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for managing blog posts.
//! Handles layout, the form toggle, sorting, confirmations, and status output.

pub mod components;

use eframe::egui;

use crate::logic::storage::{FileStore, StorageAdapter};
use crate::models::sort::SortMode;
use crate::mvu::{self, AppModel, Msg};
use crate::ui::components::{confirm, post_form, post_list};

/// Stateful egui application owning the model and its storage.
pub struct PostpadApp {
    model: AppModel,
    inbox: Vec<Msg>,
    storage: StorageAdapter<FileStore>,
}

impl PostpadApp {
    /// Load persisted state and run any start-up repairs.
    pub fn new(mut storage: StorageAdapter<FileStore>) -> Self {
        let (mut model, cmds) = mvu::init(&storage);
        for cmd in cmds {
            let msg = mvu::run_command(&mut storage, cmd);
            mvu::dispatch(&mut model, &mut storage, msg);
        }
        Self {
            model,
            inbox: Vec::new(),
            storage,
        }
    }

    /// Process queued messages in arrival order; commands run inline on the UI thread.
    fn process_inbox(&mut self) {
        for msg in std::mem::take(&mut self.inbox) {
            mvu::dispatch(&mut self.model, &mut self.storage, msg);
        }
    }
}

impl eframe::App for PostpadApp {
    /// Drives a single UI frame: applies messages produced by the previous frame,
    /// then renders the top bar, the confirmation dialog, the status bar, and the
    /// form and post list. Views push new messages for the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        let had_messages = !self.inbox.is_empty();
        self.process_inbox();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Blog Posts");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    ui.separator();
                    self.render_form_toggle(ui);
                    ui.separator();
                    self.render_sort_picker(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_confirmation(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                if self.model.form.is_open() {
                    let form_msgs = post_form::view(ui, &self.model.form);
                    self.inbox.extend(form_msgs.into_iter().map(Msg::Form));
                    ui.add_space(12.0);
                }

                let list = post_list::present(&self.model.store, &self.model.sort);
                let list_msgs = post_list::view(ui, &list);
                self.inbox.extend(list_msgs.into_iter().map(Msg::List));
            });
        });

        // Apply this frame's input before the next paint.
        if had_messages || !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }

    /// Required by eframe 0.34; all rendering happens in `update`, which eframe
    /// still calls every frame before `ui`.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

impl PostpadApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// Render the "+ New Post" / "× Close Form" toggle.
    fn render_form_toggle(&mut self, ui: &mut egui::Ui) {
        let label = if self.model.form.is_open() {
            format!("{} Close Form", egui_phosphor::regular::X)
        } else {
            format!("{} New Post", egui_phosphor::regular::PLUS)
        };
        if ui.button(label).clicked() {
            self.inbox.push(Msg::ToggleForm);
        }
    }

    /// Render the sort mode picker.
    fn render_sort_picker(&mut self, ui: &mut egui::Ui) {
        let current = self.model.sort.mode();
        let mut choice = current;
        egui::ComboBox::from_id_salt("sort_picker")
            .selected_text(self.model.sort.label())
            .show_ui(ui, |ui| {
                for mode in SortMode::ALL {
                    ui.selectable_value(&mut choice, Some(mode), mode.label());
                }
            });
        ui.label("Sort by");
        if let Some(mode) = choice
            && choice != current
        {
            self.inbox.push(Msg::SetSortMode(mode));
        }
    }

    /// Render the pending confirmation, if any.
    fn render_confirmation(&mut self, ctx: &egui::Context) {
        if let Some(pending) = &self.model.confirmation
            && let Some(answer) = confirm::view(
                ctx,
                pending.title(),
                pending.prompt(),
                pending.accept_label(),
            )
        {
            self.inbox.push(Msg::Confirm(answer));
        }
    }

    /// Render latest status and any persistence notice.
    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(notice) = self.model.notice() {
                ui.label(
                    egui::RichText::new(format!("{} {notice}", egui_phosphor::regular::WARNING))
                        .color(ui.visuals().warn_fg_color),
                );
                if ui
                    .small_button(egui_phosphor::regular::X)
                    .on_hover_text("Dismiss")
                    .clicked()
                {
                    self.inbox.push(Msg::DismissNotice);
                }
            } else if let Some(text) = &self.model.status {
                ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{} post(s)", self.model.store.len()))
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            });
        });
    }
}

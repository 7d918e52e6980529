// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Yes/no confirmation dialog.

use eframe::egui;

/// User answer to a confirmation prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmMsg {
    Accepted,
    Declined,
}

/// Show a centered modal window with the prompt and return the answer, if any.
pub fn view(
    ctx: &egui::Context,
    title: &str,
    prompt: &str,
    accept_label: &str,
) -> Option<ConfirmMsg> {
    let mut answer = None;

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(prompt);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(accept_label).clicked() {
                    answer = Some(ConfirmMsg::Accepted);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(ConfirmMsg::Declined);
                }
            });
            if ui.input(|inp| inp.key_pressed(egui::Key::Escape)) {
                answer = Some(ConfirmMsg::Declined);
            }
        });

    answer
}

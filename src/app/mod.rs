// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring storage and egui/eframe to launch the Postpad UI.

use anyhow::{Context, Result, anyhow};
use eframe::egui;
use egui_phosphor::Variant;
use tracing::info;

use crate::config::Settings;
use crate::logic::storage::{FileStore, StorageAdapter};
use crate::ui::PostpadApp;

/// Open the data directory and run the main egui event loop.
pub fn run(settings: Settings) -> Result<()> {
    let backend = FileStore::open(&settings.data_dir).with_context(|| {
        format!(
            "Failed to open data directory {}",
            settings.data_dir.display()
        )
    })?;
    info!(data_dir = %backend.root().display(), "starting postpad");
    let storage = StorageAdapter::new(backend);

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Postpad",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(PostpadApp::new(storage)))
        }),
    )
    .map_err(|err| anyhow!("Failed to run the UI: {err}"))
}

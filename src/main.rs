mod app;
mod config;
mod logic;
mod models;
mod mvu;
mod ui;
mod utils;

fn main() -> anyhow::Result<()> {
    let settings = config::Settings::load();
    utils::logging::init(&settings.logging)?;
    app::run(settings)
}

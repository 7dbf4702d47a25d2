// Hide console window in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod chrome;
mod config;
mod controls;
mod platform;
mod title_bar;
mod ui;

use config::Config;
use iced::Application;
use ui::App;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn)
        .init();

    let config = Config::load();
    log::info!("starting {}", config.title);

    // Keep the native decorations: the chrome hook installed once the window
    // exists reclassifies them as client area, so resize, snap and the maximize
    // animation still come from the window manager.
    App::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(config.window_width, config.window_height),
            min_size: Some(iced::Size::new(config.min_width, config.min_height)),
            decorations: true,
            transparent: false,
            resizable: true,
            ..Default::default()
        },
        default_font: iced::Font::DEFAULT,
        default_text_size: iced::Pixels(14.0),
        flags: config,
        ..Default::default()
    })
}

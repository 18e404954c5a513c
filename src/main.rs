//! Kroma application entry point.

mod app;
mod message;

use app::KromaApp;
use kroma_ui::{run_with_settings, Settings};

fn main() {
    let settings = Settings {
        window_title: Some("Kroma".to_string()),
        window_size: (360, 330),
        resizable: true,
        log_level: log::LevelFilter::Info,
    };

    if let Err(e) = run_with_settings::<KromaApp>(settings) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

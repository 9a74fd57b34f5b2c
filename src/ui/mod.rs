//! Desktop user interface built on egui

mod app;
mod components;
mod theme;

pub use app::BuddyApp;
pub use theme::Theme;

use crate::conversation::ConversationController;

/// Open the Buddy AI window and block until it closes
pub fn run(controller: ConversationController) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Buddy AI"),
        ..Default::default()
    };

    eframe::run_native(
        "Buddy AI",
        options,
        Box::new(|cc| {
            let theme = Theme::dark();
            theme.apply(&cc.egui_ctx);
            Ok(Box::new(BuddyApp::new(controller, theme)))
        }),
    )
}

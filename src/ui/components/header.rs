//! Header bar component
//!
//! Title, sidebar toggle, connection indicator and the clear button.

use crate::conversation::ConversationController;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

pub struct Header<'a> {
    controller: &'a mut ConversationController,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(controller: &'a mut ConversationController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let connected = self.controller.view().is_connected();

        ui.horizontal(|ui| {
            let toggle = ui
                .button(RichText::new("☰").size(16.0))
                .on_hover_text("Toggle sidebar");
            toggle.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Toggle sidebar")
            });
            if toggle.clicked() {
                self.controller.toggle_sidebar();
            }

            ui.label(
                RichText::new("Buddy AI")
                    .size(20.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clear = ui.button("🗑").on_hover_text("Clear chat");
                clear.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Clear chat")
                });
                if clear.clicked() {
                    self.controller.clear();
                }

                let (color, text) = if connected {
                    (self.theme.success, "Online")
                } else {
                    (self.theme.error, "Connection issue")
                };

                ui.label(RichText::new(text).size(12.0).color(self.theme.text_muted));

                let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 5.0, color);
            });
        });
    }
}

use crate::conversation::ConversationController;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// Navigation column on the left
pub struct Sidebar<'a> {
    controller: &'a mut ConversationController,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(controller: &'a mut ConversationController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            ui.label(
                RichText::new("Buddy AI")
                    .size(22.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            let new_chat = egui::Button::new(RichText::new("New Chat").color(self.theme.text_primary))
                .min_size(Vec2::new(ui.available_width(), 32.0))
                .fill(self.theme.bg_tertiary)
                .rounding(self.theme.button_rounding);

            if ui.add(new_chat).clicked() {
                self.controller.clear();
            }
        });
    }
}

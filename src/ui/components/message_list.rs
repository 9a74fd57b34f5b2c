//! Message list component
//!
//! User messages sit on the right, Buddy's replies on the left. A typing
//! indicator follows the last message while a reply is pending.

use crate::conversation::SessionView;
use crate::messages::Message;
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

pub struct MessageList<'a> {
    view: SessionView<'a>,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(view: SessionView<'a>, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("messages")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    for message in self.view.messages() {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.view.is_typing() {
                        self.show_typing_indicator(ui);
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.is_user();

        let (bubble_color, text_color, align, sender) = if is_user {
            (self.theme.user_bubble, Color32::WHITE, Align::RIGHT, "You")
        } else {
            (self.theme.ai_bubble, self.theme.text_primary, Align::LEFT, "Buddy")
        };

        let label_text = if is_user {
            format!("User message: {}", message.content)
        } else {
            format!("Buddy response: {}", message.content)
        };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(RichText::new(sender).size(12.0).color(self.theme.text_muted));

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    let response = ui.label(RichText::new(&message.content).color(text_color));
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label_text)
                    });
                });

            ui.label(
                RichText::new(message.timestamp.format("%H:%M").to_string())
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            let response = egui::Frame::none()
                .fill(self.theme.ai_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let t = ui.ctx().input(|i| i.time);
                        for i in 0..3 {
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(10.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                })
                .response;

            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, "Buddy is typing")
            });
        });
    }
}

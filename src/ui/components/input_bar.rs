//! Input bar component
//!
//! Text field, send button and the listen toggle.

use crate::conversation::ConversationController;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

pub struct InputBar<'a> {
    controller: &'a mut ConversationController,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(controller: &'a mut ConversationController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_listen_button(ui);

                    ui.add_space(self.theme.spacing_sm);

                    self.show_text_input(ui);

                    ui.add_space(self.theme.spacing_sm);

                    self.show_send_button(ui);
                });
            });
    }

    fn show_listen_button(&mut self, ui: &mut egui::Ui) {
        let listening = self.controller.view().is_listening();
        let available = self.controller.can_listen();

        let (icon, label) = if listening {
            ("⏹", "Stop Listening")
        } else {
            ("🎤", "Start Listening")
        };

        let mut button = egui::Button::new(RichText::new(format!("{} {}", icon, label)))
            .min_size(Vec2::new(0.0, 36.0))
            .rounding(self.theme.button_rounding);

        if listening {
            button = button.fill(self.theme.listening.gamma_multiply(0.3));
        }

        let response = ui.add_enabled(available, button);
        let button_rect = response.rect;

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, available, label)
        });

        let clicked = response.clicked();

        match self.controller.listen_unavailable_reason() {
            Some(reason) if !available => {
                response.on_disabled_hover_text(format!("Voice input unavailable: {}", reason));
            }
            _ => {
                response.on_hover_text(if listening {
                    "Stop listening"
                } else {
                    "Speak your message"
                });
            }
        }

        if clicked {
            self.controller.toggle_listening();
        }

        if listening {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            ui.painter().rect_stroke(
                button_rect.expand(2.0 + pulse * 2.0),
                self.theme.button_rounding,
                egui::Stroke::new(2.0, self.theme.listening.gamma_multiply(1.0 - pulse * 0.5)),
            );
        }
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        // Reserve space for the send button
        let available_width = (ui.available_width() - 80.0).max(80.0);

        let mut buffer = self.controller.view().input().to_string();

        let text_edit = egui::TextEdit::singleline(&mut buffer)
            .hint_text("Type your message...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0))
            .id(egui::Id::new("message_input"));

        let response = ui.add(text_edit);

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Message input")
        });

        if response.changed() {
            self.controller.set_input(buffer);
        }

        // Singleline edits drop focus on Enter
        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            if self.controller.submit_pending() {
                response.request_focus();
            }
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = !self.controller.view().input().trim().is_empty();

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new("Send").color(egui::Color32::WHITE))
            .min_size(Vec2::new(64.0, 36.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add(button);

        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Send")
        });

        if response.clicked() {
            self.controller.submit_pending();
        }

        response.on_hover_text("Send message (Enter)");
    }
}

//! Welcome panel shown before the first message

use crate::conversation::ConversationController;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

struct Feature {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 6] = [
    Feature {
        icon: "🌐",
        title: "Web Navigation",
        description: "Open your favorite websites instantly",
    },
    Feature {
        icon: "🔍",
        title: "Smart Search",
        description: "Search the web with intelligent queries",
    },
    Feature {
        icon: "💻",
        title: "System Control",
        description: "Check system info and control your PC",
    },
    Feature {
        icon: "🎤",
        title: "Voice Commands",
        description: "Talk to me naturally with voice recognition",
    },
    Feature {
        icon: "⚡",
        title: "Quick Actions",
        description: "Access frequently used commands quickly",
    },
    Feature {
        icon: "🧠",
        title: "AI Intelligence",
        description: "Get smart responses and helpful assistance",
    },
];

const CARDS_PER_ROW: usize = 3;

pub struct Welcome<'a> {
    controller: &'a mut ConversationController,
    theme: &'a Theme,
}

impl<'a> Welcome<'a> {
    pub fn new(controller: &'a mut ConversationController, theme: &'a Theme) -> Self {
        Self { controller, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing_lg);

                    ui.label(RichText::new("🤖").size(48.0));
                    ui.add_space(self.theme.spacing_sm);

                    ui.label(
                        RichText::new("Welcome to Buddy AI")
                            .size(30.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.add_space(self.theme.spacing_sm);

                    ui.label(
                        RichText::new(
                            "Your intelligent assistant ready to help with web navigation, \
                             system control, smart searches, and much more. Let's get started!",
                        )
                        .size(15.0)
                        .color(self.theme.text_secondary),
                    );

                    ui.add_space(self.theme.spacing_lg);

                    for row in FEATURES.chunks(CARDS_PER_ROW) {
                        ui.horizontal(|ui| {
                            let card_width = 200.0;
                            let row_width = card_width * row.len() as f32
                                + self.theme.spacing * (row.len() as f32 - 1.0);
                            ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
                            ui.spacing_mut().item_spacing = Vec2::splat(self.theme.spacing);

                            for feature in row {
                                self.show_feature_card(ui, feature, card_width);
                            }
                        });
                        ui.add_space(self.theme.spacing);
                    }

                    ui.add_space(self.theme.spacing);

                    let get_started = egui::Button::new(
                        RichText::new("Get Started 🚀")
                            .size(16.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    )
                    .min_size(Vec2::new(180.0, 44.0))
                    .fill(self.theme.primary)
                    .rounding(self.theme.card_rounding);

                    let response = ui.add(get_started);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Get Started")
                    });
                    if response.clicked() {
                        self.controller.dismiss_welcome();
                    }

                    ui.add_space(self.theme.spacing_sm);

                    ui.label(
                        RichText::new(
                            "💡 Quick tip: Try saying \"Open YouTube\" or \"What time is it?\" \
                             to see me in action!",
                        )
                        .size(12.0)
                        .color(self.theme.text_muted),
                    );
                });
            });
    }

    fn show_feature_card(&self, ui: &mut egui::Ui, feature: &Feature, width: f32) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(width - 2.0 * self.theme.spacing);
                ui.vertical(|ui| {
                    ui.label(RichText::new(feature.icon).size(26.0));
                    ui.label(
                        RichText::new(feature.title)
                            .size(15.0)
                            .strong()
                            .color(self.theme.secondary),
                    );
                    ui.label(
                        RichText::new(feature.description)
                            .size(12.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }
}

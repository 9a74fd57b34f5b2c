//! Main application struct and eframe integration

use crate::conversation::ConversationController;
use crate::ui::components::{Header, InputBar, MessageList, Sidebar, Welcome};
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, SidePanel, TopBottomPanel};
use std::time::Duration;
use tracing::info;

/// Repaint interval while waiting on the backend or the microphone
const ACTIVE_REPAINT: Duration = Duration::from_millis(50);

/// The Buddy AI window
pub struct BuddyApp {
    controller: ConversationController,
    theme: Theme,
}

impl BuddyApp {
    pub fn new(controller: ConversationController, theme: Theme) -> Self {
        Self { controller, theme }
    }

    pub fn controller(&self) -> &ConversationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ConversationController {
        &mut self.controller
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Poll for replies and draw one frame
    pub fn show(&mut self, ctx: &egui::Context) {
        self.controller.poll_events();

        self.show_header(ctx);
        self.show_sidebar(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        let view = self.controller.view();
        if view.is_typing() || view.is_listening() {
            ctx.request_repaint_after(ACTIVE_REPAINT);
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                Header::new(&mut self.controller, &self.theme).show(ui);
            });
    }

    fn show_sidebar(&mut self, ctx: &egui::Context) {
        if !self.controller.view().sidebar_open() {
            return;
        }

        SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(220.0)
            .frame(egui::Frame::none().fill(self.theme.sidebar).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                Sidebar::new(&mut self.controller, &self.theme).show(ui);
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                InputBar::new(&mut self.controller, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                if self.controller.view().show_welcome() {
                    Welcome::new(&mut self.controller, &self.theme).show(ui);
                } else {
                    MessageList::new(self.controller.view(), &self.theme).show(ui);
                }
            });
    }
}

impl eframe::App for BuddyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Buddy AI shutting down");
    }
}

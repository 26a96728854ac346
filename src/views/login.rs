use crate::backend::BackendClient;
use crate::views::ViewNav;
use eframe::egui::{self, RichText};
use std::time::Duration;

const LOGIN_FAILED: &str = "Invalid credentials. Please try again.";

#[derive(Default)]
pub struct LoginView {
    username: String,
    password: String,
    error: Option<String>,
    submitting: bool,
}

impl LoginView {
    pub fn is_busy(&self) -> bool {
        self.submitting
    }

    pub fn on_login_failed(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = Some(error.unwrap_or_else(|| LOGIN_FAILED.to_string()));
    }

    fn can_submit(&self) -> bool {
        !self.submitting && !self.username.trim().is_empty() && !self.password.is_empty()
    }

    fn submit(&mut self, backend: &BackendClient) {
        self.error = None;
        self.submitting = true;
        backend.login(self.username.clone(), self.password.clone());
    }

    pub fn show(&mut self, ctx: &egui::Context, backend: &BackendClient) -> Option<ViewNav> {
        let mut nav = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);
                ui.set_max_width(360.0);
                ui.heading("Welcome to GitHub Automation");
                ui.add_space(12.0);

                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                    ui.add_space(8.0);
                }

                ui.label("Username");
                ui.add(
                    egui::TextEdit::singleline(&mut self.username)
                        .desired_width(f32::INFINITY)
                        .hint_text("Enter your username"),
                );
                ui.add_space(8.0);

                ui.label("Password");
                let password_response = ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .desired_width(f32::INFINITY)
                        .hint_text("Enter your password"),
                );
                ui.add_space(12.0);

                let submitted_via_enter = password_response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let label = if self.submitting { "Logging in..." } else { "Log In" };
                let clicked = ui
                    .add_enabled(self.can_submit(), egui::Button::new(label))
                    .clicked();
                if (clicked || submitted_via_enter) && self.can_submit() {
                    self.submit(backend);
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("New user?").weak());
                    if ui.link("Create account").clicked() {
                        nav = Some(ViewNav::ToSignup);
                    }
                });
            });
        });

        if self.submitting {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        nav
    }
}

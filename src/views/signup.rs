use crate::backend::BackendClient;
use crate::views::ViewNav;
use eframe::egui::{self, RichText};
use std::time::{Duration, Instant};

const SIGNUP_FAILED: &str = "Registration failed. Please try again.";
const MIN_USERNAME_LEN: usize = 4;
const MIN_PASSWORD_LEN: usize = 6;
const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Default)]
pub struct SignupView {
    username: String,
    password: String,
    error: Option<String>,
    submitting: bool,
    redirect_at: Option<Instant>,
}

impl SignupView {
    pub fn is_busy(&self) -> bool {
        self.submitting || self.redirect_at.is_some()
    }

    pub fn on_signup_succeeded(&mut self) {
        self.submitting = false;
        self.error = None;
        self.redirect_at = Some(Instant::now() + REDIRECT_DELAY);
    }

    pub fn on_signup_failed(&mut self, error: Option<String>) {
        self.submitting = false;
        self.error = Some(error.unwrap_or_else(|| SIGNUP_FAILED.to_string()));
    }

    // Minimum lengths gate the submit control itself; nothing re-validates
    // after that point.
    fn can_submit(&self) -> bool {
        !self.submitting
            && self.username.trim().len() >= MIN_USERNAME_LEN
            && self.password.len() >= MIN_PASSWORD_LEN
    }

    fn submit(&mut self, backend: &BackendClient) {
        self.error = None;
        self.submitting = true;
        backend.signup(self.username.clone(), self.password.clone());
    }

    pub fn show(&mut self, ctx: &egui::Context, backend: &BackendClient) -> Option<ViewNav> {
        let mut nav = None;

        if let Some(redirect_at) = self.redirect_at {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);
                    ui.heading("✓ Account Created Successfully!");
                    ui.label("Redirecting to login page...");
                });
            });
            if Instant::now() >= redirect_at {
                nav = Some(ViewNav::ToLogin);
            }
            ctx.request_repaint_after(Duration::from_millis(100));
            return nav;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);
                ui.set_max_width(360.0);
                ui.heading("Create New Account");
                ui.add_space(12.0);

                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                    ui.add_space(8.0);
                }

                ui.label("Username");
                ui.add(
                    egui::TextEdit::singleline(&mut self.username)
                        .desired_width(f32::INFINITY)
                        .hint_text("Choose a username (min 4 characters)"),
                );
                ui.add_space(8.0);

                ui.label("Password");
                let password_response = ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .desired_width(f32::INFINITY)
                        .hint_text("Create a password (min 6 characters)"),
                );
                ui.add_space(12.0);

                let submitted_via_enter = password_response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let label = if self.submitting { "Signing up..." } else { "Sign Up" };
                let clicked = ui
                    .add_enabled(self.can_submit(), egui::Button::new(label))
                    .clicked();
                if (clicked || submitted_via_enter) && self.can_submit() {
                    self.submit(backend);
                }

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Already have an account?").weak());
                    if ui.link("Log in here").clicked() {
                        nav = Some(ViewNav::ToLogin);
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

#[cfg(test)]
mod tests {
    use super::SignupView;

    #[test]
    fn submit_enforces_minimum_lengths() {
        let mut view = SignupView::default();
        view.username = "abc".to_string();
        view.password = "secret".to_string();
        assert!(!view.can_submit());

        view.username = "abcd".to_string();
        view.password = "short".to_string();
        assert!(!view.can_submit());

        view.password = "secret".to_string();
        assert!(view.can_submit());
    }

    #[test]
    fn success_arms_the_redirect_without_authenticating() {
        let mut view = SignupView::default();
        view.submitting = true;

        view.on_signup_succeeded();
        assert!(!view.submitting);
        assert!(view.redirect_at.is_some());
        assert!(view.error.is_none());
    }

    #[test]
    fn failure_shows_backend_error_or_fallback() {
        let mut view = SignupView::default();
        view.on_signup_failed(Some("Username taken".to_string()));
        assert_eq!(view.error.as_deref(), Some("Username taken"));

        view.on_signup_failed(None);
        assert_eq!(
            view.error.as_deref(),
            Some("Registration failed. Please try again.")
        );
    }
}

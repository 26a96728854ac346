use crate::backend::{ActionRequest, BackendClient};
use crate::format::format_result;
use crate::theme::ThemeName;
use crate::views::sidebar::{HistoryEntry, Sidebar};
use crate::views::ViewNav;
use eframe::egui::{self, Color32, CornerRadius, Frame, Margin, RichText, ScrollArea};
use serde_json::Value;
use std::time::Duration;

pub const SIDEBAR_MIN_WIDTH: f32 = 150.0;
pub const SIDEBAR_MAX_WIDTH: f32 = 500.0;
pub const SIDEBAR_DEFAULT_WIDTH: f32 = 250.0;

const GREETING: &str = "Hello! I'm your GitHub automation assistant. How can I help you today? Try asking about pull requests, code reviews, or BDD test cases!";
const GENERIC_FAILURE: &str = "Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub time: String,
}

pub fn current_time() -> String {
    chrono::Local::now().format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub fn clamp_sidebar_width(x: f32) -> f32 {
    x.clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
}

pub struct ChatView {
    messages: Vec<ChatMessage>,
    input: String,
    in_flight: bool,
    sidebar_width: f32,
    drag_active: bool,
    scroll_to_bottom: bool,
    pub sidebar: Sidebar,
}

impl Default for ChatView {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                text: GREETING.to_string(),
                sender: Sender::Ai,
                time: current_time(),
            }],
            input: String::new(),
            in_flight: false,
            sidebar_width: SIDEBAR_DEFAULT_WIDTH,
            drag_active: false,
            scroll_to_bottom: false,
            sidebar: Sidebar::default(),
        }
    }
}

impl ChatView {
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Validates and stages a send: appends the user message optimistically,
    /// clears the input, and returns the request body. Whitespace-only input
    /// is a no-op. The appended message is never rolled back; a failure is
    /// reported as a separate assistant message.
    fn prepare_send(&mut self) -> Option<ActionRequest> {
        if self.input.trim().is_empty() {
            return None;
        }
        let prompt = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage {
            text: prompt.clone(),
            sender: Sender::User,
            time: current_time(),
        });
        self.in_flight = true;
        self.scroll_to_bottom = true;
        Some(ActionRequest::from_prompt(prompt))
    }

    pub fn on_action_completed(&mut self, prompt: String, result: &Value) {
        let response = format_result(result);
        let time = current_time();
        self.messages.push(ChatMessage {
            text: response.clone(),
            sender: Sender::Ai,
            time: time.clone(),
        });
        self.sidebar.push_exchange(HistoryEntry {
            prompt,
            response,
            time,
        });
        self.in_flight = false;
        self.scroll_to_bottom = true;
    }

    pub fn on_action_failed(&mut self, error: Option<String>) {
        let detail = error.unwrap_or_else(|| GENERIC_FAILURE.to_string());
        self.messages.push(ChatMessage {
            text: format!("Oops! Something went wrong: {detail}"),
            sender: Sender::Ai,
            time: current_time(),
        });
        self.in_flight = false;
        self.scroll_to_bottom = true;
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: ThemeName,
        backend: &BackendClient,
        token: &str,
    ) -> Option<ViewNav> {
        let mut nav = None;
        let palette = theme.palette();

        let panel_frame = Frame::new()
            .fill(palette.sidebar_bg)
            .inner_margin(Margin::same(8));
        egui::SidePanel::left("details_panel")
            .exact_width(self.sidebar_width)
            .resizable(false)
            .frame(panel_frame)
            .show(ctx, |ui| {
                self.sidebar.ui(ui);
                self.resize_handle(ui);
            });

        egui::CentralPanel::default()
            .frame(Frame::new().fill(palette.chat_bg).inner_margin(Margin::same(12)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("GitHub Automation Chat");
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Logout").clicked() {
                            nav = Some(ViewNav::Logout);
                        }
                        if ui.button("Settings").clicked() {
                            nav = Some(ViewNav::ToSettings);
                        }
                    });
                });
                ui.separator();

                let transcript_height = (ui.available_height() - 60.0).max(120.0);
                ScrollArea::vertical()
                    .id_salt("chat_transcript")
                    .max_height(transcript_height)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for message in &self.messages {
                            render_message(ui, message, palette);
                        }
                        if self.in_flight {
                            ui.label(RichText::new("Thinking...").italics().weak());
                        }
                        if self.scroll_to_bottom {
                            ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                        }
                    });
                self.scroll_to_bottom = false;

                ui.separator();
                let mut send_now = false;
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .desired_width(ui.available_width() - 90.0)
                            .hint_text("Type your prompt here..."),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        send_now = true;
                    }

                    let send_label = if self.in_flight { "Sending..." } else { "Send" };
                    send_now |= ui
                        .add_enabled(!self.in_flight, egui::Button::new(send_label))
                        .clicked();
                });

                if send_now {
                    if let Some(request) = self.prepare_send() {
                        backend.github_action(token.to_string(), request);
                        ui.ctx().request_repaint();
                    }
                }
            });

        if self.in_flight {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
        nav
    }

    // Pointer position is only consulted while the drag flag is armed, so an
    // idle panel never tracks the mouse.
    fn resize_handle(&mut self, ui: &mut egui::Ui) {
        let full = ui.max_rect();
        let handle_rect = egui::Rect::from_min_max(
            egui::pos2(full.right() - 2.0, full.top()),
            egui::pos2(full.right() + 4.0, full.bottom()),
        );
        let response = ui.interact(
            handle_rect,
            ui.id().with("sidebar_resize"),
            egui::Sense::drag(),
        );
        if response.hovered() || self.drag_active {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        }
        if response.drag_started() {
            self.drag_active = true;
        }
        if self.drag_active {
            if let Some(pointer) = ui.ctx().pointer_latest_pos() {
                self.sidebar_width = clamp_sidebar_width(pointer.x);
                ui.ctx().request_repaint();
            }
        }
        if response.drag_stopped() {
            self.drag_active = false;
        }
    }
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, palette: &crate::theme::Palette) {
    let (fill, align, text_color) = match message.sender {
        Sender::User => (
            palette.user_message_bg,
            egui::Align::Max,
            Color32::from_rgb(0x16, 0x1A, 0x20),
        ),
        Sender::Ai => (palette.ai_message_bg, egui::Align::Min, palette.text),
    };

    ui.with_layout(egui::Layout::top_down(align), |ui| {
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::same(8))
            .corner_radius(CornerRadius::same(8))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                ui.label(RichText::new(&message.text).color(text_color));
                ui.label(RichText::new(&message.time).small().weak());
            });
    });
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::{clamp_sidebar_width, ChatView, Sender, SIDEBAR_DEFAULT_WIDTH};
    use serde_json::json;

    #[test]
    fn sidebar_width_is_clamped_to_bounds() {
        assert_eq!(clamp_sidebar_width(10.0), 150.0);
        assert_eq!(clamp_sidebar_width(-300.0), 150.0);
        assert_eq!(clamp_sidebar_width(2000.0), 500.0);
        assert_eq!(clamp_sidebar_width(250.0), 250.0);
        assert_eq!(clamp_sidebar_width(SIDEBAR_DEFAULT_WIDTH), 250.0);
    }

    #[test]
    fn transcript_starts_with_greeting() {
        let chat = ChatView::default();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].sender, Sender::Ai);
        assert!(chat.messages[0].text.starts_with("Hello!"));
    }

    #[test]
    fn whitespace_input_is_rejected_without_side_effects() {
        let mut chat = ChatView::default();
        chat.input = "   \t ".to_string();
        assert!(chat.prepare_send().is_none());
        assert_eq!(chat.messages.len(), 1);
        assert!(!chat.in_flight);
        // Input is left as typed; only a real send clears it.
        assert_eq!(chat.input, "   \t ");
    }

    #[test]
    fn send_appends_user_message_and_builds_request() {
        let mut chat = ChatView::default();
        chat.input = "list my pull requests".to_string();

        let request = chat.prepare_send().expect("non-empty input sends");
        assert_eq!(request.prompt, "list my pull requests");
        assert!(request.branch_name.is_none());
        assert!(chat.input.is_empty());
        assert!(chat.in_flight);
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].sender, Sender::User);
        assert_eq!(chat.messages[1].text, "list my pull requests");
    }

    #[test]
    fn create_pr_prompt_yields_parsed_request_fields() {
        let mut chat = ChatView::default();
        chat.input =
            r#"create a pr in acme/repo with branch "feat-x", title "Add X", and body "desc""#
                .to_string();

        let request = chat.prepare_send().expect("guided prompt sends");
        assert_eq!(request.branch_name.as_deref(), Some("feat-x"));
        assert_eq!(request.title.as_deref(), Some("Add X"));
        assert_eq!(request.body.as_deref(), Some("desc"));
    }

    #[test]
    fn completion_appends_formatted_response_and_history() {
        let mut chat = ChatView::default();
        chat.input = "show prs".to_string();
        let _ = chat.prepare_send();

        chat.on_action_completed("show prs".to_string(), &json!([]));

        assert!(!chat.in_flight);
        assert_eq!(chat.messages.last().map(|m| m.text.as_str()), Some("No items found."));
        assert_eq!(chat.sidebar.history().len(), 1);
        assert_eq!(chat.sidebar.response(), "No items found.");
    }

    #[test]
    fn failure_appends_backend_error_inline() {
        let mut chat = ChatView::default();
        chat.input = "show prs".to_string();
        let _ = chat.prepare_send();

        chat.on_action_failed(Some("Invalid token".to_string()));
        assert!(!chat.in_flight);
        assert_eq!(
            chat.messages.last().map(|m| m.text.as_str()),
            Some("Oops! Something went wrong: Invalid token")
        );
    }

    #[test]
    fn failure_without_backend_text_uses_generic_fallback() {
        let mut chat = ChatView::default();
        chat.on_action_failed(None);
        assert_eq!(
            chat.messages.last().map(|m| m.text.as_str()),
            Some("Oops! Something went wrong: Please try again later.")
        );
    }

    #[test]
    fn concurrent_completions_resolve_independently() {
        let mut chat = ChatView::default();
        chat.input = "first".to_string();
        let _ = chat.prepare_send();
        chat.input = "second".to_string();
        let _ = chat.prepare_send();

        // Second send resolves before the first; both land as ai messages.
        chat.on_action_completed("second".to_string(), &json!(["b"]));
        chat.on_action_completed("first".to_string(), &json!(["a"]));

        assert_eq!(chat.messages.len(), 5);
        assert_eq!(chat.sidebar.history().len(), 2);
        assert_eq!(chat.sidebar.history()[0].prompt, "second");
    }
}

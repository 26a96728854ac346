use crate::backend::BackendClient;
use crate::event::AppEvent;
use crate::profile::{store, Profile};
use crate::theme::ThemeName;
use crate::views::chat::ChatView;
use crate::views::login::LoginView;
use crate::views::settings::SettingsView;
use crate::views::signup::SignupView;
use crate::views::ViewNav;
use eframe::egui;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Chat,
    Settings,
}

/// Routing is a pure function of the requested route and authentication
/// state: authenticated users never see the auth screens and unauthenticated
/// users never see chat or settings.
pub fn resolve_route(route: Route, authenticated: bool) -> Route {
    match (route, authenticated) {
        (Route::Login | Route::Signup, true) => Route::Chat,
        (Route::Chat | Route::Settings, false) => Route::Login,
        (route, _) => route,
    }
}

pub struct OctochatApp {
    rx: Receiver<AppEvent>,
    backend: BackendClient,
    profile: Profile,
    route: Route,
    login: LoginView,
    signup: SignupView,
    chat: ChatView,
    settings: SettingsView,
}

impl OctochatApp {
    pub fn new(rx: Receiver<AppEvent>, backend: BackendClient, profile: Profile) -> Self {
        let route = resolve_route(Route::Chat, profile.is_authenticated());
        Self {
            rx,
            backend,
            profile,
            route,
            login: LoginView::default(),
            signup: SignupView::default(),
            chat: ChatView::default(),
            settings: SettingsView::default(),
        }
    }

    pub fn theme(&self) -> ThemeName {
        self.profile.theme
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginSucceeded { token } => {
                self.profile.token = Some(token);
                self.persist_profile();
                self.login = LoginView::default();
                self.navigate(Route::Chat);
            }
            AppEvent::LoginFailed { error } => self.login.on_login_failed(error),
            AppEvent::SignupSucceeded => self.signup.on_signup_succeeded(),
            AppEvent::SignupFailed { error } => self.signup.on_signup_failed(error),
            AppEvent::ActionCompleted { prompt, result } => {
                self.chat.on_action_completed(prompt, &result);
            }
            AppEvent::ActionFailed { error } => self.chat.on_action_failed(error),
        }
    }

    fn persist_profile(&self) {
        if let Err(err) = store::save(&self.profile) {
            tracing::warn!("failed to persist profile: {err}");
        }
    }

    fn navigate(&mut self, route: Route) {
        self.route = resolve_route(route, self.profile.is_authenticated());
    }

    fn logout(&mut self) {
        self.profile.token = None;
        self.persist_profile();
        // The transcript is per-session state; a fresh login starts clean.
        self.chat = ChatView::default();
        self.navigate(Route::Login);
    }

    fn handle_nav(&mut self, nav: ViewNav) {
        match nav {
            ViewNav::ToLogin => {
                self.signup = SignupView::default();
                self.navigate(Route::Login);
            }
            ViewNav::ToSignup => {
                self.login = LoginView::default();
                self.navigate(Route::Signup);
            }
            ViewNav::ToChat => self.navigate(Route::Chat),
            ViewNav::ToSettings => self.navigate(Route::Settings),
            ViewNav::Logout => self.logout(),
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context, theme: ThemeName) {
        self.profile.theme = theme;
        theme.apply(ctx);
        self.persist_profile();
    }

    fn is_busy(&self) -> bool {
        self.chat.is_busy() || self.login.is_busy() || self.signup.is_busy()
    }
}

impl eframe::App for OctochatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let nav = match self.route {
            Route::Login => self.login.show(ctx, &self.backend),
            Route::Signup => self.signup.show(ctx, &self.backend),
            Route::Chat => {
                let token = self.profile.token.clone().unwrap_or_default();
                self.chat
                    .show(ctx, self.profile.theme, &self.backend, &token)
            }
            Route::Settings => {
                let (theme, nav) = self.settings.show(ctx, self.profile.theme);
                if let Some(theme) = theme {
                    self.apply_theme(ctx, theme);
                }
                nav
            }
        };

        if let Some(nav) = nav {
            self.handle_nav(nav);
        }

        // Backend tasks finish outside the frame loop; poll for their events
        // while any request is outstanding.
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

pub mod chat;
pub mod login;
pub mod settings;
pub mod sidebar;
pub mod signup;

/// Navigation request a view hands back to the router after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewNav {
    ToLogin,
    ToSignup,
    ToChat,
    ToSettings,
    Logout,
}

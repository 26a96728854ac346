use serde_json::Value;

/// Events sent from backend request tasks to the UI thread.
///
/// `error` fields carry the backend-provided message when the response body
/// included one; `None` means a transport or decoding failure and the view
/// substitutes its own fallback text.
#[derive(Debug, Clone)]
pub enum AppEvent {
    LoginSucceeded { token: String },
    LoginFailed { error: Option<String> },
    SignupSucceeded,
    SignupFailed { error: Option<String> },
    ActionCompleted { prompt: String, result: Value },
    ActionFailed { error: Option<String> },
}

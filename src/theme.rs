use eframe::egui::{self, Color32, Stroke};
use serde::{Deserialize, Deserializer, Serialize};

/// The three selectable themes. New installs start on light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    Neon,
}

// Lenient on purpose: an unrecognized persisted name must cost only the
// theme (dark fallback), never the rest of the document it sits in.
impl<'de> Deserialize<'de> for ThemeName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(ThemeName::from_name(&name))
    }
}

/// The fixed set of named colors a theme supplies. Every entry is written on
/// each apply; there is no partial application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub container_bg: Color32,
    pub sidebar_bg: Color32,
    pub chat_bg: Color32,
    pub input_bg: Color32,
    pub ai_message_bg: Color32,
    pub user_message_bg: Color32,
    pub accent: Color32,
    pub border: Color32,
    pub hover_bg: Color32,
}

const fn rgb(code: u32) -> Color32 {
    Color32::from_rgb((code >> 16) as u8, (code >> 8) as u8, code as u8)
}

pub static LIGHT: Palette = Palette {
    background: rgb(0xFFFFFF),
    text: rgb(0x333333),
    container_bg: rgb(0xFFFFFF),
    sidebar_bg: rgb(0xF4F4F5),
    chat_bg: rgb(0xFFFFFF),
    input_bg: rgb(0xE5E7EB),
    ai_message_bg: rgb(0xE5E7EB),
    user_message_bg: rgb(0x4FD1C5),
    accent: rgb(0x14B8A6),
    border: rgb(0xD1D5DB),
    hover_bg: rgb(0xD1D5DB),
};

pub static DARK: Palette = Palette {
    background: rgb(0x0A0A0A),
    text: rgb(0xE0E0E0),
    container_bg: rgb(0x1E1E2F),
    sidebar_bg: rgb(0x1E1E2F),
    chat_bg: rgb(0x252537),
    input_bg: rgb(0x35354D),
    ai_message_bg: rgb(0x35354D),
    user_message_bg: rgb(0x00FFCC),
    accent: rgb(0x00FFCC),
    border: rgb(0x35354D),
    hover_bg: rgb(0x40405A),
};

pub static NEON: Palette = Palette {
    background: rgb(0x1A1A1A),
    text: rgb(0x00FFCC),
    container_bg: rgb(0x2A2A3C),
    sidebar_bg: rgb(0x2A2A3C),
    chat_bg: rgb(0x35354D),
    input_bg: rgb(0x40405A),
    ai_message_bg: rgb(0x40405A),
    user_message_bg: rgb(0x00FFCC),
    accent: rgb(0x00FFCC),
    border: rgb(0x4A4A6A),
    hover_bg: rgb(0x50507A),
};

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Light, ThemeName::Dark, ThemeName::Neon];

    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Light => "Light",
            ThemeName::Dark => "Dark",
            ThemeName::Neon => "Neon",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::Neon => "neon",
        }
    }

    /// Unrecognized names get the dark theme.
    pub fn from_name(name: &str) -> ThemeName {
        match name.to_ascii_lowercase().as_str() {
            "light" => ThemeName::Light,
            "neon" => ThemeName::Neon,
            _ => ThemeName::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
            ThemeName::Neon => &NEON,
        }
    }

    /// Writes the whole palette into the egui style in one `set_style` call.
    pub fn apply(self, ctx: &egui::Context) {
        let palette = self.palette();
        let mut visuals = match self {
            ThemeName::Light => egui::Visuals::light(),
            ThemeName::Dark | ThemeName::Neon => egui::Visuals::dark(),
        };
        visuals.panel_fill = palette.container_bg;
        visuals.window_fill = palette.container_bg;
        visuals.extreme_bg_color = palette.input_bg;
        visuals.override_text_color = Some(palette.text);
        visuals.widgets.noninteractive.bg_fill = palette.container_bg;
        visuals.widgets.noninteractive.fg_stroke.color = palette.text;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
        visuals.widgets.inactive.bg_fill = palette.input_bg;
        visuals.widgets.inactive.weak_bg_fill = palette.input_bg;
        visuals.widgets.inactive.fg_stroke.color = palette.text;
        visuals.widgets.hovered.bg_fill = palette.hover_bg;
        visuals.widgets.hovered.weak_bg_fill = palette.hover_bg;
        visuals.widgets.hovered.fg_stroke.color = palette.text;
        visuals.widgets.active.bg_fill = palette.accent;
        visuals.widgets.open.bg_fill = palette.hover_bg;
        visuals.selection.bg_fill = palette.accent;
        visuals.hyperlink_color = palette.accent;

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        ctx.set_style(style);
    }
}

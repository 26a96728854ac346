use crate::theme::ThemeName;
use crate::views::ViewNav;
use eframe::egui;

#[derive(Default)]
pub struct SettingsView;

impl SettingsView {
    /// Returns the newly selected theme, if any, alongside a navigation
    /// request. The caller applies and persists the theme.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        current: ThemeName,
    ) -> (Option<ThemeName>, Option<ViewNav>) {
        let mut selected = None;
        let mut nav = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.2);
                ui.set_max_width(360.0);
                ui.heading("Settings");
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.label("Theme:");
                    for theme in ThemeName::ALL {
                        if ui
                            .selectable_label(theme == current, theme.label())
                            .clicked()
                        {
                            selected = Some(theme);
                        }
                    }
                });

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui.button("Back").clicked() {
                        nav = Some(ViewNav::ToChat);
                    }
                    if ui.button("Logout").clicked() {
                        nav = Some(ViewNav::Logout);
                    }
                });
            });
        });

        (selected, nav)
    }
}

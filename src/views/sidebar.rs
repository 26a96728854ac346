use eframe::egui::{self, RichText, ScrollArea};

/// One completed prompt/response exchange, as shown in the History tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub prompt: String,
    pub response: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Response,
    History,
    Help,
}

const HELP_ITEMS: [(&str, &str); 5] = [
    (
        "Show open pull requests",
        "Show open pull requests for username/repo",
    ),
    ("Review a pull request", "Review PR #123 in username/repo"),
    ("Generate BDD tests", "Generate BDD tests for username/repo"),
    ("Fetch repository files", "Fetch all files from username/repo"),
    (
        "Create a pull request",
        "Create a PR in username/repo with branch \"feature-branch\", title \"New Feature\", and body \"Added new feature.\"",
    ),
];

/// The chat side panel. The chat view pushes each completed exchange here
/// directly, replacing the original's global broadcast event.
#[derive(Debug, Default)]
pub struct Sidebar {
    active_tab: SidebarTab,
    history: Vec<HistoryEntry>,
    response: String,
}

impl Sidebar {
    pub fn push_exchange(&mut self, entry: HistoryEntry) {
        if self.active_tab == SidebarTab::Response {
            self.response = entry.response.clone();
        }
        self.history.push(entry);
    }

    pub fn active_tab(&self) -> SidebarTab {
        self.active_tab
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    fn select_tab(&mut self, tab: SidebarTab) {
        self.active_tab = tab;
        if tab == SidebarTab::Response {
            self.response = self
                .history
                .last()
                .map(|entry| entry.response.clone())
                .unwrap_or_default();
        }
    }

    fn select_history(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            self.response = entry.response.clone();
            self.active_tab = SidebarTab::Response;
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Details");
        ui.separator();

        ui.horizontal(|ui| {
            for (tab, label) in [
                (SidebarTab::Response, "Response"),
                (SidebarTab::History, "History"),
                (SidebarTab::Help, "Help"),
            ] {
                if ui.selectable_label(self.active_tab == tab, label).clicked() {
                    self.select_tab(tab);
                }
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .id_salt("sidebar_content")
            .show(ui, |ui| match self.active_tab {
                SidebarTab::Response => {
                    // Always plain text, even though responses originate as
                    // formatted strings: nothing here is interpreted as markup.
                    let text = if self.response.is_empty() {
                        "No response yet."
                    } else {
                        &self.response
                    };
                    ui.label(RichText::new(text).monospace());
                }
                SidebarTab::History => {
                    let mut clicked = None;
                    for (index, entry) in self.history.iter().enumerate() {
                        let label = format!("{}\n{}", entry.prompt, entry.time);
                        if ui.selectable_label(false, label).clicked() {
                            clicked = Some(index);
                        }
                        ui.separator();
                    }
                    if let Some(index) = clicked {
                        self.select_history(index);
                    }
                }
                SidebarTab::Help => {
                    for (title, example) in HELP_ITEMS {
                        ui.strong(title);
                        ui.label(example);
                        ui.separator();
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryEntry, Sidebar, SidebarTab};

    fn entry(prompt: &str, response: &str) -> HistoryEntry {
        HistoryEntry {
            prompt: prompt.to_string(),
            response: response.to_string(),
            time: "01/01/2026, 12:00:00".to_string(),
        }
    }

    #[test]
    fn exchange_updates_response_when_response_tab_active() {
        let mut sidebar = Sidebar::default();
        sidebar.push_exchange(entry("list prs", "I found 2 items:"));
        assert_eq!(sidebar.response(), "I found 2 items:");
        assert_eq!(sidebar.history().len(), 1);
    }

    #[test]
    fn exchange_leaves_response_alone_on_other_tabs() {
        let mut sidebar = Sidebar::default();
        sidebar.select_tab(SidebarTab::Help);
        sidebar.push_exchange(entry("list prs", "I found 2 items:"));
        assert_eq!(sidebar.response(), "");

        // Returning to the Response tab shows the latest exchange.
        sidebar.select_tab(SidebarTab::Response);
        assert_eq!(sidebar.response(), "I found 2 items:");
    }

    #[test]
    fn history_click_selects_that_response() {
        let mut sidebar = Sidebar::default();
        sidebar.push_exchange(entry("first", "response one"));
        sidebar.push_exchange(entry("second", "response two"));

        sidebar.select_tab(SidebarTab::History);
        sidebar.select_history(0);
        assert_eq!(sidebar.active_tab(), SidebarTab::Response);
        assert_eq!(sidebar.response(), "response one");
    }
}

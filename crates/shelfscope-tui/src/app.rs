use crossterm::event::{KeyCode, KeyModifiers};

use shelfscope_core::{Book, QueryOutput, Session};

/// Input modes for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePanel {
    Achievements,
    Books,
}

/// Main application state: the engine session plus cursor positions.
///
/// Every state change re-runs `Session::query`; the app never reaches into
/// the index itself.
pub struct App {
    pub should_quit: bool,
    pub mode: Mode,
    pub active_panel: ActivePanel,

    pub session: Session,
    /// Result of the last query, rendered as-is.
    pub output: QueryOutput,

    /// Selected row in the book list.
    pub selected_index: usize,
    /// Selected row in the sidebar; 0 is the "all books" row, the rest map
    /// onto `achievement_names`.
    pub sidebar_selected: usize,

    pub search_input: String,
    pub status_message: String,
}

impl App {
    pub fn new(session: Session) -> Self {
        let search_input = session.filter.search.clone();
        let output = session.query();
        Self {
            should_quit: false,
            mode: Mode::Normal,
            active_panel: ActivePanel::Books,
            session,
            output,
            selected_index: 0,
            sidebar_selected: 0,
            search_input,
            status_message: String::new(),
        }
    }

    /// Re-run the query and clamp cursors to the new row counts.
    pub fn refresh(&mut self) {
        self.output = self.session.query();
        self.selected_index = self
            .selected_index
            .min(self.output.rows.len().saturating_sub(1));
        self.sidebar_selected = self.sidebar_selected.min(self.sidebar_rows() - 1);
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.output.rows.get(self.selected_index)
    }

    /// Sidebar row count: the "all books" row plus one per achievement.
    pub fn sidebar_rows(&self) -> usize {
        self.session.achievement_names().len() + 1
    }

    // ─── Key handling ───────────────────────────────────────

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::Search => self.handle_search_key(code),
            Mode::Normal => self.handle_normal_key(code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search_input.clear();
                self.session.filter.search.clear();
                self.mode = Mode::Normal;
                self.refresh();
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.session.filter.search = self.search_input.clone();
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.session.filter.search = self.search_input.clone();
                self.refresh();
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Tab => self.toggle_panel(),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.jump_to_top(),
            KeyCode::Char('G') => self.jump_to_bottom(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selection(),
            KeyCode::Char('d') => self.toggle_duplicates_only(),
            KeyCode::Char('m') => self.toggle_achievement_mode(),
            KeyCode::Char('s') => self.cycle_sort_field(),
            KeyCode::Char('S') => self.toggle_sort_direction(),
            KeyCode::Char('v') => self.toggle_view_mode(),
            KeyCode::Char('c') => self.clear_filters(),
            _ => {}
        }
    }

    fn toggle_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::Achievements => ActivePanel::Books,
            ActivePanel::Books => ActivePanel::Achievements,
        };
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = match self.active_panel {
            ActivePanel::Books => self.output.rows.len(),
            ActivePanel::Achievements => self.sidebar_rows(),
        };
        let selected = match self.active_panel {
            ActivePanel::Books => &mut self.selected_index,
            ActivePanel::Achievements => &mut self.sidebar_selected,
        };
        if rows == 0 {
            return;
        }
        let next = selected.saturating_add_signed(delta);
        *selected = next.min(rows - 1);
    }

    fn jump_to_top(&mut self) {
        match self.active_panel {
            ActivePanel::Books => self.selected_index = 0,
            ActivePanel::Achievements => self.sidebar_selected = 0,
        }
    }

    fn jump_to_bottom(&mut self) {
        match self.active_panel {
            ActivePanel::Books => {
                self.selected_index = self.output.rows.len().saturating_sub(1);
            }
            ActivePanel::Achievements => self.sidebar_selected = self.sidebar_rows() - 1,
        }
    }

    /// Enter/Space on a sidebar row toggles that achievement in the
    /// selection; the "all books" row clears the whole selection.
    fn activate_selection(&mut self) {
        if self.active_panel != ActivePanel::Achievements {
            return;
        }
        if self.sidebar_selected == 0 {
            self.session.filter.selected_achievements.clear();
            self.status_message = "Achievement filter cleared".to_string();
        } else if let Some(name) = self
            .session
            .achievement_names()
            .get(self.sidebar_selected - 1)
            .cloned()
        {
            let selected = &mut self.session.filter.selected_achievements;
            if !selected.remove(&name) {
                selected.insert(name.clone());
            }
            self.status_message = format!(
                "{} achievements selected",
                self.session.filter.selected_achievements.len()
            );
        }
        self.refresh();
    }

    fn toggle_duplicates_only(&mut self) {
        self.session.filter.duplicates_only = !self.session.filter.duplicates_only;
        self.status_message = if self.session.filter.duplicates_only {
            "Showing duplicates only".to_string()
        } else {
            "Showing all books".to_string()
        };
        self.refresh();
    }

    fn toggle_achievement_mode(&mut self) {
        self.session.filter.achievement_mode = self.session.filter.achievement_mode.toggle();
        self.status_message = format!("Match {}", self.session.filter.achievement_mode);
        self.refresh();
    }

    fn cycle_sort_field(&mut self) {
        self.session.sort.field = self.session.sort.field.next();
        self.status_message = format!("Sort by {}", self.session.sort.field.label());
        self.refresh();
    }

    fn toggle_sort_direction(&mut self) {
        self.session.sort.direction = self.session.sort.direction.toggle();
        self.refresh();
    }

    fn toggle_view_mode(&mut self) {
        self.session.view = self.session.view.toggle();
        self.status_message = format!("{} view", self.session.view.label());
        self.refresh();
    }

    fn clear_filters(&mut self) {
        self.search_input.clear();
        self.session.filter = Default::default();
        self.status_message = "Filters cleared".to_string();
        self.refresh();
    }
}

// ─── Tests ─────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use shelfscope_core::{AchievementMode, SeasonArtifact, SortField, ViewMode};

    fn app() -> App {
        let artifact = SeasonArtifact::from_json(
            r#"{
                "achievements": [
                    {"name": "Sci-Fi", "books": [
                        {"title": "Dune", "author": "Frank Herbert"},
                        {"title": "Neuromancer", "author": "William Gibson"}
                    ]},
                    {"name": "Classics", "books": [
                        {"title": "Emma", "author": "Jane Austen"}
                    ]}
                ],
                "dedupe": {"duplicates_by_title_author": [
                    {"title": "Dune", "author": "Frank Herbert",
                     "achievements": ["Sci-Fi", "Classics"]}
                ]}
            }"#,
        )
        .unwrap();
        App::new(Session::new(artifact))
    }

    fn press(app: &mut App, c: char) {
        app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        press(&mut app, 'q');
        assert!(app.should_quit);

        let mut app = self::app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_mode_edits_filter_live() {
        let mut app = app();
        press(&mut app, '/');
        assert_eq!(app.mode, Mode::Search);

        for c in "emma".chars() {
            press(&mut app, c);
        }
        assert_eq!(app.session.filter.search, "emma");
        assert_eq!(app.output.rows.len(), 1);

        app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.session.filter.search, "emm");

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.session.filter.search, "");
        assert_eq!(app.output.rows.len(), 3);
    }

    #[test]
    fn test_duplicates_toggle_clamps_selection() {
        let mut app = app();
        app.selected_index = 2;
        press(&mut app, 'd');
        assert!(app.session.filter.duplicates_only);
        assert_eq!(app.output.rows.len(), 1);
        assert_eq!(app.selected_index, 0);
        press(&mut app, 'd');
        assert!(!app.session.filter.duplicates_only);
    }

    #[test]
    fn test_sidebar_toggles_achievement_selection() {
        let mut app = app();
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.active_panel, ActivePanel::Achievements);

        // Names are sorted: row 1 = "Classics", row 2 = "Sci-Fi".
        press(&mut app, 'j');
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(
            app.session
                .filter
                .selected_achievements
                .contains("Classics")
        );
        assert_eq!(app.output.rows.len(), 1);

        // Toggling again deselects.
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.session.filter.selected_achievements.is_empty());

        // The "all books" row clears everything.
        press(&mut app, 'j');
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        press(&mut app, 'g');
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.session.filter.selected_achievements.is_empty());
    }

    #[test]
    fn test_mode_sort_and_view_keys() {
        let mut app = app();
        press(&mut app, 'm');
        assert_eq!(app.session.filter.achievement_mode, AchievementMode::All);
        press(&mut app, 's');
        assert_eq!(app.session.sort.field, SortField::Author);
        press(&mut app, 'v');
        assert_eq!(app.session.view, ViewMode::Grid);
    }

    #[test]
    fn test_clear_filters_resets_everything() {
        let mut app = app();
        press(&mut app, '/');
        press(&mut app, 'x');
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        press(&mut app, 'd');
        press(&mut app, 'c');
        assert_eq!(app.session.filter.search, "");
        assert!(!app.session.filter.duplicates_only);
        assert_eq!(app.output.rows.len(), 3);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, 'j');
        }
        assert_eq!(app.selected_index, 2);
        press(&mut app, 'G');
        assert_eq!(app.selected_index, 2);
        press(&mut app, 'g');
        assert_eq!(app.selected_index, 0);
        press(&mut app, 'k');
        assert_eq!(app.selected_index, 0);
    }
}

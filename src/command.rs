use crate::nav::Section;
use crate::theme::Theme;

/// A key press, with the modifiers the palette cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(Section),
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Navigation,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub label: String,
    pub group: Group,
    pub action: Action,
}

/// The quick-navigation overlay opened with Ctrl+K / Cmd+K.
#[derive(Debug, Default)]
pub struct CommandPalette {
    open: bool,
    query: String,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Returns whether the key was the palette shortcut, in which case the browser's default should be suppressed.
    pub fn handle_key(&mut self, chord: KeyChord) -> bool {
        if chord.key == "k" && (chord.ctrl || chord.meta) {
            self.toggle();
            true
        } else {
            false
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Every command, unfiltered.
    pub fn commands(theme: Theme) -> Vec<Command> {
        let mut commands: Vec<_> = Section::ALL
            .iter()
            .map(|&section| Command {
                label: section.label().to_owned(),
                group: Group::Navigation,
                action: Action::Navigate(section),
            })
            .collect();

        let other = if theme.is_dark() { "Light" } else { "Dark" };
        commands.push(Command {
            label: format!("Toggle {} Mode", other),
            group: Group::Settings,
            action: Action::ToggleTheme,
        });

        commands
    }

    /// The commands whose label contains the query, ignoring case.
    pub fn entries(&self, theme: Theme) -> Vec<Command> {
        let query = self.query.trim().to_lowercase();
        Self::commands(theme)
            .into_iter()
            .filter(|command| command.label.to_lowercase().contains(&query))
            .collect()
    }

    /// Navigating closes the palette; toggling the theme leaves it open so the change can be seen.
    pub fn select(&mut self, command: &Command) -> Action {
        if let Action::Navigate(_) = command.action {
            self.close();
        }
        command.action
    }
}

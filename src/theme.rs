use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The key the theme is persisted under.
pub const THEME_KEY: &str = "theme";

/// Class put on the document root while the light theme is active.
pub const LIGHT_CLASS: &str = "light";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme {0:?}")]
pub struct UnknownTheme(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value storage that outlives the page, like `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keeps everything in memory, for hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStore(RefCell<HashMap<String, String>>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// The browser's `localStorage`, stored as plain strings rather than JSON so the values stay readable.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::LocalStorage;
        use gloo_storage::Storage;

        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::LocalStorage;
        use gloo_storage::Storage;

        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

/// The current theme, backed by some storage.
pub struct ThemeState<S> {
    theme: Theme,
    store: S,
}

impl<S: KeyValueStore> ThemeState<S> {
    /// Restores the stored theme, falling back to dark.
    pub fn load(store: S) -> Self {
        let theme = match store.get(THEME_KEY) {
            Some(stored) => stored.parse::<Theme>().unwrap_or_else(|err| {
                log::warn!("{}, using the dark theme", err);
                Theme::default()
            }),
            None => Theme::default(),
        };

        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flips the theme and persists it. The theme still changes for this page if storage fails.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            log::warn!("couldn't save theme: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn defaults_to_dark() {
        let state = ThemeState::load(MemoryStore::default());
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!(state.store().get(THEME_KEY), None);
    }

    #[test]
    fn toggle_persists_verbatim() {
        let mut state = ThemeState::load(MemoryStore::default());

        assert_eq!(state.toggle(), Theme::Light);
        assert_eq!(state.store().get(THEME_KEY).as_deref(), Some("light"));

        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.store().get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn restored_on_next_load() {
        let mut state = ThemeState::load(MemoryStore::default());
        state.toggle();

        let reloaded = ThemeState::load(state.store);
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn unknown_value_falls_back_to_dark() {
        let store = MemoryStore::default();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeState::load(store).theme(), Theme::Dark);
    }

    #[test]
    fn storage_failure_still_switches() {
        let mut state = ThemeState::load(BrokenStore);
        assert_eq!(state.toggle(), Theme::Light);
        assert_eq!(state.theme(), Theme::Light);
    }

    #[test]
    fn parses_exact_names() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }
}

use std::sync::Mutex;

use crate::models::domain::Theme;

/// Durable home for the theme flag. The host environment owns the actual
/// storage (browser local storage, a dotfile, ...); the controller reads once
/// at startup and writes on every toggle.
pub trait ThemeStore: Send + Sync {
    /// `None` means nothing stored yet; the caller falls back to the default.
    fn load(&self) -> Option<Theme>;
    fn save(&self, theme: Theme);
}

/// Process-local store, good enough for tests and hosts without durable
/// storage.
#[derive(Default)]
pub struct InMemoryThemeStore {
    theme: Mutex<Option<Theme>>,
}

impl InMemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl ThemeStore for InMemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        *self.theme.lock().expect("theme store lock poisoned")
    }

    fn save(&self, theme: Theme) {
        *self.theme.lock().expect("theme store lock poisoned") = Some(theme);
    }
}

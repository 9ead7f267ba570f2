use serde::Serialize;

/// Where the effective dark mode value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Saved,
    System,
}

/// Dark mode preference: a saved choice, else the system default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    saved: Option<bool>,
    system_dark: bool,
}

impl ThemePreference {
    pub fn new(saved: Option<bool>, system_dark: bool) -> Self {
        Self { saved, system_dark }
    }

    pub fn is_dark(&self) -> bool {
        self.saved.unwrap_or(self.system_dark)
    }

    pub fn saved(&self) -> Option<bool> {
        self.saved
    }

    pub fn source(&self) -> ThemeSource {
        if self.saved.is_some() {
            ThemeSource::Saved
        } else {
            ThemeSource::System
        }
    }

    pub fn set(&mut self, dark: bool) {
        self.saved = Some(dark);
    }

    /// Flip the effective value and save it. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        let dark = !self.is_dark();
        self.set(dark);
        dark
    }
}

use serde::{Deserialize, Serialize};

/// Severity of a flash message, mirrors the alert styles of the UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Danger,
    Info,
}

/// One-shot message shown on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

/// Server-side view of the session cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionData {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub flashes: Vec<Flash>,
}

impl SessionData {
    pub fn log_in(&mut self, username: impl Into<String>) {
        self.logged_in = true;
        self.username = Some(username.into());
    }

    pub fn log_out(&mut self) {
        self.logged_in = false;
        self.username = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn flash(&mut self, category: FlashCategory, message: impl Into<String>) {
        self.flashes.push(Flash {
            category,
            message: message.into(),
        });
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }
}

/// JSON document answered by page routes in place of a rendered template.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub page: &'static str,
    pub flashes: Vec<Flash>,
    pub data: T,
}

// The one persisted setting: the visitor's chosen theme, kept in localStorage

use crate::config::Theme;
use crate::error::FieldError;
use web_sys::{Storage, Window};

pub const THEME_KEY: &str = "portfolio-theme";

fn local_storage(window: &Window) -> Result<Option<Storage>, FieldError> {
    window.local_storage().map_err(FieldError::browser)
}

// Saved theme, if one was stored and still names a known theme
pub fn load_theme(window: &Window) -> Option<Theme> {
    let storage = local_storage(window).ok().flatten()?;
    let saved = storage.get_item(THEME_KEY).ok().flatten()?;
    saved.parse().ok()
}

pub fn save_theme(window: &Window, theme: Theme) -> Result<(), FieldError> {
    match local_storage(window)? {
        Some(storage) => storage
            .set_item(THEME_KEY, theme.as_str())
            .map_err(FieldError::browser),
        // Storage disabled by the browser; nothing to persist into
        None => Ok(()),
    }
}

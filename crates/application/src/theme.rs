//! Theme resolution and the current theme selection.

use bookconnect_core::{ThemePreference, ThemeValue};
use tracing::debug;

use crate::sink::RenderSink;

/// Explicit colour-scheme override, `dark` or `light`.
pub const COLOR_SCHEME_ENV: &str = "BOOKCONNECT_COLOR_SCHEME";

/// Terminal convention `"<fg>;<bg>"` (sometimes `"<fg>;<default>;<bg>"`).
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// Source of the environment's colour-scheme preference.
pub trait ColorSchemeProbe: std::fmt::Debug {
    fn prefers_dark(&self) -> bool;
}

/// Reads the preference from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorScheme;

impl ColorSchemeProbe for EnvColorScheme {
    fn prefers_dark(&self) -> bool {
        let explicit = std::env::var(COLOR_SCHEME_ENV).ok();
        let colorfgbg = std::env::var(COLORFGBG_ENV).ok();
        prefers_dark_from(explicit.as_deref(), colorfgbg.as_deref())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeProbe for FixedColorScheme {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// An explicit override wins; otherwise a dark `COLORFGBG` background
/// (ANSI 0-6 or 8) counts as a dark preference. No signal means light.
pub fn prefers_dark_from(explicit: Option<&str>, colorfgbg: Option<&str>) -> bool {
    if let Some(value) = explicit {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "night" => return true,
            "light" | "day" => return false,
            _ => {}
        }
    }

    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg <= 6 || bg == 8)
}

pub fn probe_for(preference: ThemePreference) -> Box<dyn ColorSchemeProbe> {
    match preference {
        ThemePreference::Auto => Box::new(EnvColorScheme),
        ThemePreference::Day => Box::new(FixedColorScheme(false)),
        ThemePreference::Night => Box::new(FixedColorScheme(true)),
    }
}

/// The committed theme. Only [`ThemeResolver::apply`] changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    current: ThemeValue,
}

impl ThemeState {
    pub(crate) fn new(current: ThemeValue) -> Self {
        Self { current }
    }

    pub fn current(&self) -> ThemeValue {
        self.current
    }
}

#[derive(Debug)]
pub struct ThemeResolver {
    probe: Box<dyn ColorSchemeProbe>,
}

impl ThemeResolver {
    pub fn new(probe: Box<dyn ColorSchemeProbe>) -> Self {
        Self { probe }
    }

    pub fn from_preference(preference: ThemePreference) -> Self {
        Self::new(probe_for(preference))
    }

    pub fn initialize(&self) -> ThemeValue {
        if self.probe.prefers_dark() {
            ThemeValue::Night
        } else {
            ThemeValue::Day
        }
    }

    /// Accepts `day`/`night`; anything else falls back to the environment preference.
    pub fn validate(&self, requested: &str) -> ThemeValue {
        match requested.parse::<ThemeValue>() {
            Ok(theme) => theme,
            Err(_) => {
                let fallback = self.initialize();
                debug!(requested, %fallback, "unrecognised theme, using environment preference");
                fallback
            }
        }
    }

    pub fn apply(&self, state: &mut ThemeState, theme: ThemeValue, sink: &mut dyn RenderSink) {
        sink.apply_theme_colors(theme.colors());
        state.current = theme;
    }
}

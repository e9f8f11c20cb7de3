//! # UI Theme State
//!
//! Nearly every screen renders differently in light and dark mode. Instead of
//! threading a `dark_mode: bool` through every call, the process has one
//! [`ThemeStore`] that is read and subscribed to explicitly:
//!
//! - [`ThemeStore::current`] reads the theme.
//! - [`ThemeStore::set`] / [`ThemeStore::toggle`] change it.
//! - [`ThemeStore::subscribe`] registers a callback that fires on every
//!   actual change (setting the current theme again is a no-op).
//!
//! [`global`] returns the process-wide instance. Tests and embedders that want
//! isolation can build their own `ThemeStore`. Nothing here is persisted.
//!
//! Rendering code does not branch on the theme either: it asks the
//! [`Palette`] for a semantic color.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::attributes::CategoryStyle;
use crate::error::ShopdeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        Palette::for_theme(self)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = ShopdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ShopdeckError::Config(format!(
                "unknown theme '{}', expected light or dark",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(Theme) + Send + Sync>;

pub struct ThemeStore {
    theme: RwLock<Theme>,
    listeners: Mutex<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.current())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ThemeStore {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: RwLock::new(theme),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn current(&self) -> Theme {
        *self.theme.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change the theme. Returns whether it actually changed.
    ///
    /// Listeners run after the lock is released, so they may read the store.
    pub fn set(&self, theme: Theme) -> bool {
        self.update(|_| theme).1
    }

    /// Flip the theme and return the new one.
    pub fn toggle(&self) -> Theme {
        self.update(Theme::toggled).0
    }

    /// Computes the next theme from the current one under the write lock,
    /// then notifies listeners if it changed.
    fn update(&self, next: impl FnOnce(Theme) -> Theme) -> (Theme, bool) {
        let (theme, changed) = {
            let mut current = self.theme.write().unwrap_or_else(PoisonError::into_inner);
            let theme = next(*current);
            let changed = *current != theme;
            *current = theme;
            (theme, changed)
        };
        if changed {
            self.notify(theme);
        }
        (theme, changed)
    }

    fn notify(&self, theme: Theme) {
        tracing::debug!(%theme, "theme changed");
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(theme);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

static GLOBAL: Lazy<ThemeStore> = Lazy::new(ThemeStore::default);

/// The process-wide theme store.
pub fn global() -> &'static ThemeStore {
    &GLOBAL
}

/// Terminal-agnostic color names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Black,
    White,
    Grey,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

/// Semantic colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: ColorName,
    pub muted: ColorName,
    pub accent: ColorName,
    pub positive: ColorName,
    pub warning: ColorName,
    pub negative: ColorName,
    /// Used for unknown category values.
    pub neutral: ColorName,
    categories: &'static [ColorName],
}

const LIGHT_CATEGORIES: &[ColorName] = &[
    ColorName::Green,
    ColorName::Blue,
    ColorName::Magenta,
    ColorName::Yellow,
    ColorName::Red,
    ColorName::Cyan,
];

const DARK_CATEGORIES: &[ColorName] = &[
    ColorName::Green,
    ColorName::Cyan,
    ColorName::Magenta,
    ColorName::Yellow,
    ColorName::Red,
    ColorName::Blue,
];

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: ColorName::Black,
                muted: ColorName::Grey,
                accent: ColorName::Blue,
                positive: ColorName::Green,
                warning: ColorName::Yellow,
                negative: ColorName::Red,
                neutral: ColorName::Grey,
                categories: LIGHT_CATEGORIES,
            },
            Theme::Dark => Self {
                text: ColorName::White,
                muted: ColorName::Grey,
                accent: ColorName::Cyan,
                positive: ColorName::Green,
                warning: ColorName::Yellow,
                negative: ColorName::Red,
                neutral: ColorName::Grey,
                categories: DARK_CATEGORIES,
            },
        }
    }

    /// Color for a category badge. Unknown values get the neutral color.
    pub fn category(&self, style: CategoryStyle) -> ColorName {
        match style {
            CategoryStyle::Known(position) => self.categories[position % self.categories.len()],
            CategoryStyle::Neutral => self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn parse_and_display() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn set_reports_change() {
        let store = ThemeStore::new(Theme::Light);
        assert!(!store.set(Theme::Light));
        assert!(store.set(Theme::Dark));
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn toggle_flips() {
        let store = ThemeStore::default();
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
    }

    #[test]
    fn concurrent_toggles_each_take_effect() {
        let store = Arc::new(ThemeStore::new(Theme::Light));
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50).map(|_| store.toggle()).collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<Theme> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(calls.load(Ordering::SeqCst), 400);
        let darks = results.iter().filter(|t| **t == Theme::Dark).count();
        assert_eq!(darks, 200);
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn listeners_fire_only_on_change() {
        let store = ThemeStore::new(Theme::Light);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.subscribe(move |theme| {
            assert_eq!(theme, Theme::Dark);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set(Theme::Light);
        store.set(Theme::Dark);
        store.set(Theme::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = ThemeStore::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn listeners_may_read_the_store() {
        let store = Arc::new(ThemeStore::default());
        let inner = Arc::clone(&store);
        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        store.subscribe(move |_| {
            *sink.lock().unwrap() = Some(inner.current());
        });
        store.set(Theme::Dark);
        assert_eq!(*observed.lock().unwrap(), Some(Theme::Dark));
    }

    #[test]
    fn palette_neutral_for_unknown_categories() {
        let palette = Theme::Dark.palette();
        assert_eq!(palette.category(CategoryStyle::Neutral), ColorName::Grey);
        assert_eq!(palette.category(CategoryStyle::Known(0)), ColorName::Green);
        assert_eq!(
            palette.category(CategoryStyle::Known(6)),
            palette.category(CategoryStyle::Known(0))
        );
    }

    #[test]
    fn global_store_is_shared() {
        assert!(std::ptr::eq(global(), global()));
    }
}

//! Terminal styles.
//!
//! The library describes colors semantically through a [`Palette`] per theme
//! (text, muted, accent, one color per category position, ...). This module
//! is the last step: it turns those names into `console` styles. Renderers
//! only ask for semantic styles, never for raw colors, so switching between
//! light and dark terminals touches nothing but the palette.
//!
//! Both variants are built once through `once_cell::sync::Lazy`.

use console::{Color, Style};
use once_cell::sync::Lazy;
use shopdeck::attributes::CategoryStyle;
use shopdeck::theme::{self, ColorName, Palette, Theme};

pub struct Styles {
    palette: Palette,
    pub text: Style,
    pub muted: Style,
    pub header: Style,
    pub accent: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub star: Style,
}

impl Styles {
    fn for_theme(theme: Theme) -> Self {
        let palette = theme.palette();
        Self {
            palette,
            text: paint(palette.text),
            muted: paint(palette.muted).dim(),
            header: paint(palette.text).bold().underlined(),
            accent: paint(palette.accent).bold(),
            success: paint(palette.positive),
            warning: paint(palette.warning),
            error: paint(palette.negative).bold(),
            star: paint(ColorName::Yellow),
        }
    }

    /// Style for a category badge.
    pub fn category(&self, style: CategoryStyle) -> Style {
        match style {
            CategoryStyle::Known(_) => paint(self.palette.category(style)),
            CategoryStyle::Neutral => paint(self.palette.neutral).italic(),
        }
    }
}

fn paint(name: ColorName) -> Style {
    let color = match name {
        ColorName::Black => Color::Black,
        ColorName::White => Color::White,
        ColorName::Grey => Color::Color256(244),
        ColorName::Red => Color::Red,
        ColorName::Green => Color::Green,
        ColorName::Yellow => Color::Yellow,
        ColorName::Blue => Color::Blue,
        ColorName::Magenta => Color::Magenta,
        ColorName::Cyan => Color::Cyan,
    };
    Style::new().fg(color)
}

static LIGHT: Lazy<Styles> = Lazy::new(|| Styles::for_theme(Theme::Light));
static DARK: Lazy<Styles> = Lazy::new(|| Styles::for_theme(Theme::Dark));

/// Styles for the process-wide theme.
pub fn current() -> &'static Styles {
    match theme::global().current() {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "appTheme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                bg: Color::Rgb(18, 20, 28),
                panel: Color::Rgb(28, 32, 44),
                text: Color::Rgb(226, 230, 240),
                muted: Color::Rgb(130, 138, 160),
                accent: Color::Rgb(236, 86, 86),
                highlight: Color::Rgb(255, 203, 5),
                favorite: Color::Rgb(255, 120, 160),
                placeholder: Color::Rgb(40, 44, 58),
            },
            Theme::Light => Palette {
                bg: Color::Rgb(244, 244, 248),
                panel: Color::Rgb(255, 255, 255),
                text: Color::Rgb(30, 32, 40),
                muted: Color::Rgb(110, 114, 128),
                accent: Color::Rgb(204, 48, 48),
                highlight: Color::Rgb(42, 117, 187),
                favorite: Color::Rgb(214, 51, 108),
                placeholder: Color::Rgb(232, 232, 238),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub favorite: Color,
    pub placeholder: Color,
}

/// Color for a type badge, keyed by the API's type names.
pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(168, 167, 122),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "electric" => Color::Rgb(247, 208, 44),
        "grass" => Color::Rgb(122, 199, 76),
        "ice" => Color::Rgb(150, 217, 214),
        "fighting" => Color::Rgb(194, 46, 40),
        "poison" => Color::Rgb(163, 62, 161),
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::Rgb(169, 143, 243),
        "psychic" => Color::Rgb(249, 85, 135),
        "bug" => Color::Rgb(166, 185, 26),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "dark" => Color::Rgb(112, 87, 70),
        "steel" => Color::Rgb(183, 183, 206),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => Color::Gray,
    }
}

/// Stat bar color by base value: <60 low, <90 mid, <120 high, else top.
pub fn stat_color(value: u32) -> Color {
    match value {
        0..=59 => Color::Rgb(243, 68, 68),
        60..=89 => Color::Rgb(255, 159, 26),
        90..=119 => Color::Rgb(160, 229, 21),
        _ => Color::Rgb(35, 205, 94),
    }
}

//! Terminal color theme
//!
//! Dark and light palettes. Auto-detects via the COLORFGBG env var, or
//! manual override with HAUNTED_LIGHT_BG=1.

use hm_core::Tile;
use ratatui::style::Color;

/// Color theme for the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (key help)
    pub text_dim: Color,
    pub border: Color,
    /// Title and section accents
    pub accent: Color,
    /// Positive reward, escaped
    pub good: Color,
    /// Negative reward
    pub bad: Color,

    pub floor: Color,
    pub door: Color,
    pub ghost: Color,
    pub candy: Color,
    pub agent: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::LightMagenta,
            good: Color::Green,
            bad: Color::Red,
            floor: Color::DarkGray,
            door: Color::Yellow,
            ghost: Color::LightCyan,
            candy: Color::LightRed,
            agent: Color::White,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Magenta,
            good: Color::Green,
            bad: Color::Red,
            floor: Color::Gray,
            door: Color::Yellow,
            ghost: Color::Blue,
            candy: Color::Red,
            agent: Color::Black,
        }
    }

    /// Auto-detect terminal background and return the matching theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn tile_color(&self, tile: Tile) -> Color {
        match tile {
            Tile::Floor => self.floor,
            Tile::Door => self.door,
            Tile::Ghost => self.ghost,
            Tile::Candy => self.candy,
            Tile::Agent => self.agent,
        }
    }

    /// Color for a reward value: green if positive, red if negative.
    pub fn reward_color(&self, reward: f64) -> Color {
        if reward > 0.0 {
            self.good
        } else if reward < 0.0 {
            self.bad
        } else {
            self.text
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("HAUNTED_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with 0-15 color indices.
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

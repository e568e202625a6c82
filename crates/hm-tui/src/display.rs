//! Glyph system for TUI rendering
//!
//! Provides a classic ASCII set and a fancy Unicode set for the board.

use hm_core::Tile;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// Available graphics modes for the TUI.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumString,
    VariantNames,
    Default,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GraphicsMode {
    /// Classic ASCII characters.
    Classic,
    /// Fancy Unicode characters.
    Fancy,
    /// Automatically detect support.
    #[default]
    Auto,
}

/// Set of glyphs used for rendering board tiles.
pub trait GlyphSet: Send + Sync {
    fn tile_char(&self, tile: Tile) -> char;
}

/// Plain ASCII glyph set.
pub struct ClassicGlyphs;

impl GlyphSet for ClassicGlyphs {
    fn tile_char(&self, tile: Tile) -> char {
        tile.to_ascii()
    }
}

/// Unicode glyph set. Every glyph is a single terminal column wide.
pub struct FancyGlyphs;

impl GlyphSet for FancyGlyphs {
    fn tile_char(&self, tile: Tile) -> char {
        match tile {
            Tile::Floor => '·',
            Tile::Door => '▣',
            Tile::Ghost => 'ᗣ',
            Tile::Candy => '●',
            Tile::Agent => '☺',
        }
    }
}

/// Detect if the terminal supports Unicode/UTF-8.
pub fn supports_unicode() -> bool {
    for var in ["LANG", "LC_ALL", "LC_CTYPE"] {
        if let Ok(val) = std::env::var(var) {
            let val = val.to_uppercase();
            if val.contains("UTF-8") || val.contains("UTF8") {
                return true;
            }
        }
    }

    // Most modern terminals handle UTF-8 even without a locale hint.
    if let Ok(term) = std::env::var("TERM") {
        if matches!(
            term.as_str(),
            "xterm-256color" | "alacritty" | "kitty" | "iterm" | "wezterm"
        ) {
            return true;
        }
    }

    false
}

/// Returns the best available glyph set for the current environment.
pub fn detect_glyph_set(mode: GraphicsMode) -> Box<dyn GlyphSet> {
    match mode {
        GraphicsMode::Classic => Box::new(ClassicGlyphs),
        GraphicsMode::Fancy => Box::new(FancyGlyphs),
        GraphicsMode::Auto => {
            if supports_unicode() {
                Box::new(FancyGlyphs)
            } else {
                Box::new(ClassicGlyphs)
            }
        }
    }
}

//! Highlight payload stored in each overlay cell

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::{GLYPH_MOVE, GLYPH_NONE};

/// Visual marker shown on an overlay cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Highlight {
    /// Nothing drawn
    #[default]
    None,
    /// Cell is reachable by the selected unit
    Move,
}

impl Highlight {
    /// Single-character label used by the text view
    pub const fn glyph(self) -> char {
        match self {
            Self::None => GLYPH_NONE,
            Self::Move => GLYPH_MOVE,
        }
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Move => write!(f, "Move"),
        }
    }
}

/// Overlay cell payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileState {
    /// Current marker, `None` on creation
    pub highlight: Highlight,
}

impl TileState {
    /// Create a cell showing `highlight`
    pub const fn new(highlight: Highlight) -> Self {
        Self { highlight }
    }
}

//! Shared component rendering context
//!
//! `ComponentContext` carries what a component needs from its surroundings
//! while rendering: focus, whether it sits inside an overlay, and the active
//! palette.

use crate::theme::{Palette, ThemeMode};

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    overlay: bool,
    palette: Palette,
}

impl ComponentContext {
    pub fn new(palette: Palette) -> Self {
        Self {
            focused: false,
            overlay: false,
            palette,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(ThemeMode::default().palette())
    }
}

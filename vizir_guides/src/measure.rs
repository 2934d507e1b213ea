// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Guide boxes need label and title extents before they can be packed. Shaping stays
//! downstream, so drawing accepts a measurer and callers plug in whatever backend they
//! have, or use [`HeuristicTextMeasurer`].

/// A minimal text measurement interface used when drawing guides.
pub trait TextMeasurer {
    /// Returns `(width, height)` of a single line in layout units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

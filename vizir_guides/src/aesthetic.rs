// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-positional aesthetics that can carry a guide.

use core::fmt;

/// An aesthetic that a legend or colorbar can explain.
///
/// Positional aesthetics (`x`, `y`) are explained by axes and never appear here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Aesthetic {
    /// Opacity.
    Alpha,
    /// Stroke/outline color.
    Color,
    /// Fill color.
    Fill,
    /// Line dash pattern.
    Linetype,
    /// Point shape.
    Shape,
    /// Point size or line width.
    Size,
}

impl Aesthetic {
    /// All guide aesthetics, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Alpha,
        Self::Color,
        Self::Fill,
        Self::Linetype,
        Self::Shape,
        Self::Size,
    ];

    /// Parses an aesthetic name.
    ///
    /// `colour` is accepted as an alias for `color`. Unrecognized names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "alpha" => Some(Self::Alpha),
            "color" | "colour" => Some(Self::Color),
            "fill" => Some(Self::Fill),
            "linetype" => Some(Self::Linetype),
            "shape" => Some(Self::Shape),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    /// Returns the canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Color => "color",
            Self::Fill => "fill",
            Self::Linetype => "linetype",
            Self::Shape => "shape",
            Self::Size => "size",
        }
    }

    /// Whether this aesthetic maps onto a color.
    pub fn is_colour(self) -> bool {
        matches!(self, Self::Color | Self::Fill)
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

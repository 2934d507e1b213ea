// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The trained-scale view that guides consume.
//!
//! Scale training and value mapping happen upstream. By the time guides are built, a scale is
//! reduced to its aesthetics, an optional guide request, an optional title, and its breaks:
//! data values with display labels and the visual value each one maps to.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::{Aesthetic, GuideSpec, Symbol};

/// Line dash patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Linetype {
    /// Continuous line.
    Solid,
    /// Long dashes.
    Dashed,
    /// Dots.
    Dotted,
    /// Alternating dots and dashes.
    DotDash,
}

impl Linetype {
    /// Dash pattern in multiples of the line width; empty for solid lines.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[4.0, 4.0],
            Self::Dotted => &[1.0, 3.0],
            Self::DotDash => &[1.0, 3.0, 4.0, 3.0],
        }
    }
}

/// A visual value produced by mapping a data value through a scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AesValue {
    /// A color (for `color` and `fill`).
    Color(Color),
    /// Opacity in `0..=1`.
    Alpha(f64),
    /// A point shape.
    Shape(Symbol),
    /// A point size or line width.
    Size(f64),
    /// A dash pattern.
    Linetype(Linetype),
}

impl AesValue {
    /// Returns the color, if this is a color value.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// Whether a scale maps discrete levels or a continuous range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Categorical levels.
    Discrete,
    /// A continuous range.
    Continuous,
}

/// One break of a trained scale.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBreak {
    /// Data value (the level index for discrete scales).
    pub value: f64,
    /// Display label.
    pub label: String,
    /// Visual value the break maps to.
    pub mapped: AesValue,
}

/// A trained scale for one or more non-positional aesthetics.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    /// Aesthetics this scale maps; the first is the primary one. Never empty.
    pub aesthetics: SmallVec<[Aesthetic; 2]>,
    /// Guide requested by the scale; `None` means "use the default for the scale type".
    pub guide: Option<GuideSpec>,
    /// Optional display title.
    pub name: Option<String>,
    /// Discrete or continuous.
    pub kind: ScaleKind,
    /// Trained breaks in display order.
    pub breaks: Vec<ScaleBreak>,
    /// Continuous limits; defaults to the break range.
    pub limits: Option<(f64, f64)>,
}

impl Scale {
    /// Creates a discrete scale for `aesthetic`.
    pub fn discrete(aesthetic: Aesthetic) -> Self {
        Self::new(aesthetic, ScaleKind::Discrete)
    }

    /// Creates a continuous scale for `aesthetic`.
    pub fn continuous(aesthetic: Aesthetic) -> Self {
        Self::new(aesthetic, ScaleKind::Continuous)
    }

    fn new(aesthetic: Aesthetic, kind: ScaleKind) -> Self {
        Self {
            aesthetics: smallvec![aesthetic],
            guide: None,
            name: None,
            kind,
            breaks: Vec::new(),
            limits: None,
        }
    }

    /// Adds further aesthetics served by the same scale.
    pub fn with_aesthetic(mut self, aesthetic: Aesthetic) -> Self {
        if !self.aesthetics.contains(&aesthetic) {
            self.aesthetics.push(aesthetic);
        }
        self
    }

    /// Sets the display title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Requests a specific guide.
    pub fn with_guide(mut self, guide: impl Into<GuideSpec>) -> Self {
        self.guide = Some(guide.into());
        self
    }

    /// Suppresses the guide for this scale.
    pub fn without_guide(mut self) -> Self {
        self.guide = Some(GuideSpec::Disabled);
        self
    }

    /// Appends a break.
    pub fn with_break(mut self, value: f64, label: impl Into<String>, mapped: AesValue) -> Self {
        self.breaks.push(ScaleBreak {
            value,
            label: label.into(),
            mapped,
        });
        self
    }

    /// Appends one break per level, at values `0, 1, 2, ...`.
    pub fn with_levels<L: Into<String>>(
        mut self,
        levels: impl IntoIterator<Item = (L, AesValue)>,
    ) -> Self {
        for (label, mapped) in levels {
            let value = self.breaks.len() as f64;
            self = self.with_break(value, label, mapped);
        }
        self
    }

    /// Sets continuous limits.
    pub fn with_limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = Some((lo, hi));
        self
    }

    /// The aesthetic whose guide override applies to this scale; `None` without aesthetics.
    pub fn primary_aesthetic(&self) -> Option<Aesthetic> {
        self.aesthetics.first().copied()
    }

    /// Resolved limits: explicit limits, else the range of the breaks.
    pub fn resolved_limits(&self) -> Option<(f64, f64)> {
        self.limits.or_else(|| {
            let mut values = self.breaks.iter().map(|b| b.value);
            let first = values.next()?;
            Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
        })
    }

    /// Guide used when neither the plot nor the scale requests one.
    ///
    /// Continuous color scales get a colorbar; everything else gets a legend.
    pub fn default_guide(&self) -> GuideSpec {
        let colour = self.primary_aesthetic().is_some_and(Aesthetic::is_colour);
        match self.kind {
            ScaleKind::Continuous if colour => GuideSpec::named("colorbar"),
            _ => GuideSpec::named("legend"),
        }
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn default_guide_depends_on_kind() {
        let discrete = Scale::discrete(Aesthetic::Color);
        assert_eq!(discrete.default_guide(), GuideSpec::named("legend"));
        let continuous = Scale::continuous(Aesthetic::Fill);
        assert_eq!(continuous.default_guide(), GuideSpec::named("colorbar"));
        let size = Scale::continuous(Aesthetic::Size);
        assert_eq!(size.default_guide(), GuideSpec::named("legend"));
    }

    #[test]
    fn limits_fall_back_to_break_range() {
        let scale = Scale::continuous(Aesthetic::Color)
            .with_break(3.0, "3", AesValue::Color(css::RED))
            .with_break(-1.0, "-1", AesValue::Color(css::BLUE));
        assert_eq!(scale.resolved_limits(), Some((-1.0, 3.0)));
        assert_eq!(scale.with_limits(0.0, 1.0).resolved_limits(), Some((0.0, 1.0)));
        assert_eq!(Scale::continuous(Aesthetic::Color).resolved_limits(), None);
    }
}

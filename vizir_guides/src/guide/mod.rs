// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide definitions.
//!
//! A guide definition is the mutable working object for one guide while the plot's guides are
//! being built: it is created by training against a scale, may absorb other definitions with
//! the same [`GuideHash`], collects key glyphs from the plot's layers, picks up theme defaults,
//! and finally draws itself into a [`GuideBox`].

mod colorbar;
mod legend;

pub use colorbar::ColorbarGuide;
pub use legend::{KeyGlyphs, KeyStyle, LegendGuide, LegendKey};

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use peniko::color::palette::css;

use crate::boxes::{GuideBox, GuideItem, TextAnchor};
use crate::measure::TextMeasurer;
use crate::theme::{Direction, Justification};
use crate::{Aesthetic, GuideError, Plot, Scale, Theme};

/// A guide title.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Title {
    /// Not set by the user; resolved from the scale name or the plot labels.
    Waived,
    /// An explicit title.
    Text(String),
}

impl Title {
    /// Returns the title text, or `None` while waived.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Waived => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Aesthetics a guide type can explain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvailableAes {
    /// Every aesthetic.
    Any,
    /// Only the listed aesthetics.
    Only(&'static [Aesthetic]),
}

impl AvailableAes {
    /// Whether `aesthetic` is supported.
    pub fn allows(&self, aesthetic: Aesthetic) -> bool {
        match self {
            Self::Any => true,
            Self::Only(list) => list.contains(&aesthetic),
        }
    }
}

/// Structural key grouping guide definitions that describe the same mapping.
///
/// Definitions with equal keys are merged into one guide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GuideHash {
    kind: &'static str,
    title: String,
    labels: Vec<String>,
    direction: Option<Direction>,
    colors: Vec<[u8; 4]>,
}

impl GuideHash {
    pub(crate) fn new(
        kind: &'static str,
        common: &GuideCommon,
        labels: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            kind,
            title: String::from(common.title.as_str().unwrap_or_default()),
            labels: labels.into_iter().collect(),
            direction: common.direction,
            colors: Vec::new(),
        }
    }

    pub(crate) fn with_colors(mut self, colors: impl IntoIterator<Item = [u8; 4]>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }
}

/// State shared by every guide type.
#[derive(Clone, Debug, PartialEq)]
pub struct GuideCommon {
    /// Title; waived until resolved by training.
    pub title: Title,
    /// Key layout direction; inherited from the theme when unset.
    pub direction: Option<Direction>,
    /// Position among guides: `1..=99` sort ascending, `0` places the guide after those.
    pub order: i32,
    /// Title alignment within the guide.
    pub title_align: Option<Justification>,
    /// Title font size.
    pub title_size: Option<f64>,
    /// Label font size.
    pub label_size: Option<f64>,
}

impl Default for GuideCommon {
    fn default() -> Self {
        Self {
            title: Title::Waived,
            direction: None,
            order: 0,
            title_align: None,
            title_size: None,
            label_size: None,
        }
    }
}

impl GuideCommon {
    fn set_defaults(&mut self, theme: &Theme) {
        let params = &theme.params;
        self.direction
            .get_or_insert(params.legend_direction.unwrap_or(Direction::Vertical));
        self.title_align
            .get_or_insert(params.legend_title_align.unwrap_or(Justification::Left));
        self.title_size.get_or_insert(params.title_size());
        self.label_size.get_or_insert(params.text_size());
    }

    /// Measures the title; `(0, 0)` when there is nothing to draw.
    fn measure_title(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> (f64, f64) {
        match self.title.as_str() {
            Some(text) if !text.is_empty() => measurer.measure(text, self.title_font(theme)),
            _ => (0.0, 0.0),
        }
    }

    /// Title primitive aligned within a guide of the given width.
    fn title_item(&self, theme: &Theme, width: f64, height: f64) -> Option<GuideItem> {
        let text = self.title.as_str().filter(|t| !t.is_empty())?;
        let (x, anchor) = match self.title_align.unwrap_or(Justification::Left) {
            Justification::Center => (width * 0.5, TextAnchor::Middle),
            Justification::Right | Justification::Bottom => (width, TextAnchor::End),
            Justification::Left | Justification::Top | Justification::Baseline => {
                (0.0, TextAnchor::Start)
            }
        };
        Some(GuideItem::Text {
            pos: (x, height * 0.5).into(),
            text: String::from(text),
            font_size: self.title_font(theme),
            anchor,
            fill: text_fill(),
        })
    }

    fn title_font(&self, theme: &Theme) -> f64 {
        self.title_size.unwrap_or_else(|| theme.params.title_size())
    }

    fn label_font(&self, theme: &Theme) -> f64 {
        self.label_size.unwrap_or_else(|| theme.params.text_size())
    }
}

fn text_fill() -> Brush {
    css::BLACK.into()
}

/// A guide definition: one of the supported guide types.
#[derive(Clone, Debug, PartialEq)]
pub enum Guide {
    /// Keys with labels, for any aesthetic.
    Legend(LegendGuide),
    /// A continuous color bar.
    Colorbar(ColorbarGuide),
}

impl From<LegendGuide> for Guide {
    fn from(value: LegendGuide) -> Self {
        Self::Legend(value)
    }
}

impl From<ColorbarGuide> for Guide {
    fn from(value: ColorbarGuide) -> Self {
        Self::Colorbar(value)
    }
}

impl Guide {
    /// A legend with default settings.
    pub fn legend() -> Self {
        Self::Legend(LegendGuide::default())
    }

    /// A colorbar with default settings.
    pub fn colorbar() -> Self {
        Self::Colorbar(ColorbarGuide::default())
    }

    /// Guide type name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Legend(_) => "legend",
            Self::Colorbar(_) => "colorbar",
        }
    }

    /// Shared state.
    pub fn common(&self) -> &GuideCommon {
        match self {
            Self::Legend(g) => &g.common,
            Self::Colorbar(g) => &g.common,
        }
    }

    /// Shared state, mutably.
    pub fn common_mut(&mut self) -> &mut GuideCommon {
        match self {
            Self::Legend(g) => &mut g.common,
            Self::Colorbar(g) => &mut g.common,
        }
    }

    /// The title.
    pub fn title(&self) -> &Title {
        &self.common().title
    }

    /// The direction, if resolved.
    pub fn direction(&self) -> Option<Direction> {
        self.common().direction
    }

    /// The requested order.
    pub fn order(&self) -> i32 {
        self.common().order
    }

    /// Sets an explicit title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.common_mut().title = Title::Text(title.into());
        self
    }

    /// Sets the key direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.common_mut().direction = Some(direction);
        self
    }

    /// Sets the order among guides (`0` for "after the ordered ones", else `1..=99`).
    pub fn with_order(mut self, order: i32) -> Self {
        self.common_mut().order = order;
        self
    }

    /// Aesthetics this guide type can explain.
    pub fn available_aes(&self) -> AvailableAes {
        match self {
            Self::Legend(_) => LegendGuide::AVAILABLE_AES,
            Self::Colorbar(_) => ColorbarGuide::AVAILABLE_AES,
        }
    }

    /// Merge-grouping key, derived from the trained state.
    pub fn hash(&self) -> GuideHash {
        match self {
            Self::Legend(g) => g.hash(),
            Self::Colorbar(g) => g.hash(),
        }
    }

    /// Sort key: `order` with `0` moved after every explicit order.
    pub fn sort_order(&self) -> Result<i32, GuideError> {
        match self.order() {
            0 => Ok(100),
            o @ 1..=99 => Ok(o),
            o => Err(GuideError::OrderOutOfRange(o)),
        }
    }

    /// Binds the scale's breaks into this guide; `None` when the scale yields no keys.
    pub fn train(self, scale: &Scale) -> Option<Self> {
        match self {
            Self::Legend(g) => g.train(scale).map(Self::Legend),
            Self::Colorbar(g) => g.train(scale).map(Self::Colorbar),
        }
    }

    /// Combines two definitions that share a [`GuideHash`].
    ///
    /// Both definitions must be of the same kind, which equal hashes guarantee; otherwise
    /// `other` is discarded.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        debug_assert_eq!(
            self.kind_name(),
            other.kind_name(),
            "only guides of one kind can merge"
        );
        match (self, other) {
            (Self::Legend(a), Self::Legend(b)) => Self::Legend(a.merge(b)),
            (Self::Colorbar(a), Self::Colorbar(b)) => Self::Colorbar(a.merge(b)),
            // Distinct kinds never share a hash.
            (a, _) => a,
        }
    }

    /// Collects key geometry from the plot's layers; `None` when no layer contributes.
    pub fn create_geoms(self, plot: &Plot) -> Option<Self> {
        match self {
            Self::Legend(g) => g.create_geoms(plot).map(Self::Legend),
            Self::Colorbar(g) => g.create_geoms(plot).map(Self::Colorbar),
        }
    }

    /// Fills unset visual parameters from the theme.
    pub fn set_defaults(&mut self, theme: &Theme) {
        match self {
            Self::Legend(g) => g.set_defaults(theme),
            Self::Colorbar(g) => g.set_defaults(theme),
        }
    }

    /// Draws this guide.
    pub fn draw(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> GuideBox {
        match self {
            Self::Legend(g) => g.draw(theme, measurer),
            Self::Colorbar(g) => g.draw(theme, measurer),
        }
    }
}

/// How a plot or scale asks for a guide.
#[derive(Clone, Debug, PartialEq)]
pub enum GuideSpec {
    /// A registered guide type, by name (`"legend"`, `"colorbar"`, ...).
    Named(String),
    /// A configured guide.
    Guide(Guide),
    /// No guide.
    Disabled,
}

impl GuideSpec {
    /// A guide requested by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl From<Guide> for GuideSpec {
    fn from(value: Guide) -> Self {
        Self::Guide(value)
    }
}

impl From<&str> for GuideSpec {
    fn from(value: &str) -> Self {
        Self::Named(String::from(value))
    }
}

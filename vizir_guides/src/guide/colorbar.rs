// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colorbar guides: a continuous color ramp with tick labels.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use super::{AvailableAes, GuideCommon, GuideHash, text_fill};
use crate::boxes::{GuideBox, GuideItem, Size, StrokeStyle, TextAnchor};
use crate::measure::TextMeasurer;
use crate::scale::ScaleKind;
use crate::theme::Direction;
use crate::{Aesthetic, Plot, Scale, Theme};

/// Length of the bar relative to the key size along its long axis.
const BAR_LENGTH_KEYS: f64 = 5.0;

/// A colorbar guide.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorbarGuide {
    /// Shared guide state.
    pub common: GuideCommon,
    /// Number of color slices in the bar.
    pub nbin: usize,
    /// Put high values at the start of the bar.
    pub reverse: bool,
    /// Draw tick marks across the bar at label positions.
    pub ticks: bool,
    /// Bar width; derived from the key size when unset.
    pub bar_width: Option<f64>,
    /// Bar height; derived from the key size when unset.
    pub bar_height: Option<f64>,
    /// Gap between bar, labels and title; from the theme when unset.
    pub spacing: Option<f64>,
    /// Aesthetics of the trained scale.
    pub aesthetics: SmallVec<[Aesthetic; 2]>,
    /// Slice colors from the low to the high end of the bar.
    pub bar: Vec<Color>,
    /// Labels with their position along the bar as a fraction in `0..=1`.
    pub labels: Vec<(f64, String)>,
}

impl Default for ColorbarGuide {
    fn default() -> Self {
        Self {
            common: GuideCommon::default(),
            nbin: 20,
            reverse: false,
            ticks: true,
            bar_width: None,
            bar_height: None,
            spacing: None,
            aesthetics: SmallVec::new(),
            bar: Vec::new(),
            labels: Vec::new(),
        }
    }
}

impl ColorbarGuide {
    pub(crate) const AVAILABLE_AES: AvailableAes =
        AvailableAes::Only(&[Aesthetic::Color, Aesthetic::Fill]);

    /// Sets the number of slices.
    pub fn with_nbin(mut self, nbin: usize) -> Self {
        self.nbin = nbin.max(2);
        self
    }

    /// Reverses the bar.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enables or disables tick marks.
    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the bar size.
    pub fn with_bar_size(mut self, width: f64, height: f64) -> Self {
        self.bar_width = Some(width.max(0.0));
        self.bar_height = Some(height.max(0.0));
        self
    }

    pub(super) fn hash(&self) -> GuideHash {
        GuideHash::new(
            "colorbar",
            &self.common,
            self.labels.iter().map(|(_, l)| l.clone()),
        )
        .with_colors(self.bar.iter().map(|c| {
            let rgba = c.to_rgba8();
            [rgba.r, rgba.g, rgba.b, rgba.a]
        }))
    }

    pub(super) fn train(mut self, scale: &Scale) -> Option<Self> {
        if scale.kind != ScaleKind::Continuous {
            return None;
        }
        let (lo, hi) = scale.resolved_limits()?;
        let mut stops: Vec<(f64, Color)> = scale
            .breaks
            .iter()
            .filter_map(|b| b.mapped.as_color().map(|c| (b.value, c)))
            .collect();
        if stops.is_empty() {
            return None;
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));

        let span = hi - lo;
        let fraction = |v: f64| if span > 0.0 { (v - lo) / span } else { 0.5 };
        self.labels = scale
            .breaks
            .iter()
            .filter(|b| (lo..=hi).contains(&b.value))
            .map(|b| (fraction(b.value), b.label.clone()))
            .collect();
        if self.labels.is_empty() {
            return None;
        }

        let nbin = self.nbin.max(2);
        self.bar = (0..nbin)
            .map(|i| {
                let t = (i as f64 + 0.5) / nbin as f64;
                interpolate(&stops, lo + t * span)
            })
            .collect();
        if self.reverse {
            self.bar.reverse();
            for (f, _) in &mut self.labels {
                *f = 1.0 - *f;
            }
        }
        self.aesthetics = scale.aesthetics.clone();
        Some(self)
    }

    pub(super) fn merge(mut self, other: Self) -> Self {
        // Equal hashes mean an identical ramp; only the explained aesthetics accumulate.
        for ae in other.aesthetics {
            if !self.aesthetics.contains(&ae) {
                self.aesthetics.push(ae);
            }
        }
        self
    }

    pub(super) fn create_geoms(self, plot: &Plot) -> Option<Self> {
        plot.layers
            .iter()
            .filter(|layer| layer.show_legend != Some(false))
            .any(|layer| {
                layer.show_legend == Some(true)
                    || layer.mapping.iter().any(|ae| self.aesthetics.contains(ae))
            })
            .then_some(self)
    }

    pub(super) fn set_defaults(&mut self, theme: &Theme) {
        self.common.set_defaults(theme);
        let params = &theme.params;
        let (w, h) = (params.key_width(), params.key_height());
        match self.common.direction {
            Some(Direction::Horizontal) => {
                self.bar_width.get_or_insert(w * BAR_LENGTH_KEYS);
                self.bar_height.get_or_insert(h);
            }
            _ => {
                self.bar_width.get_or_insert(w);
                self.bar_height.get_or_insert(h * BAR_LENGTH_KEYS);
            }
        }
        self.spacing.get_or_insert(params.key_spacing());
    }

    pub(super) fn draw(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> GuideBox {
        let params = &theme.params;
        let horizontal = self.common.direction == Some(Direction::Horizontal);
        let bar_w = self.bar_width.unwrap_or_else(|| {
            params.key_width() * if horizontal { BAR_LENGTH_KEYS } else { 1.0 }
        });
        let bar_h = self.bar_height.unwrap_or_else(|| {
            params.key_height() * if horizontal { 1.0 } else { BAR_LENGTH_KEYS }
        });
        let spacing = self.spacing.unwrap_or_else(|| params.key_spacing());
        let label_font = self.common.label_font(theme);

        let dims: Vec<(f64, f64)> = self
            .labels
            .iter()
            .map(|(_, l)| measurer.measure(l, label_font))
            .collect();
        let label_w = dims.iter().map(|d| d.0).fold(0.0_f64, f64::max);
        let label_h = dims.iter().map(|d| d.1).fold(0.0_f64, f64::max);

        let (title_w, title_h) = self.common.measure_title(theme, measurer);
        let top = if title_h > 0.0 { title_h + spacing } else { 0.0 };

        // Labels centered on bar ends overhang by half a label.
        let (bar, size) = if horizontal {
            let margin = label_w * 0.5;
            let bar = Rect::new(margin, top, margin + bar_w, top + bar_h);
            let size = Size::new(
                (bar_w + 2.0 * margin).max(title_w),
                top + bar_h + spacing + label_h,
            );
            (bar, size)
        } else {
            let margin = label_h * 0.5;
            let bar = Rect::new(0.0, top + margin, bar_w, top + margin + bar_h);
            let size = Size::new(
                (bar_w + spacing + label_w).max(title_w),
                top + bar_h + 2.0 * margin,
            );
            (bar, size)
        };

        let mut items = Vec::new();
        items.extend(self.common.title_item(theme, size.width, title_h));

        let n = self.bar.len().max(1) as f64;
        for (i, color) in self.bar.iter().enumerate() {
            let (a, b) = (i as f64 / n, (i + 1) as f64 / n);
            let slice = if horizontal {
                Rect::new(
                    bar.x0 + a * bar.width(),
                    bar.y0,
                    bar.x0 + b * bar.width(),
                    bar.y1,
                )
            } else {
                // High values at the top.
                Rect::new(
                    bar.x0,
                    bar.y1 - b * bar.height(),
                    bar.x1,
                    bar.y1 - a * bar.height(),
                )
            };
            items.push(GuideItem::Rect {
                rect: slice,
                fill: (*color).into(),
                stroke: None,
            });
        }

        for (fraction, label) in &self.labels {
            let (tick_a, tick_b, pos, anchor) = if horizontal {
                let x = bar.x0 + fraction * bar.width();
                (
                    ((x, bar.y0), (x, bar.y0 + bar.height() * 0.2)),
                    ((x, bar.y1 - bar.height() * 0.2), (x, bar.y1)),
                    (x, bar.y1 + spacing + label_h * 0.5),
                    TextAnchor::Middle,
                )
            } else {
                let y = bar.y1 - fraction * bar.height();
                (
                    ((bar.x0, y), (bar.x0 + bar.width() * 0.2, y)),
                    ((bar.x1 - bar.width() * 0.2, y), (bar.x1, y)),
                    (bar.x1 + spacing, y),
                    TextAnchor::Start,
                )
            };
            if self.ticks {
                for (from, to) in [tick_a, tick_b] {
                    let mut path = BezPath::new();
                    path.move_to(from);
                    path.line_to(to);
                    items.push(GuideItem::Path {
                        path,
                        fill: None,
                        stroke: Some(StrokeStyle::solid(css::WHITE, 0.5)),
                    });
                }
            }
            items.push(GuideItem::Text {
                pos: pos.into(),
                text: label.clone(),
                font_size: label_font,
                anchor,
                fill: text_fill(),
            });
        }

        GuideBox { size, items }
    }
}

/// Linear interpolation through sorted color stops, clamped at both ends.
fn interpolate(stops: &[(f64, Color)], value: f64) -> Color {
    let Some(&(first_v, first_c)) = stops.first() else {
        return css::GRAY;
    };
    if value <= first_v {
        return first_c;
    }
    for pair in stops.windows(2) {
        let ((v0, c0), (v1, c1)) = (pair[0], pair[1]);
        if value <= v1 {
            let t = if v1 > v0 { (value - v0) / (v1 - v0) } else { 1.0 };
            #[allow(clippy::cast_possible_truncation, reason = "t is in 0..=1")]
            let t = t as f32;
            let mut out = [0.0_f32; 4];
            for (k, slot) in out.iter_mut().enumerate() {
                *slot = c0.components[k] + (c1.components[k] - c0.components[k]) * t;
            }
            return Color::new(out);
        }
    }
    stops[stops.len() - 1].1
}

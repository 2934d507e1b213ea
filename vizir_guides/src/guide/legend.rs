// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend guides: a grid of key glyphs with labels, under a title.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Rect};
use peniko::Color;
use peniko::color::palette::css;
use smallvec::SmallVec;

use super::{AvailableAes, GuideCommon, GuideHash, text_fill};
use crate::boxes::{GuideBox, GuideItem, Size, StrokeStyle, TextAnchor};
use crate::measure::TextMeasurer;
use crate::plot::Geom;
use crate::scale::Linetype;
use crate::theme::Direction;
use crate::{AesValue, Aesthetic, Plot, Scale, Symbol, Theme};

/// One legend entry: a label and the visual values every merged scale maps it to.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendKey {
    /// Display label.
    pub label: String,
    /// Mapped value per aesthetic.
    pub values: SmallVec<[(Aesthetic, AesValue); 2]>,
}

impl LegendKey {
    /// Value mapped for `aesthetic`, if any.
    pub fn value(&self, aesthetic: Aesthetic) -> Option<AesValue> {
        self.values
            .iter()
            .find(|(ae, _)| *ae == aesthetic)
            .map(|(_, v)| *v)
    }

    fn set(&mut self, aesthetic: Aesthetic, value: AesValue) {
        match self.values.iter_mut().find(|(ae, _)| *ae == aesthetic) {
            Some(slot) => slot.1 = value,
            None => self.values.push((aesthetic, value)),
        }
    }
}

/// Resolved visual values for one key glyph. Unset values use geometry defaults when drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyStyle {
    /// Stroke/point color.
    pub color: Option<Color>,
    /// Fill color.
    pub fill: Option<Color>,
    /// Opacity.
    pub alpha: Option<f64>,
    /// Point shape.
    pub shape: Option<Symbol>,
    /// Point size or line width.
    pub size: Option<f64>,
    /// Dash pattern.
    pub linetype: Option<Linetype>,
}

impl KeyStyle {
    /// Applies a mapped or constant value; values of the wrong kind are ignored.
    pub fn apply(&mut self, aesthetic: Aesthetic, value: AesValue) {
        match (aesthetic, value) {
            (Aesthetic::Color, AesValue::Color(c)) => self.color = Some(c),
            (Aesthetic::Fill, AesValue::Color(c)) => self.fill = Some(c),
            (Aesthetic::Alpha, AesValue::Alpha(a)) => self.alpha = Some(a.clamp(0.0, 1.0)),
            (Aesthetic::Shape, AesValue::Shape(s)) => self.shape = Some(s),
            (Aesthetic::Size, AesValue::Size(s)) => self.size = Some(s.max(0.0)),
            (Aesthetic::Linetype, AesValue::Linetype(l)) => self.linetype = Some(l),
            _ => {}
        }
    }

    fn paint(&self, color: Color) -> Color {
        match self.alpha {
            #[allow(clippy::cast_possible_truncation, reason = "alpha is in 0..=1")]
            Some(a) => color.with_alpha(a as f32),
            None => color,
        }
    }
}

/// Key glyphs contributed by one plot layer, one style per legend key.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyGlyphs {
    /// Geometry of the contributing layer.
    pub geom: Geom,
    /// Styles aligned with [`LegendGuide::keys`].
    pub styles: Vec<KeyStyle>,
}

/// A legend guide.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendGuide {
    /// Shared guide state.
    pub common: GuideCommon,
    /// Show keys in reverse break order.
    pub reverse: bool,
    /// Rows in the key grid.
    pub nrow: Option<usize>,
    /// Columns in the key grid.
    pub ncol: Option<usize>,
    /// Key width; from the theme when unset.
    pub key_width: Option<f64>,
    /// Key height; from the theme when unset.
    pub key_height: Option<f64>,
    /// Gap between keys, labels and title; from the theme when unset.
    pub spacing: Option<f64>,
    /// Trained keys.
    pub keys: Vec<LegendKey>,
    /// Glyphs per contributing layer.
    pub glyphs: Vec<KeyGlyphs>,
}

impl Default for LegendGuide {
    fn default() -> Self {
        Self {
            common: GuideCommon::default(),
            reverse: false,
            nrow: None,
            ncol: None,
            key_width: None,
            key_height: None,
            spacing: None,
            keys: Vec::new(),
            glyphs: Vec::new(),
        }
    }
}

impl LegendGuide {
    pub(crate) const AVAILABLE_AES: AvailableAes = AvailableAes::Any;

    /// Shows keys in reverse order.
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Sets the number of rows.
    pub fn with_nrow(mut self, nrow: usize) -> Self {
        self.nrow = Some(nrow.max(1));
        self
    }

    /// Sets the number of columns.
    pub fn with_ncol(mut self, ncol: usize) -> Self {
        self.ncol = Some(ncol.max(1));
        self
    }

    /// Sets the key size.
    pub fn with_key_size(mut self, width: f64, height: f64) -> Self {
        self.key_width = Some(width.max(0.0));
        self.key_height = Some(height.max(0.0));
        self
    }

    pub(super) fn hash(&self) -> GuideHash {
        GuideHash::new(
            "legend",
            &self.common,
            self.keys.iter().map(|k| k.label.clone()),
        )
    }

    pub(super) fn train(mut self, scale: &Scale) -> Option<Self> {
        if scale.breaks.is_empty() {
            return None;
        }
        self.keys = scale
            .breaks
            .iter()
            .map(|b| LegendKey {
                label: b.label.clone(),
                values: scale.aesthetics.iter().map(|ae| (*ae, b.mapped)).collect(),
            })
            .collect();
        if self.reverse {
            self.keys.reverse();
        }
        Some(self)
    }

    pub(super) fn merge(mut self, other: Self) -> Self {
        for key in other.keys {
            match self.keys.iter_mut().find(|k| k.label == key.label) {
                Some(mine) => {
                    for (ae, value) in key.values {
                        mine.set(ae, value);
                    }
                }
                None => self.keys.push(key),
            }
        }
        self
    }

    /// Aesthetics carried by the keys, in first-seen order.
    fn key_aesthetics(&self) -> SmallVec<[Aesthetic; 6]> {
        let mut out = SmallVec::new();
        for (ae, _) in self.keys.iter().flat_map(|k| k.values.iter()) {
            if !out.contains(ae) {
                out.push(*ae);
            }
        }
        out
    }

    pub(super) fn create_geoms(mut self, plot: &Plot) -> Option<Self> {
        let legend_aes = self.key_aesthetics();
        self.glyphs.clear();
        for layer in &plot.layers {
            if layer.show_legend == Some(false) {
                continue;
            }
            let matched: SmallVec<[Aesthetic; 6]> = layer
                .mapping
                .iter()
                .copied()
                .filter(|ae| legend_aes.contains(ae))
                .collect();
            if matched.is_empty() && layer.show_legend != Some(true) {
                continue;
            }
            let styles = self
                .keys
                .iter()
                .map(|key| {
                    let mut style = KeyStyle::default();
                    for ae in &matched {
                        if let Some(value) = key.value(*ae) {
                            style.apply(*ae, value);
                        }
                    }
                    for ae in Aesthetic::ALL {
                        if let Some(value) = layer.param(ae) {
                            style.apply(ae, value);
                        }
                    }
                    style
                })
                .collect();
            self.glyphs.push(KeyGlyphs {
                geom: layer.geom,
                styles,
            });
        }
        (!self.glyphs.is_empty()).then_some(self)
    }

    pub(super) fn set_defaults(&mut self, theme: &Theme) {
        self.common.set_defaults(theme);
        let params = &theme.params;
        self.key_width.get_or_insert(params.key_width());
        self.key_height.get_or_insert(params.key_height());
        self.spacing.get_or_insert(params.key_spacing());

        let n = self.keys.len().max(1);
        if self.nrow.is_none() && self.ncol.is_none() {
            match self.common.direction {
                Some(Direction::Horizontal) => self.nrow = Some(n.div_ceil(5)),
                _ => self.ncol = Some(n.div_ceil(20)),
            }
        }
        match (self.nrow, self.ncol) {
            (Some(nrow), None) => self.ncol = Some(n.div_ceil(nrow.max(1))),
            (None, Some(ncol)) => self.nrow = Some(n.div_ceil(ncol.max(1))),
            _ => {}
        }
    }

    /// Rows and columns actually used; keys fill columns first.
    fn grid(&self) -> (usize, usize) {
        let n = self.keys.len();
        let nrow = match (self.nrow, self.ncol) {
            (Some(nrow), _) => nrow.max(1),
            (None, Some(ncol)) => n.div_ceil(ncol.max(1)).max(1),
            (None, None) => n.max(1),
        };
        (nrow, n.div_ceil(nrow))
    }

    pub(super) fn draw(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> GuideBox {
        let params = &theme.params;
        let key_w = self.key_width.unwrap_or_else(|| params.key_width());
        let key_h = self.key_height.unwrap_or_else(|| params.key_height());
        let spacing = self.spacing.unwrap_or_else(|| params.key_spacing());
        let label_font = self.common.label_font(theme);
        let row_gap = spacing * 0.5;

        let (nrow, ncol) = self.grid();
        let labels: Vec<(f64, f64)> = self
            .keys
            .iter()
            .map(|k| measurer.measure(&k.label, label_font))
            .collect();
        let row_h = labels.iter().map(|l| l.1).fold(key_h, f64::max);

        let mut col_x = Vec::with_capacity(ncol);
        let mut x = 0.0;
        for col in 0..ncol {
            if col > 0 {
                x += 2.0 * spacing;
            }
            col_x.push(x);
            let label_w = labels
                .iter()
                .skip(col * nrow)
                .take(nrow)
                .map(|l| l.0)
                .fold(0.0_f64, f64::max);
            x += key_w + spacing + label_w;
        }
        let grid_w = x;
        let grid_h = if self.keys.is_empty() {
            0.0
        } else {
            nrow as f64 * row_h + (nrow - 1) as f64 * row_gap
        };

        let (title_w, title_h) = self.common.measure_title(theme, measurer);
        let top = if title_h > 0.0 { title_h + spacing } else { 0.0 };
        let size = Size::new(grid_w.max(title_w), top + grid_h);

        let mut items = Vec::new();
        items.extend(self.common.title_item(theme, size.width, title_h));
        for (i, key) in self.keys.iter().enumerate() {
            let (col, row) = (i / nrow, i % nrow);
            let x = col_x[col];
            let y = top + row as f64 * (row_h + row_gap);
            let cell = Rect::new(
                x,
                y + (row_h - key_h) * 0.5,
                x + key_w,
                y + (row_h + key_h) * 0.5,
            );
            for glyphs in &self.glyphs {
                if let Some(style) = glyphs.styles.get(i) {
                    key_glyph(glyphs.geom, style, cell, &mut items);
                }
            }
            items.push(GuideItem::Text {
                pos: (x + key_w + spacing, y + row_h * 0.5).into(),
                text: key.label.clone(),
                font_size: label_font,
                anchor: TextAnchor::Start,
                fill: text_fill(),
            });
        }

        GuideBox { size, items }
    }
}

fn key_glyph(geom: Geom, style: &KeyStyle, cell: Rect, out: &mut Vec<GuideItem>) {
    let center = cell.center();
    let extent = cell.width().min(cell.height());
    match geom {
        Geom::Point => {
            let color = style.paint(style.color.or(style.fill).unwrap_or(css::BLACK));
            let size = style.size.unwrap_or(6.0).min(extent);
            out.push(GuideItem::Path {
                path: style
                    .shape
                    .unwrap_or(Symbol::Circle)
                    .path(center.x, center.y, size),
                fill: Some(color.into()),
                stroke: None,
            });
        }
        Geom::Line => {
            let mut path = BezPath::new();
            path.move_to((cell.x0 + 1.0, center.y));
            path.line_to((cell.x1 - 1.0, center.y));
            out.push(GuideItem::Path {
                path,
                fill: None,
                stroke: Some(line_stroke(style, 1.0)),
            });
        }
        Geom::Rect => {
            let fill = style.paint(style.fill.unwrap_or(css::GRAY));
            let stroke = style.color.map(|_| line_stroke(style, 0.5));
            out.push(GuideItem::Rect {
                rect: cell.inset(-1.0),
                fill: fill.into(),
                stroke,
            });
        }
        Geom::Text => {
            let color = style.paint(style.color.unwrap_or(css::BLACK));
            out.push(GuideItem::Text {
                pos: center,
                text: String::from("a"),
                font_size: style.size.unwrap_or(8.0).min(extent),
                anchor: TextAnchor::Middle,
                fill: color.into(),
            });
        }
    }
}

fn line_stroke(style: &KeyStyle, default_width: f64) -> StrokeStyle {
    let width = style.size.unwrap_or(default_width);
    let mut stroke = StrokeStyle::solid(style.paint(style.color.unwrap_or(css::BLACK)), width);
    if let Some(linetype) = style.linetype {
        stroke.dash = linetype.dash_pattern().iter().map(|d| d * width).collect();
    }
    stroke
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::guide::Title;
    use crate::measure::HeuristicTextMeasurer;
    use crate::plot::Layer;

    fn colour_scale() -> Scale {
        Scale::discrete(Aesthetic::Color).with_levels([
            ("4", AesValue::Color(css::RED)),
            ("6", AesValue::Color(css::GREEN)),
            ("8", AesValue::Color(css::BLUE)),
        ])
    }

    #[test]
    fn train_builds_one_key_per_break() {
        let legend = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        let labels: Vec<_> = legend.keys.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(labels, vec!["4", "6", "8"]);
        assert_eq!(
            legend.keys[1].value(Aesthetic::Color),
            Some(AesValue::Color(css::GREEN))
        );
    }

    #[test]
    fn train_without_breaks_drops_the_guide() {
        assert!(
            LegendGuide::default()
                .train(&Scale::discrete(Aesthetic::Shape))
                .is_none()
        );
    }

    #[test]
    fn reverse_flips_key_order() {
        let legend = LegendGuide::default()
            .with_reverse(true)
            .train(&colour_scale())
            .expect("breaks present");
        assert_eq!(legend.keys[0].label, "8");
    }

    #[test]
    fn layer_constants_override_key_values() {
        let legend = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        let plot = Plot::new().with_layer(
            Layer::new(Geom::Point)
                .with_mapping(Aesthetic::Color)
                .with_param(Aesthetic::Size, AesValue::Size(3.0))
                .with_param(Aesthetic::Color, AesValue::Color(css::BLACK)),
        );
        let legend = legend.create_geoms(&plot).expect("layer maps color");
        let style = &legend.glyphs[0].styles[0];
        assert_eq!(style.color, Some(css::BLACK));
        assert_eq!(style.size, Some(3.0));
    }

    #[test]
    fn hidden_and_unrelated_layers_contribute_nothing() {
        let legend = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        let plot = Plot::new()
            .with_layer(Layer::new(Geom::Line).with_mapping(Aesthetic::Size))
            .with_layer(
                Layer::new(Geom::Point)
                    .with_mapping(Aesthetic::Color)
                    .with_show_legend(false),
            );
        assert!(legend.clone().create_geoms(&plot).is_none());

        let forced = plot.with_layer(Layer::new(Geom::Rect).with_show_legend(true));
        let legend = legend.create_geoms(&forced).expect("forced layer");
        assert_eq!(legend.glyphs.len(), 1);
        assert_eq!(legend.glyphs[0].geom, Geom::Rect);
    }

    #[test]
    fn horizontal_direction_defaults_to_one_row() {
        let mut legend = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        legend.common.direction = Some(Direction::Horizontal);
        legend.set_defaults(&Theme::default());
        assert_eq!(legend.nrow, Some(1));
        assert_eq!(legend.ncol, Some(3));

        let mut vertical = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        vertical.set_defaults(&Theme::default());
        assert_eq!(vertical.ncol, Some(1));
        assert_eq!(vertical.nrow, Some(3));
    }

    #[test]
    fn drawn_box_contains_its_items() {
        let mut legend = LegendGuide::default()
            .train(&colour_scale())
            .expect("breaks present");
        legend.common.title = Title::Text(String::from("cyl"));
        let plot = Plot::new().with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color));
        let mut legend = legend.create_geoms(&plot).expect("layer maps color");
        let theme = Theme::default();
        legend.set_defaults(&theme);
        let drawn = legend.draw(&theme, &HeuristicTextMeasurer);

        // Title, then a glyph and a label per key.
        assert_eq!(drawn.items.len(), 1 + 3 * 2);
        let labels = drawn
            .items
            .iter()
            .filter(|it| matches!(it, GuideItem::Text { .. }))
            .count();
        assert_eq!(labels, 4);
        assert!(drawn.size.width > legend.key_width.unwrap_or_default());
        assert!(drawn.size.height >= 3.0 * legend.key_height.unwrap_or_default());
    }
}

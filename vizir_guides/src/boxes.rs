// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawable guide boxes and the packers that combine them.
//!
//! A [`GuideBox`] is the fully drawn form of one guide: a size plus a list of primitives in
//! box-local coordinates (origin at the top-left). A [`BoxPacker`] arranges several boxes along
//! one axis into a [`CompositeGuideBox`], following offsetbox semantics:
//! - `pad` insets all children from the composite's edges,
//! - `sep` separates consecutive children along the packing axis,
//! - `align` places each child across the packing axis.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

use crate::theme::{Justification, LegendBox};

/// A width/height pair used by guide layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in layout units.
    pub width: f64,
    /// Height in layout units.
    pub height: f64,
}

impl Size {
    /// Creates a size, clamping negative extents to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Horizontal anchor of a text primitive relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// Stroke paint, width and dash pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in layout units.
    pub stroke_width: f64,
    /// Dash pattern; empty for a solid line.
    pub dash: SmallVec<[f64; 4]>,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
            dash: SmallVec::new(),
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// A drawing primitive inside a guide box.
#[derive(Clone, Debug, PartialEq)]
pub enum GuideItem {
    /// A filled (and optionally stroked) rectangle.
    Rect {
        /// Geometry.
        rect: Rect,
        /// Fill paint.
        fill: Brush,
        /// Optional outline.
        stroke: Option<StrokeStyle>,
    },
    /// An arbitrary path.
    Path {
        /// Geometry.
        path: BezPath,
        /// Optional fill paint.
        fill: Option<Brush>,
        /// Optional stroke.
        stroke: Option<StrokeStyle>,
    },
    /// A single line of unshaped text, vertically centered on `pos.y`.
    Text {
        /// Anchor position.
        pos: Point,
        /// Text content.
        text: String,
        /// Font size.
        font_size: f64,
        /// Horizontal anchoring.
        anchor: TextAnchor,
        /// Text paint.
        fill: Brush,
    },
}

impl GuideItem {
    /// Returns this primitive moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        match self {
            Self::Rect { rect, fill, stroke } => Self::Rect {
                rect: *rect + offset,
                fill: fill.clone(),
                stroke: stroke.clone(),
            },
            Self::Path { path, fill, stroke } => Self::Path {
                path: Affine::translate(offset) * path.clone(),
                fill: fill.clone(),
                stroke: stroke.clone(),
            },
            Self::Text {
                pos,
                text,
                font_size,
                anchor,
                fill,
            } => Self::Text {
                pos: *pos + offset,
                text: text.clone(),
                font_size: *font_size,
                anchor: *anchor,
                fill: fill.clone(),
            },
        }
    }
}

/// The drawn form of a single guide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GuideBox {
    /// Extent of the box; items lie within `(0, 0)..(width, height)`.
    pub size: Size,
    /// Primitives in box-local coordinates.
    pub items: Vec<GuideItem>,
}

/// A child of a [`CompositeGuideBox`] with its placement.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedChild {
    /// Offset of the child's top-left corner within the composite.
    pub offset: Vec2,
    /// The child box.
    pub guide: GuideBox,
}

/// All guide boxes of a plot, packed into one region.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeGuideBox {
    /// Packing axis.
    pub direction: LegendBox,
    /// Cross-axis alignment used when packing.
    pub align: Justification,
    /// Padding around all children.
    pub pad: f64,
    /// Gap between consecutive children.
    pub sep: f64,
    /// Total extent.
    pub size: Size,
    /// Children in display order.
    pub children: Vec<PackedChild>,
}

impl CompositeGuideBox {
    /// Returns every child primitive translated into composite coordinates.
    pub fn items(&self) -> Vec<GuideItem> {
        self.children
            .iter()
            .flat_map(|child| child.guide.items.iter().map(|it| it.translated(child.offset)))
            .collect()
    }

    /// Bounds of each child within the composite.
    pub fn child_rects(&self) -> Vec<Rect> {
        self.children
            .iter()
            .map(|child| {
                Rect::from_origin_size(
                    child.offset.to_point(),
                    (child.guide.size.width, child.guide.size.height),
                )
            })
            .collect()
    }
}

/// Packs guide boxes along one axis.
pub trait BoxPacker {
    /// Packs `children` in order.
    fn pack(
        &self,
        children: Vec<GuideBox>,
        align: Justification,
        pad: f64,
        sep: f64,
    ) -> CompositeGuideBox;
}

/// Stacks boxes top to bottom.
#[derive(Clone, Copy, Debug, Default)]
pub struct VPacker;

/// Places boxes left to right.
#[derive(Clone, Copy, Debug, Default)]
pub struct HPacker;

impl BoxPacker for VPacker {
    fn pack(
        &self,
        children: Vec<GuideBox>,
        align: Justification,
        pad: f64,
        sep: f64,
    ) -> CompositeGuideBox {
        let pad = pad.max(0.0);
        let sep = sep.max(0.0);
        let width = children
            .iter()
            .map(|c| c.size.width)
            .fold(0.0_f64, f64::max);

        let mut y = pad;
        let mut packed = Vec::with_capacity(children.len());
        for (i, guide) in children.into_iter().enumerate() {
            if i > 0 {
                y += sep;
            }
            let x = pad + aligned_offset(width, guide.size.width, align);
            let h = guide.size.height;
            packed.push(PackedChild {
                offset: Vec2::new(x, y),
                guide,
            });
            y += h;
        }

        CompositeGuideBox {
            direction: LegendBox::Vertical,
            align,
            pad,
            sep,
            size: Size::new(width + 2.0 * pad, y + pad),
            children: packed,
        }
    }
}

impl BoxPacker for HPacker {
    fn pack(
        &self,
        children: Vec<GuideBox>,
        align: Justification,
        pad: f64,
        sep: f64,
    ) -> CompositeGuideBox {
        let pad = pad.max(0.0);
        let sep = sep.max(0.0);
        let height = children
            .iter()
            .map(|c| c.size.height)
            .fold(0.0_f64, f64::max);

        let mut x = pad;
        let mut packed = Vec::with_capacity(children.len());
        for (i, guide) in children.into_iter().enumerate() {
            if i > 0 {
                x += sep;
            }
            let y = pad + aligned_offset(height, guide.size.height, align);
            let w = guide.size.width;
            packed.push(PackedChild {
                offset: Vec2::new(x, y),
                guide,
            });
            x += w;
        }

        CompositeGuideBox {
            direction: LegendBox::Horizontal,
            align,
            pad,
            sep,
            size: Size::new(x + pad, height + 2.0 * pad),
            children: packed,
        }
    }
}

/// Offset of an `extent`-long child inside `available`, along the cross axis.
pub(crate) fn aligned_offset(available: f64, extent: f64, align: Justification) -> f64 {
    match align {
        Justification::Left | Justification::Top | Justification::Baseline => 0.0,
        Justification::Right | Justification::Bottom => available - extent,
        Justification::Center => (available - extent) * 0.5,
    }
}

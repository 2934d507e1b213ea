// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide building for grammar-of-graphics plots.
//!
//! A plot carries one trained scale per non-positional aesthetic (color, shape, size, ...).
//! Each scale may ask for a guide: a **legend** (keys with labels) or a **colorbar** (a color
//! ramp). This crate decides which scales get guides, merges guides that explain the same
//! mapping (e.g. `color` and `fill` driven by one variable collapse into one legend), draws
//! each guide into a [`GuideBox`], and packs all boxes into one [`CompositeGuideBox`] to be
//! placed next to the plot panel.
//!
//! ```
//! use peniko::color::palette::css;
//! use vizir_guides::{AesValue, Aesthetic, Geom, Layer, Plot, Scale};
//!
//! let mut plot = Plot::new()
//!     .with_label(Aesthetic::Color, "cyl")
//!     .with_scale(Scale::discrete(Aesthetic::Color).with_levels([
//!         ("4", AesValue::Color(css::RED)),
//!         ("6", AesValue::Color(css::BLUE)),
//!     ]))
//!     .with_layer(Layer::new(Geom::Point).with_mapping(Aesthetic::Color));
//!
//! let area = plot.build_guides().unwrap().expect("one legend");
//! assert_eq!(area.children.len(), 1);
//! ```
//!
//! Text shaping and pixel rendering are out of scope; boxes hold unshaped text and
//! `kurbo` geometry, sized with a [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod aesthetic;
mod boxes;
mod error;
mod guide;
mod guides;
mod measure;
mod plot;
mod registry;
mod scale;
mod symbol;
mod theme;

pub use aesthetic::Aesthetic;
pub use boxes::{
    BoxPacker, CompositeGuideBox, GuideBox, GuideItem, HPacker, PackedChild, Size, StrokeStyle,
    TextAnchor, VPacker,
};
pub use error::GuideError;
pub use guide::{
    AvailableAes, ColorbarGuide, Guide, GuideCommon, GuideHash, GuideSpec, KeyGlyphs, KeyStyle,
    LegendGuide, LegendKey, Title,
};
pub use guides::{GUIDE_SEPARATION, Guides, assemble, create_geoms, draw, merge, validate};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use plot::{Geom, Layer, Plot};
pub use registry::{GuideConstructor, GuideRegistry, colorbar_plain, legend_row};
pub use scale::{AesValue, Linetype, Scale, ScaleBreak, ScaleKind};
pub use symbol::Symbol;
pub use theme::{
    DEFAULT_KEY_SIZE, DEFAULT_KEY_SPACING, DEFAULT_TEXT_SIZE, DEFAULT_TITLE_SIZE, Direction,
    Justification, LegendBox, LegendParams, LegendPosition, Theme,
};

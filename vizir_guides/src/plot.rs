// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The parts of a plot that guide building reads and writes.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::guides::Guides;
use crate::measure::HeuristicTextMeasurer;
use crate::registry::GuideRegistry;
use crate::{AesValue, Aesthetic, CompositeGuideBox, GuideError, Scale, Theme};

/// Geometry kinds, as far as legend keys are concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Geom {
    /// Points; keys show a symbol.
    Point,
    /// Lines and paths; keys show a horizontal segment.
    Line,
    /// Bars, tiles, areas and other filled regions; keys show a filled square.
    Rect,
    /// Text; keys show a sample glyph.
    Text,
}

/// A plot layer: a geometry with its aesthetic mapping and constant aesthetics.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Geometry kind.
    pub geom: Geom,
    /// Aesthetics mapped from data in this layer.
    pub mapping: SmallVec<[Aesthetic; 4]>,
    /// Aesthetics set to constants in this layer; these win over legend key values.
    pub params: Vec<(Aesthetic, AesValue)>,
    /// `Some(false)` hides the layer from legends, `Some(true)` always includes it,
    /// `None` includes it when it maps one of the legend's aesthetics.
    pub show_legend: Option<bool>,
}

impl Layer {
    /// Creates a layer with no mappings.
    pub fn new(geom: Geom) -> Self {
        Self {
            geom,
            mapping: SmallVec::new(),
            params: Vec::new(),
            show_legend: None,
        }
    }

    /// Maps `aesthetic` from data.
    pub fn with_mapping(mut self, aesthetic: Aesthetic) -> Self {
        if !self.mapping.contains(&aesthetic) {
            self.mapping.push(aesthetic);
        }
        self
    }

    /// Sets `aesthetic` to a constant.
    pub fn with_param(mut self, aesthetic: Aesthetic, value: AesValue) -> Self {
        self.params.retain(|(ae, _)| *ae != aesthetic);
        self.params.push((aesthetic, value));
        self
    }

    /// Sets legend visibility.
    pub fn with_show_legend(mut self, show: bool) -> Self {
        self.show_legend = Some(show);
        self
    }

    /// Constant value for `aesthetic`, if set.
    pub fn param(&self, aesthetic: Aesthetic) -> Option<AesValue> {
        self.params
            .iter()
            .find(|(ae, _)| *ae == aesthetic)
            .map(|(_, v)| *v)
    }
}

/// A plot, reduced to what guides need.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plot {
    /// Trained non-positional scales, in plot order.
    pub scales: Vec<Scale>,
    /// Layers, in drawing order.
    pub layers: Vec<Layer>,
    /// Theme; guide building fills in unset legend options.
    pub theme: Theme,
    /// Default titles per aesthetic (usually the mapped variable's name).
    pub labels: BTreeMap<Aesthetic, String>,
    /// Plot-level guide overrides.
    pub guides: Guides,
}

impl Plot {
    /// Creates an empty plot with the default theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scale.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scales.push(scale);
        self
    }

    /// Adds a layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Sets the default title for an aesthetic.
    pub fn with_label(mut self, aesthetic: Aesthetic, label: impl Into<String>) -> Self {
        self.labels.insert(aesthetic, label.into());
        self
    }

    /// Replaces the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Adds guide overrides; see [`Guides::merge_into`].
    pub fn with_guides(self, guides: &Guides) -> Self {
        guides.merge_into(self)
    }

    /// Builds this plot's guides with the default registry and text measurer.
    ///
    /// Returns `Ok(None)` when no scale ends up with a guide.
    pub fn build_guides(&mut self) -> Result<Option<CompositeGuideBox>, GuideError> {
        self.build_guides_with(&GuideRegistry::default(), &HeuristicTextMeasurer)
    }

    /// Builds this plot's guides with an explicit registry and text measurer.
    pub fn build_guides_with(
        &mut self,
        registry: &GuideRegistry,
        measurer: &dyn crate::TextMeasurer,
    ) -> Result<Option<CompositeGuideBox>, GuideError> {
        let guides = core::mem::take(&mut self.guides);
        let result = guides.build_with(self, registry, measurer);
        self.guides = guides;
        result
    }
}

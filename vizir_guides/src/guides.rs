// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The guide collection and the pipeline that turns a plot's scales into one guide area.
//!
//! Building runs, in order:
//! 1. fill unset legend options in the plot theme,
//! 2. [`Guides::train`]: pick and train one guide definition per scale,
//! 3. [`merge`]: fold definitions with equal [`GuideHash`](crate::GuideHash) into one,
//! 4. [`create_geoms`]: collect key glyphs from the layers, dropping empty guides,
//! 5. [`draw`]: apply theme defaults and draw each guide into a [`GuideBox`],
//! 6. [`assemble`]: sort by `order` and pack all boxes into a [`CompositeGuideBox`].

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::boxes::{BoxPacker, CompositeGuideBox, GuideBox, HPacker, VPacker};
use crate::guide::Title;
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::registry::GuideRegistry;
use crate::theme::{Justification, LegendBox};
use crate::{Aesthetic, Guide, GuideError, GuideSpec, Plot, Theme};

/// Gap between packed guide boxes.
pub const GUIDE_SEPARATION: f64 = 20.0;

/// Guide overrides keyed by aesthetic.
///
/// An entry here takes priority over the guide a scale asks for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Guides {
    entries: BTreeMap<Aesthetic, GuideSpec>,
}

impl Guides {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from `(aesthetic name, spec)` pairs.
    ///
    /// `colour` is stored as `color` and wins over a `color` entry; names outside the guide
    /// aesthetics are dropped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, GuideSpec)>) -> Self {
        let mut entries = BTreeMap::new();
        let mut colour = None;
        for (name, spec) in pairs {
            match (name, Aesthetic::from_name(name)) {
                ("colour", _) => colour = Some(spec),
                (_, Some(ae)) => {
                    entries.insert(ae, spec);
                }
                (_, None) => {}
            }
        }
        if let Some(spec) = colour {
            entries.insert(Aesthetic::Color, spec);
        }
        Self { entries }
    }

    /// Sets the override for `aesthetic`.
    pub fn with(mut self, aesthetic: Aesthetic, spec: impl Into<GuideSpec>) -> Self {
        self.entries.insert(aesthetic, spec.into());
        self
    }

    /// The override for `aesthetic`, if any.
    pub fn get(&self, aesthetic: Aesthetic) -> Option<&GuideSpec> {
        self.entries.get(&aesthetic)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overrides in aesthetic order.
    pub fn iter(&self) -> impl Iterator<Item = (Aesthetic, &GuideSpec)> {
        self.entries.iter().map(|(ae, spec)| (*ae, spec))
    }

    /// Copies every override into `plot`'s own overrides, replacing colliding entries.
    ///
    /// The plot receives owned copies, so guide values added to several plots never share
    /// state.
    pub fn merge_into(&self, mut plot: Plot) -> Plot {
        plot.guides
            .entries
            .extend(self.entries.iter().map(|(ae, spec)| (*ae, spec.clone())));
        plot
    }

    /// Builds the plot's guide area with the default registry and text measurer.
    ///
    /// See [`Guides::build_with`].
    pub fn build(&self, plot: &mut Plot) -> Result<Option<CompositeGuideBox>, GuideError> {
        self.build_with(plot, &GuideRegistry::default(), &HeuristicTextMeasurer)
    }

    /// Builds the plot's guide area.
    ///
    /// Unset legend options in `plot.theme` are filled in first (this happens even when no
    /// guide results). Returns `Ok(None)` when no scale ends up with a guide.
    pub fn build_with(
        &self,
        plot: &mut Plot,
        registry: &GuideRegistry,
        measurer: &dyn TextMeasurer,
    ) -> Result<Option<CompositeGuideBox>, GuideError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("build_guides", scales = plot.scales.len()).entered();

        plot.theme.params = plot.theme.params.with_defaults();

        let gdefs = self.train(plot, registry)?;
        if gdefs.is_empty() {
            return Ok(None);
        }
        let mut gdefs = create_geoms(merge(gdefs), plot);
        if gdefs.is_empty() {
            return Ok(None);
        }
        let boxes = draw(&mut gdefs, &plot.theme, measurer);
        assemble(boxes, &gdefs, &plot.theme).map(Some)
    }

    /// Resolves and trains one guide definition per scale, in scale order.
    ///
    /// Guide priority is: this collection's entry for the scale's primary aesthetic, then the
    /// scale's own request, then the default for the scale type. Disabled guides and guides
    /// whose training yields nothing are skipped.
    pub fn train(&self, plot: &Plot, registry: &GuideRegistry) -> Result<Vec<Guide>, GuideError> {
        let mut gdefs = Vec::new();
        for scale in &plot.scales {
            let Some(output) = scale.primary_aesthetic() else {
                #[cfg(feature = "tracing")]
                tracing::debug!("scale without aesthetics skipped");
                continue;
            };
            let default_spec;
            let spec = match self.get(output).or(scale.guide.as_ref()) {
                Some(spec) => spec,
                None => {
                    default_spec = scale.default_guide();
                    &default_spec
                }
            };
            let Some(mut guide) = validate(spec, registry)? else {
                #[cfg(feature = "tracing")]
                tracing::debug!(aesthetic = %output, "guide disabled");
                continue;
            };

            if !guide.available_aes().allows(output) {
                return Err(GuideError::IncompatibleAesthetic {
                    guide: guide.kind_name(),
                    aesthetic: output,
                });
            }
            guide.sort_order()?;

            let common = guide.common_mut();
            if common.title == Title::Waived {
                let title = match scale.name.as_deref().filter(|n| !n.is_empty()) {
                    Some(name) => String::from(name),
                    None => plot
                        .labels
                        .get(&output)
                        .cloned()
                        .unwrap_or_else(|| String::from(output.name())),
                };
                common.title = Title::Text(title);
            }
            if common.direction.is_none() {
                common.direction = plot.theme.params.legend_direction;
            }

            match guide.train(scale) {
                Some(trained) => gdefs.push(trained),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(aesthetic = %output, "guide dropped by training");
                }
            }
        }
        Ok(gdefs)
    }
}

/// Turns a guide spec into a fresh guide definition; `None` for a disabled guide.
pub fn validate(spec: &GuideSpec, registry: &GuideRegistry) -> Result<Option<Guide>, GuideError> {
    match spec {
        GuideSpec::Disabled => Ok(None),
        GuideSpec::Guide(guide) => Ok(Some(guide.clone())),
        GuideSpec::Named(name) => registry
            .create(name)
            .map(Some)
            .ok_or_else(|| GuideError::UnknownGuide(name.clone())),
    }
}

/// Folds definitions with equal hashes into one definition per hash.
///
/// Groups are emitted in order of first appearance; within a group, definitions are merged
/// left to right.
pub fn merge(gdefs: Vec<Guide>) -> Vec<Guide> {
    let mut index = HashMap::new();
    let mut groups: Vec<Vec<Guide>> = Vec::new();
    for gdef in gdefs {
        let slot = *index.entry(gdef.hash()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(gdef);
    }
    groups
        .into_iter()
        .filter_map(|group| {
            #[cfg(feature = "tracing")]
            {
                if group.len() > 1 {
                    tracing::debug!(count = group.len(), "merging guides");
                }
            }
            group.into_iter().reduce(Guide::merge)
        })
        .collect()
}

/// Collects key glyphs for every definition, dropping those that end up without any.
pub fn create_geoms(gdefs: Vec<Guide>, plot: &Plot) -> Vec<Guide> {
    gdefs
        .into_iter()
        .filter_map(|gdef| {
            #[cfg(feature = "tracing")]
            let kind = gdef.kind_name();
            let out = gdef.create_geoms(plot);
            #[cfg(feature = "tracing")]
            {
                if out.is_none() {
                    tracing::debug!(guide = kind, "no layer contributes keys; guide dropped");
                }
            }
            out
        })
        .collect()
}

/// Applies theme defaults to each definition and draws it, preserving order.
pub fn draw(gdefs: &mut [Guide], theme: &Theme, measurer: &dyn TextMeasurer) -> Vec<GuideBox> {
    for gdef in gdefs.iter_mut() {
        gdef.set_defaults(theme);
    }
    gdefs.iter().map(|g| g.draw(theme, measurer)).collect()
}

/// Orders the boxes by their definitions' `order` and packs them.
///
/// `boxes[i]` must be the drawing of `gdefs[i]`, so both slices have the same length. The sort
/// is stable, so guides with equal order keep their relative position, and `order == 0` sorts
/// after `1..=99`.
pub fn assemble(
    boxes: Vec<GuideBox>,
    gdefs: &[Guide],
    theme: &Theme,
) -> Result<CompositeGuideBox, GuideError> {
    debug_assert_eq!(
        boxes.len(),
        gdefs.len(),
        "assemble needs one box per guide definition"
    );
    let orders = gdefs
        .iter()
        .map(Guide::sort_order)
        .collect::<Result<Vec<_>, _>>()?;
    let mut keyed: Vec<(i32, GuideBox)> = orders.into_iter().zip(boxes).collect();
    keyed.sort_by_key(|(order, _)| *order);
    let boxes: Vec<GuideBox> = keyed.into_iter().map(|(_, b)| b).collect();

    let params = &theme.params;
    let packer: &dyn BoxPacker = match params.legend_box {
        Some(LegendBox::Vertical) => &VPacker,
        Some(LegendBox::Horizontal) => &HPacker,
        None => return Err(GuideError::InvalidLegendBox(String::from("unset"))),
    };
    let align = params.legend_box_just.unwrap_or(Justification::Left);
    Ok(packer.pack(boxes, align, 0.0, GUIDE_SEPARATION))
}

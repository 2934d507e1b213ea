// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend theme options.
//!
//! Every option is an `Option`; `None` means "unset" and is filled from context by
//! [`LegendParams::with_defaults`]. The string-keyed [`LegendParams::set_param`] is the
//! textual configuration surface (e.g. for frontends that read theme settings from a file).

use alloc::string::{String, ToString};
use core::str::FromStr;

use crate::GuideError;

/// Default legend key size, in layout units.
pub const DEFAULT_KEY_SIZE: f64 = 17.28;
/// Default legend label font size.
pub const DEFAULT_TEXT_SIZE: f64 = 8.8;
/// Default legend title font size.
pub const DEFAULT_TITLE_SIZE: f64 = 9.6;
/// Default gap between a key and its label (and between legend rows).
pub const DEFAULT_KEY_SPACING: f64 = 5.5;

/// How multiple guide boxes are stacked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegendBox {
    /// Guides are stacked top to bottom.
    Vertical,
    /// Guides are placed side by side.
    Horizontal,
}

impl FromStr for LegendBox {
    type Err = GuideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(GuideError::InvalidLegendBox(other.to_string())),
        }
    }
}

/// Where the guide area sits relative to the plot panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegendPosition {
    /// Left of the panel.
    Left,
    /// Right of the panel.
    Right,
    /// Above the panel.
    Top,
    /// Below the panel.
    Bottom,
}

impl FromStr for LegendPosition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(()),
        }
    }
}

/// Layout direction of a single guide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Keys run left to right.
    Horizontal,
    /// Keys run top to bottom.
    Vertical,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(()),
        }
    }
}

/// Alignment of boxes (or text) within the available extent.
///
/// Following offsetbox conventions, `Left`, `Top` and `Baseline` align to the start edge,
/// `Right` and `Bottom` to the end edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Justification {
    /// Start edge (horizontal packing context).
    Left,
    /// End edge (horizontal packing context).
    Right,
    /// Centered.
    Center,
    /// Start edge (vertical packing context).
    Top,
    /// End edge (vertical packing context).
    Bottom,
    /// Start edge.
    Baseline,
}

impl FromStr for Justification {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" | "centre" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "baseline" => Ok(Self::Baseline),
            _ => Err(()),
        }
    }
}

/// Legend-related theme options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendParams {
    /// Stacking of multiple guides.
    pub legend_box: Option<LegendBox>,
    /// Base key size; fallback for key width and height.
    pub legend_key_size: Option<f64>,
    /// Key width.
    pub legend_key_width: Option<f64>,
    /// Key height.
    pub legend_key_height: Option<f64>,
    /// Position of the guide area.
    pub legend_position: Option<LegendPosition>,
    /// Default direction for guides that do not set their own.
    pub legend_direction: Option<Direction>,
    /// Alignment of guide boxes within the composite box.
    pub legend_box_just: Option<Justification>,
    /// Alignment of a guide's title within the guide.
    pub legend_title_align: Option<Justification>,
    /// Label font size.
    pub legend_text_size: Option<f64>,
    /// Title font size.
    pub legend_title_size: Option<f64>,
    /// Gap between keys, labels and title.
    pub legend_key_spacing: Option<f64>,
}

impl LegendParams {
    /// Returns a copy with the layout options filled in where unset.
    ///
    /// Options are resolved in order, each depending on those before it:
    /// `legend_box`, key width/height, `legend_position`, `legend_direction`,
    /// `legend_box_just`. Options that are already set are never overwritten.
    #[must_use]
    pub fn with_defaults(&self) -> Self {
        let mut out = self.clone();
        out.legend_box.get_or_insert(LegendBox::Vertical);
        if out.legend_key_width.is_none() {
            out.legend_key_width = out.legend_key_size;
        }
        if out.legend_key_height.is_none() {
            out.legend_key_height = out.legend_key_size;
        }
        let position = *out.legend_position.get_or_insert(LegendPosition::Right);
        out.legend_direction.get_or_insert(match position {
            LegendPosition::Top | LegendPosition::Bottom => Direction::Horizontal,
            LegendPosition::Left | LegendPosition::Right => Direction::Vertical,
        });
        out.legend_box_just.get_or_insert(match position {
            LegendPosition::Left | LegendPosition::Right => Justification::Left,
            LegendPosition::Top | LegendPosition::Bottom => Justification::Center,
        });
        out
    }

    /// Sets an option from its textual key and value.
    pub fn set_param(&mut self, key: &str, value: &str) -> Result<(), GuideError> {
        match key {
            "legend_box" => self.legend_box = Some(value.parse()?),
            "legend_key_size" => self.legend_key_size = Some(parse(value, "legend_key_size")?),
            "legend_key_width" => self.legend_key_width = Some(parse(value, "legend_key_width")?),
            "legend_key_height" => {
                self.legend_key_height = Some(parse(value, "legend_key_height")?);
            }
            "legend_position" => self.legend_position = Some(parse(value, "legend_position")?),
            "legend_direction" => self.legend_direction = Some(parse(value, "legend_direction")?),
            "legend_box_just" => self.legend_box_just = Some(parse(value, "legend_box_just")?),
            "legend_title_align" => {
                self.legend_title_align = Some(parse(value, "legend_title_align")?);
            }
            "legend_text_size" => self.legend_text_size = Some(parse(value, "legend_text_size")?),
            "legend_title_size" => {
                self.legend_title_size = Some(parse(value, "legend_title_size")?);
            }
            "legend_key_spacing" => {
                self.legend_key_spacing = Some(parse(value, "legend_key_spacing")?);
            }
            other => return Err(GuideError::UnknownThemeParam(other.to_string())),
        }
        Ok(())
    }

    /// Resolved key width.
    pub fn key_width(&self) -> f64 {
        self.legend_key_width
            .or(self.legend_key_size)
            .unwrap_or(DEFAULT_KEY_SIZE)
    }

    /// Resolved key height.
    pub fn key_height(&self) -> f64 {
        self.legend_key_height
            .or(self.legend_key_size)
            .unwrap_or(DEFAULT_KEY_SIZE)
    }

    /// Resolved label font size.
    pub fn text_size(&self) -> f64 {
        self.legend_text_size.unwrap_or(DEFAULT_TEXT_SIZE)
    }

    /// Resolved title font size.
    pub fn title_size(&self) -> f64 {
        self.legend_title_size.unwrap_or(DEFAULT_TITLE_SIZE)
    }

    /// Resolved spacing.
    pub fn key_spacing(&self) -> f64 {
        self.legend_key_spacing.unwrap_or(DEFAULT_KEY_SPACING).max(0.0)
    }
}

fn parse<T: FromStr>(value: &str, key: &'static str) -> Result<T, GuideError> {
    value.trim().parse().map_err(|_| GuideError::InvalidThemeValue {
        key,
        value: String::from(value),
    })
}

/// Plot theme; only the legend options are modelled here.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Legend options.
    pub params: LegendParams,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            params: LegendParams {
                legend_key_size: Some(DEFAULT_KEY_SIZE),
                legend_text_size: Some(DEFAULT_TEXT_SIZE),
                legend_title_size: Some(DEFAULT_TITLE_SIZE),
                ..LegendParams::default()
            },
        }
    }
}

impl Theme {
    /// Sets a legend option from its textual key and value.
    pub fn with_param(mut self, key: &str, value: &str) -> Result<Self, GuideError> {
        self.params.set_param(key, value)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_position() {
        let mut params = LegendParams::default();
        params.legend_position = Some(LegendPosition::Bottom);
        let resolved = params.with_defaults();
        assert_eq!(resolved.legend_direction, Some(Direction::Horizontal));
        assert_eq!(resolved.legend_box_just, Some(Justification::Center));
        assert_eq!(resolved.legend_box, Some(LegendBox::Vertical));
    }

    #[test]
    fn defaults_never_overwrite() {
        let mut params = LegendParams::default();
        params.legend_direction = Some(Direction::Horizontal);
        params.legend_box = Some(LegendBox::Horizontal);
        params.legend_key_size = Some(10.0);
        params.legend_key_height = Some(4.0);
        let resolved = params.with_defaults();
        assert_eq!(resolved.legend_position, Some(LegendPosition::Right));
        assert_eq!(resolved.legend_direction, Some(Direction::Horizontal));
        assert_eq!(resolved.legend_box, Some(LegendBox::Horizontal));
        assert_eq!(resolved.legend_box_just, Some(Justification::Left));
        assert_eq!(resolved.legend_key_width, Some(10.0));
        assert_eq!(resolved.legend_key_height, Some(4.0));
    }

    #[test]
    fn unknown_legend_box_is_rejected() {
        let mut params = LegendParams::default();
        assert_eq!(
            params.set_param("legend_box", "diagonal"),
            Err(GuideError::InvalidLegendBox("diagonal".to_string()))
        );
        assert!(params.set_param("legend_box", "horizontal").is_ok());
        assert_eq!(params.legend_box, Some(LegendBox::Horizontal));
    }

    #[test]
    fn set_param_parses_typed_values() {
        let theme = Theme::default()
            .with_param("legend_position", "top")
            .and_then(|t| t.with_param("legend_key_width", "22.5"))
            .expect("valid params");
        assert_eq!(theme.params.legend_position, Some(LegendPosition::Top));
        assert_eq!(theme.params.key_width(), 22.5);
        assert!(matches!(
            Theme::default().with_param("legend_spin", "1"),
            Err(GuideError::UnknownThemeParam(_))
        ));
        assert!(matches!(
            Theme::default().with_param("legend_position", "middle"),
            Err(GuideError::InvalidThemeValue { .. })
        ));
    }
}

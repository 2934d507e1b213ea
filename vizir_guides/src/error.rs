// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors raised while building guides.

use alloc::string::String;

use crate::Aesthetic;

/// A fatal guide configuration error.
///
/// Every variant is surfaced to the caller immediately; the pipeline never
/// recovers from a partially built set of guides.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GuideError {
    /// The guide spec is neither a registered guide name nor a guide value.
    #[error("Unknown guide: {0}")]
    UnknownGuide(String),
    /// The guide type cannot explain the scale's primary aesthetic.
    #[error("{guide} cannot be used for {aesthetic}")]
    IncompatibleAesthetic {
        /// Guide type name (`legend`, `colorbar`).
        guide: &'static str,
        /// Offending aesthetic.
        aesthetic: Aesthetic,
    },
    /// A guide `order` outside `0..=99`.
    #[error("'order' for a guide should be between 0 and 99, got {0}")]
    OrderOutOfRange(i32),
    /// `legend_box` is neither `vertical` nor `horizontal`.
    #[error("'legend_box' should be either 'vertical' or 'horizontal', got {0:?}")]
    InvalidLegendBox(String),
    /// A theme key this crate does not know about.
    #[error("unknown theme parameter: {0}")]
    UnknownThemeParam(String),
    /// A theme value that could not be parsed for its key.
    #[error("invalid value {value:?} for theme parameter {key}")]
    InvalidThemeValue {
        /// Theme key.
        key: &'static str,
        /// Rejected value.
        value: String,
    },
}

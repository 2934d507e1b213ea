// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name-to-constructor table for guide types.
//!
//! Guides requested by name (`"legend"`, `"colorbar"`) are looked up under the key
//! `"guide_<name>"`. The default table knows the built-in types; callers can register further
//! names, e.g. a pre-configured wide legend.

use alloc::format;
use alloc::string::String;

use hashbrown::HashMap;

use crate::Guide;
use crate::guide::{ColorbarGuide, LegendGuide};

/// Zero-argument guide constructor.
pub type GuideConstructor = fn() -> Guide;

/// A table of guide constructors keyed by `"guide_<name>"`.
#[derive(Clone, Debug)]
pub struct GuideRegistry {
    constructors: HashMap<String, GuideConstructor>,
}

impl Default for GuideRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("legend", Guide::legend);
        registry.register("colorbar", Guide::colorbar);
        registry.register("colourbar", Guide::colorbar);
        registry
    }
}

impl GuideRegistry {
    /// A registry with no entries.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers `constructor` under `"guide_<name>"`, replacing any previous entry.
    pub fn register(&mut self, name: &str, constructor: GuideConstructor) {
        self.constructors.insert(key(name), constructor);
    }

    /// Instantiates the guide registered as `"guide_<name>"`.
    pub fn create(&self, name: &str) -> Option<Guide> {
        self.constructors.get(&key(name)).map(|ctor| ctor())
    }

    /// Whether `"guide_<name>"` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&key(name))
    }
}

fn key(name: &str) -> String {
    format!("guide_{name}")
}

/// A horizontal legend laid out in a single row, available as `"legend_row"` when registered.
pub fn legend_row() -> Guide {
    LegendGuide::default().with_nrow(1).into()
}

/// A colorbar without tick marks, available as `"colorbar_plain"` when registered.
pub fn colorbar_plain() -> Guide {
    ColorbarGuide::default().with_ticks(false).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = GuideRegistry::default();
        assert_eq!(registry.create("legend"), Some(Guide::legend()));
        assert_eq!(registry.create("colourbar"), Some(Guide::colorbar()));
        assert!(registry.create("guide_legend").is_none());
        assert!(registry.create("axis").is_none());
    }

    #[test]
    fn custom_constructors_can_be_added() {
        let mut registry = GuideRegistry::empty();
        assert!(!registry.contains("legend_row"));
        registry.register("legend_row", legend_row);
        let Some(Guide::Legend(legend)) = registry.create("legend_row") else {
            panic!("expected a legend");
        };
        assert_eq!(legend.nrow, Some(1));
    }
}

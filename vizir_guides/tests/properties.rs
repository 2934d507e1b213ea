// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the guide collection and the merge and assembly steps.

use std::collections::BTreeSet;

use proptest::prelude::*;
use vizir_guides::{
    AesValue, Aesthetic, Guide, GuideBox, GuideItem, GuideRegistry, GuideSpec, Guides, Scale,
    Size, Theme,
};

const NAMES: &[&str] = &[
    "color", "colour", "fill", "shape", "size", "alpha", "linetype", "x", "y", "group", "label",
];

fn spec_strategy() -> impl Strategy<Value = GuideSpec> {
    prop_oneof![
        Just(GuideSpec::Disabled),
        Just(GuideSpec::named("legend")),
        Just(GuideSpec::named("colorbar")),
        (1..=99_i32).prop_map(|o| GuideSpec::from(Guide::legend().with_order(o))),
    ]
}

fn titled_box(title: &str) -> GuideBox {
    GuideBox {
        size: Size::new(10.0, 10.0),
        items: vec![GuideItem::Text {
            pos: (0.0, 0.0).into(),
            text: title.to_string(),
            font_size: 9.6,
            anchor: vizir_guides::TextAnchor::Start,
            fill: peniko::color::palette::css::BLACK.into(),
        }],
    }
}

proptest! {
    #[test]
    fn from_pairs_keeps_only_guide_aesthetics(
        pairs in prop::collection::vec((prop::sample::select(NAMES), spec_strategy()), 0..12)
    ) {
        let guides = Guides::from_pairs(pairs.iter().map(|(n, s)| (*n, s.clone())));

        let expected: BTreeSet<Aesthetic> =
            pairs.iter().filter_map(|(n, _)| Aesthetic::from_name(n)).collect();
        let actual: BTreeSet<Aesthetic> = guides.iter().map(|(ae, _)| ae).collect();
        prop_assert_eq!(actual, expected);

        // A `colour` entry always wins over `color`, regardless of position.
        if let Some((_, last_colour)) = pairs.iter().rev().find(|(n, _)| *n == "colour") {
            prop_assert_eq!(guides.get(Aesthetic::Color), Some(last_colour));
        }
    }

    #[test]
    fn assembly_sorts_by_order_and_keeps_ties_in_input_order(
        orders in prop::collection::vec(0..=99_i32, 1..10)
    ) {
        let gdefs: Vec<Guide> = orders
            .iter()
            .map(|o| Guide::legend().with_order(*o))
            .collect();
        let boxes: Vec<GuideBox> = (0..orders.len()).map(|i| titled_box(&i.to_string())).collect();
        let mut theme = Theme::default();
        theme.params = theme.params.with_defaults();

        let area = vizir_guides::assemble(boxes, &gdefs, &theme).expect("orders in range");
        let placed: Vec<usize> = area
            .children
            .iter()
            .map(|child| match &child.guide.items[0] {
                GuideItem::Text { text, .. } => text.parse().expect("index title"),
                other => panic!("unexpected item {other:?}"),
            })
            .collect();

        let mut expected: Vec<usize> = (0..orders.len()).collect();
        expected.sort_by_key(|&i| if orders[i] == 0 { 100 } else { orders[i] });
        prop_assert_eq!(placed, expected);
    }

    #[test]
    fn merge_yields_one_guide_per_distinct_hash(
        picks in prop::collection::vec((0..4_usize, 0..3_usize), 0..10)
    ) {
        const TITLES: [&str; 4] = ["a", "b", "c", "d"];
        const LEVELS: [&[&str]; 3] = [&["x"], &["x", "y"], &["y", "z"]];

        let registry = GuideRegistry::default();
        let gdefs: Vec<Guide> = picks
            .iter()
            .filter_map(|&(t, l)| {
                let scale = Scale::discrete(Aesthetic::Shape).with_levels(
                    LEVELS[l].iter().map(|label| (*label, AesValue::Size(1.0))),
                );
                let guide = vizir_guides::validate(&GuideSpec::named("legend"), &registry)
                    .expect("builtin")
                    .expect("enabled")
                    .with_title(TITLES[t]);
                guide.train(&scale)
            })
            .collect();

        let distinct: Vec<_> = gdefs.iter().fold(Vec::new(), |mut seen, g| {
            let hash = g.hash();
            if !seen.contains(&hash) {
                seen.push(hash);
            }
            seen
        });
        let merged = vizir_guides::merge(gdefs);
        prop_assert_eq!(merged.len(), distinct.len());
        let merged_hashes: Vec<_> = merged.iter().map(Guide::hash).collect();
        prop_assert_eq!(merged_hashes, distinct);
    }
}

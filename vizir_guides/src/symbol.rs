// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point shapes drawn inside legend keys.

use kurbo::{BezPath, Circle, Shape};

/// Shapes a `shape` scale can map onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A circle.
    Circle,
    /// A square (axis-aligned).
    Square,
    /// An upward-pointing triangle.
    Triangle,
    /// A square rotated by 45 degrees.
    Diamond,
    /// A plus sign.
    Cross,
}

impl Symbol {
    /// Default shape sequence for discrete shape scales.
    pub const PALETTE: [Self; 5] = [
        Self::Circle,
        Self::Triangle,
        Self::Square,
        Self::Cross,
        Self::Diamond,
    ];

    /// Returns a path for this symbol centered at `cx, cy`, using `size` as the diameter/side.
    pub fn path(self, cx: f64, cy: f64, size: f64) -> BezPath {
        let half = size * 0.5;
        match self {
            Self::Circle => {
                // Tolerance suits legend-sized glyphs; renderers can re-flatten.
                Circle::new((cx, cy), half).path_elements(0.1).collect()
            }
            Self::Square => polygon(&[
                (cx - half, cy - half),
                (cx + half, cy - half),
                (cx + half, cy + half),
                (cx - half, cy + half),
            ]),
            Self::Triangle => polygon(&[
                (cx, cy - half),
                (cx + half, cy + half),
                (cx - half, cy + half),
            ]),
            Self::Diamond => polygon(&[
                (cx, cy - half),
                (cx + half, cy),
                (cx, cy + half),
                (cx - half, cy),
            ]),
            Self::Cross => {
                let arm = size / 6.0;
                polygon(&[
                    (cx - arm, cy - half),
                    (cx + arm, cy - half),
                    (cx + arm, cy - arm),
                    (cx + half, cy - arm),
                    (cx + half, cy + arm),
                    (cx + arm, cy + arm),
                    (cx + arm, cy + half),
                    (cx - arm, cy + half),
                    (cx - arm, cy + arm),
                    (cx - half, cy + arm),
                    (cx - half, cy - arm),
                    (cx - arm, cy - arm),
                ])
            }
        }
    }
}

fn polygon(points: &[(f64, f64)]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter().copied();
    if let Some(first) = iter.next() {
        p.move_to(first);
        for pt in iter {
            p.line_to(pt);
        }
        p.close_path();
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_fit_their_size() {
        for symbol in Symbol::PALETTE {
            let bounds = symbol.path(10.0, 10.0, 8.0).bounding_box();
            assert!(bounds.x0 >= 6.0 - 0.01, "{symbol:?} overflows left");
            assert!(bounds.x1 <= 14.0 + 0.01, "{symbol:?} overflows right");
            assert!(bounds.y0 >= 6.0 - 0.01, "{symbol:?} overflows top");
            assert!(bounds.y1 <= 14.0 + 0.01, "{symbol:?} overflows bottom");
        }
    }
}

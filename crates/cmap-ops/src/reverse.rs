//! Map reversal.

use cmap_core::{ColorMap, ControlPoint, ListedMap, SegmentedMap};

/// Reverses a color map around position 0.5.
///
/// Listed maps reverse their element order. Segmented maps replace every
/// control point's position `p` with `1 - p`, swap its `before`/`after`
/// values, and re-sort each channel. Reversing twice reproduces the
/// original map's values at every position.
pub fn reverse(map: &ColorMap) -> ColorMap {
    let name = format!("{}_r", map.name());
    match map {
        ColorMap::Listed(m) => {
            let mut colors = m.colors.clone();
            colors.reverse();
            ColorMap::Listed(ListedMap { name, colors })
        }
        ColorMap::Segmented(m) => ColorMap::Segmented(SegmentedMap {
            name,
            red: reverse_channel(&m.red),
            green: reverse_channel(&m.green),
            blue: reverse_channel(&m.blue),
            alpha: m.alpha.as_deref().map(reverse_channel),
        }),
    }
}

fn reverse_channel(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let mut out: Vec<ControlPoint> = points
        .iter()
        .map(|p| ControlPoint {
            pos: 1.0 - p.pos,
            before: p.after,
            after: p.before,
        })
        .collect();
    out.sort_by(|a, b| a.pos.total_cmp(&b.pos));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cmap_core::Rgba;

    #[test]
    fn listed_reverse_flips_order() {
        let map = ColorMap::from_colors(
            "pal",
            vec![Rgba::opaque(1.0, 0.0, 0.0), Rgba::opaque(0.0, 0.0, 1.0)],
        )
        .unwrap();
        let rev = reverse(&map);
        let ColorMap::Listed(m) = &rev else {
            panic!("variant changed");
        };
        assert_eq!(m.colors[0], Rgba::opaque(0.0, 0.0, 1.0));
        assert_eq!(m.name, "pal_r");
    }

    #[test]
    fn segmented_reverse_mirrors_evaluation() {
        let map = ColorMap::from_name("hot").unwrap();
        let rev = reverse(&map);
        let orig = map.to_segmented().unwrap();
        let mirrored = rev.to_segmented().unwrap();
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let a = orig.evaluate(t);
            let b = mirrored.evaluate(1.0 - t);
            assert_abs_diff_eq!(a.r, b.r, epsilon = 1e-5);
            assert_abs_diff_eq!(a.g, b.g, epsilon = 1e-5);
            assert_abs_diff_eq!(a.b, b.b, epsilon = 1e-5);
        }
    }

    #[test]
    fn reverse_is_involutive() {
        let map = ColorMap::from_name("jet").unwrap();
        let twice = reverse(&reverse(&map));
        let a = map.sample(64).unwrap();
        let b = twice.sample(64).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_abs_diff_eq!(x.r, y.r, epsilon = 1e-5);
            assert_abs_diff_eq!(x.g, y.g, epsilon = 1e-5);
            assert_abs_diff_eq!(x.b, y.b, epsilon = 1e-5);
        }
    }

    #[test]
    fn reverse_swaps_jump_sides() {
        let jump = vec![
            ControlPoint::flat(0.0, 0.0),
            ControlPoint::jump(0.25, 0.2, 0.8),
            ControlPoint::flat(1.0, 1.0),
        ];
        let map = ColorMap::Segmented(
            SegmentedMap::new("step", jump.clone(), jump.clone(), jump).unwrap(),
        );
        let ColorMap::Segmented(rev) = reverse(&map) else {
            panic!("variant changed");
        };
        let p = rev.red.iter().find(|p| (p.pos - 0.75).abs() < 1e-6).unwrap();
        assert_abs_diff_eq!(p.before, 0.8);
        assert_abs_diff_eq!(p.after, 0.2);
    }
}

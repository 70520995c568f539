use crate::model::{IndexedRectSize, RectSize};

pub mod attempt;
pub mod free_space;

pub use attempt::{PackFailure, try_pack};

/// Orders input rectangles by packing priority: descending longest side,
/// then descending area, then descending width. The sort is stable, so
/// identical rectangles keep their input order and packing output is
/// reproducible for identical input.
pub fn rank(sizes: &[RectSize]) -> Vec<IndexedRectSize> {
    let mut ranked: Vec<IndexedRectSize> = sizes
        .iter()
        .enumerate()
        .map(|(index, &size)| IndexedRectSize { index, size })
        .collect();
    ranked.sort_by(|a, b| {
        b.size
            .longest_side()
            .cmp(&a.size.longest_side())
            .then_with(|| b.size.area().cmp(&a.size.area()))
            .then_with(|| b.size.width.cmp(&a.size.width))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(list: &[(u32, u32)]) -> Vec<RectSize> {
        list.iter().map(|&(w, h)| RectSize::new(w, h)).collect()
    }

    #[test]
    fn rank_orders_by_longest_side_then_area_then_width() {
        let input = sizes(&[(4, 10), (10, 4), (8, 8), (3, 3)]);
        let ranked = rank(&input);
        // (4,10) and (10,4) share longest side and area; the wider one wins.
        let order: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2, 3]);
    }

    #[test]
    fn rank_is_stable_for_identical_sizes() {
        let input = sizes(&[(6, 6), (6, 6), (6, 6)]);
        let order: Vec<usize> = rank(&input).iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn rank_prefers_longer_side_over_area() {
        // (20,1) has area 20, (6,6) has area 36; the long thin one still
        // packs first because it is more constrained.
        let input = sizes(&[(6, 6), (20, 1)]);
        let order: Vec<usize> = rank(&input).iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0]);
    }
}

//! Open-slot bookkeeping for a single packing attempt.
//!
//! The open list is a plain vector of [`Coordinates`] kept sorted ascending
//! by area, so a linear scan finds the smallest slot that fits first. The
//! list is owned by one attempt and never shared across attempts.

use crate::model::{Coordinates, RectSize};

/// Rounds `v` up to the next multiple of `align`.
pub fn align_up(v: i64, align: i64) -> i64 {
    (v + align - 1) / align * align
}

/// Inserts `item` keeping `slots` sorted ascending by area.
pub fn insert_in_order(slots: &mut Vec<Coordinates>, item: Coordinates) {
    let area = item.area();
    let at = slots
        .iter()
        .position(|s| area < s.area())
        .unwrap_or(slots.len());
    slots.insert(at, item);
}

/// Returns true when `size` fits into `slot` once padding and cell alignment
/// are added on the sides that do not already touch the sheet boundary.
pub fn can_insert(
    slot: &Coordinates,
    size: RectSize,
    padding: i64,
    cell_align: i64,
    far_right: i64,
    far_bottom: i64,
) -> bool {
    let mut right = slot.left + size.width as i64;
    if slot.right < far_right {
        // Margin for this rectangle's right border, rounded up to the cell
        // grid, plus margin for a neighbor's own left border.
        right = align_up(right + padding, cell_align) + padding;
    }
    let mut bottom = slot.top + size.height as i64;
    if slot.bottom < far_bottom {
        bottom = align_up(bottom + padding, cell_align) + padding;
    }
    slot.right >= right && slot.bottom >= bottom
}

/// Extends `rect` on the right and bottom with padding and cell alignment.
/// Sides already flush with the packing boundary are left alone.
pub fn add_padding(
    rect: &mut Coordinates,
    padding: i64,
    cell_align: i64,
    far_right: i64,
    far_bottom: i64,
) {
    if rect.right < far_right {
        rect.right = align_up(rect.right + padding, cell_align) + padding;
    }
    if rect.bottom < far_bottom {
        rect.bottom = align_up(rect.bottom + padding, cell_align) + padding;
    }
}

/// Subtracts `item` from every open slot it overlaps, splitting the remainder
/// of each touched slot into up to four sub-rectangles.
pub fn trim_overlap(slots: &mut Vec<Coordinates>, item: Coordinates) {
    let mut i = 0;
    while i < slots.len() {
        if !slots[i].collides(&item) {
            i += 1;
            continue;
        }
        let slot = slots.remove(i);
        let shared = item.overlap(&slot);
        let leftovers = [
            Coordinates::new(slot.left, shared.right, slot.top, shared.top),
            Coordinates::new(slot.left, shared.left, shared.top, slot.bottom),
            Coordinates::new(shared.right, slot.right, slot.top, shared.bottom),
            Coordinates::new(shared.left, slot.right, shared.bottom, slot.bottom),
        ];
        for leftover in leftovers {
            if leftover.width() > 0 && leftover.height() > 0 {
                insert_in_order(slots, leftover);
            }
        }
        // Replacements never collide with `item`, so rescanning from the
        // same index is safe.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_cell_grid() {
        assert_eq!(align_up(0, 4), 0);
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(4, 4), 4);
        assert_eq!(align_up(13, 4), 16);
        assert_eq!(align_up(13, 1), 13);
    }

    #[test]
    fn insert_in_order_keeps_ascending_area() {
        let mut slots = Vec::new();
        insert_in_order(&mut slots, Coordinates::new(0, 10, 0, 10)); // 100
        insert_in_order(&mut slots, Coordinates::new(0, 2, 0, 2)); // 4
        insert_in_order(&mut slots, Coordinates::new(0, 6, 0, 6)); // 36
        let areas: Vec<i64> = slots.iter().map(|s| s.area()).collect();
        assert_eq!(areas, vec![4, 36, 100]);
    }

    #[test]
    fn can_insert_skips_padding_at_sheet_boundary() {
        let slot = Coordinates::new(0, 16, 0, 16);
        let size = RectSize::new(16, 16);
        // The slot spans the full sheet, so no padding is required and the
        // image fits exactly.
        assert!(can_insert(&slot, size, 2, 4, 16, 16));
        // An interior slot of the same size must reserve padding and fails.
        assert!(!can_insert(&slot, size, 2, 4, 32, 32));
    }

    #[test]
    fn can_insert_accounts_for_alignment() {
        let slot = Coordinates::new(0, 12, 0, 32);
        // 5 wide pads to 5+1=6, aligns to 8, plus 1 for the neighbor: 9 <= 12.
        assert!(can_insert(&slot, RectSize::new(5, 4), 1, 8, 64, 64));
        // 11 wide pads to 12, aligns to 16, plus 1: 17 > 12.
        assert!(!can_insert(&slot, RectSize::new(11, 4), 1, 8, 64, 64));
    }

    #[test]
    fn add_padding_extends_interior_sides_only() {
        let mut rect = Coordinates::new(0, 10, 0, 10);
        add_padding(&mut rect, 2, 4, 10, 64);
        // Right edge is flush with the boundary and stays; bottom pads to
        // align_up(10 + 2, 4) + 2.
        assert_eq!(rect, Coordinates::new(0, 10, 0, 14));
    }

    #[test]
    fn trim_overlap_splits_touched_slots() {
        let mut slots = vec![Coordinates::new(0, 10, 0, 10)];
        trim_overlap(&mut slots, Coordinates::new(4, 6, 4, 6));
        assert_eq!(slots.len(), 4);
        for slot in &slots {
            assert!(!slot.collides(&Coordinates::new(4, 6, 4, 6)));
            assert!(slot.width() > 0 && slot.height() > 0);
        }
        // The four leftovers tile the original slot minus the item.
        let total: i64 = slots.iter().map(|s| s.area()).sum();
        assert_eq!(total, 100 - 4);
    }

    #[test]
    fn trim_overlap_leaves_disjoint_slots_alone() {
        let mut slots = vec![Coordinates::new(0, 4, 0, 4)];
        trim_overlap(&mut slots, Coordinates::new(4, 8, 0, 4));
        assert_eq!(slots, vec![Coordinates::new(0, 4, 0, 4)]);
    }
}

//! A single packing attempt against fixed candidate sheet dimensions.

use crate::model::{Coordinates, IndexedRectSize};

use super::free_space::{add_padding, can_insert, insert_in_order, trim_overlap};

/// Diagnostic payload of a failed attempt: how many of the ranked rectangles
/// found a spot before the first miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackFailure {
    pub fit_count: usize,
}

/// Places every ranked rectangle into a `target_w` x `target_h` sheet, or
/// reports how many fit. Returned coordinates are the padded footprints, one
/// per rectangle in ranked order; callers recover content rectangles from
/// the placement corner plus the source size.
///
/// Failure is an expected outcome here: the sizing search probes many
/// candidate dimensions and rejects the ones that do not pack. A failed
/// attempt never leaks a partial placement list.
pub fn try_pack(
    ranked: &[IndexedRectSize],
    target_w: u32,
    target_h: u32,
    padding: u32,
    cell_align: u32,
) -> Result<Vec<Coordinates>, PackFailure> {
    let far_right = target_w as i64;
    let far_bottom = target_h as i64;
    let padding = padding as i64;
    let cell_align = cell_align.max(1) as i64;

    let mut open = vec![Coordinates::new(0, far_right, 0, far_bottom)];
    let mut closed: Vec<Coordinates> = Vec::with_capacity(ranked.len());

    for item in ranked {
        let size = item.size;

        let found = (0..open.len())
            .find(|&j| can_insert(&open[j], size, padding, cell_align, far_right, far_bottom));
        if let Some(j) = found {
            let slot = open[j];
            let mut spent = Coordinates::new(
                slot.left,
                slot.left + size.width as i64,
                slot.top,
                slot.top + size.height as i64,
            );

            // Nudge the placement left, then up, while its padded footprint
            // stays clear of everything placed so far; this keeps thin
            // unusable slivers from accumulating between neighbors.
            let mut pushed = false;
            while spent.left > 0 {
                let mut probe = spent.translated(-1, 0);
                add_padding(&mut probe, padding, cell_align, far_right, far_bottom);
                if probe.collides_any(&closed) {
                    break;
                }
                spent = spent.translated(-1, 0);
                pushed = true;
            }
            while spent.top > 0 {
                let mut probe = spent.translated(0, -1);
                add_padding(&mut probe, padding, cell_align, far_right, far_bottom);
                if probe.collides_any(&closed) {
                    break;
                }
                spent = spent.translated(0, -1);
                pushed = true;
            }
            add_padding(&mut spent, padding, cell_align, far_right, far_bottom);

            if pushed {
                // The placement drifted out of its slot; carve its footprint
                // out of every open region it now overlaps.
                trim_overlap(&mut open, spent);
                closed.push(spent);
                continue;
            }

            // Guillotine split: one straight cut through the leftover, with
            // the cut axis chosen so the larger piece stays in one slot.
            let (big, small) = if slot.bottom - spent.bottom < slot.right - spent.right {
                let small = Coordinates::new(slot.left, spent.right, spent.bottom, slot.bottom);
                let big = Coordinates::new(spent.right, slot.right, slot.top, small.bottom);
                (big, small)
            } else {
                let big = Coordinates::new(slot.left, slot.right, spent.bottom, slot.bottom);
                let small = Coordinates::new(spent.right, slot.right, slot.top, big.top);
                (big, small)
            };
            open.remove(j);
            // Zero-width leftovers stay listed: their top-left corners are
            // still anchor candidates for the fallback scan below.
            if big.height() > 0 {
                insert_in_order(&mut open, big);
            }
            if small.height() > 0 {
                insert_in_order(&mut open, small);
            }
            closed.push(spent);
            continue;
        }

        // No single slot holds the rectangle. Anchor it at each open slot's
        // top-left corner instead; a fit there may span several adjacent
        // open regions. Fits reachable only from other anchor points are
        // missed, but the smallest-first slot ordering makes those rare.
        let mut fallback = None;
        for slot in &open {
            let mut insert = Coordinates::new(
                slot.left,
                slot.left + size.width as i64,
                slot.top,
                slot.top + size.height as i64,
            );
            add_padding(&mut insert, padding, cell_align, far_right, far_bottom);
            if insert.right <= far_right
                && insert.bottom <= far_bottom
                && !insert.collides_any(&closed)
            {
                fallback = Some(insert);
                break;
            }
        }
        match fallback {
            Some(insert) => {
                trim_overlap(&mut open, insert);
                closed.push(insert);
            }
            None => {
                return Err(PackFailure {
                    fit_count: closed.len(),
                });
            }
        }
    }

    Ok(closed)
}

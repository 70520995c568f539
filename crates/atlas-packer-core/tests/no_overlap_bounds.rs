use rand::{Rng, SeedableRng};

use atlas_packer_core::prelude::*;

fn random_items(seed: u64, count: usize) -> Vec<(String, u32, u32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let w = rng.gen_range(4..=40);
            let h = rng.gen_range(4..=40);
            (format!("r{i}"), w, h)
        })
        .collect()
}

#[test]
fn random_set_packs_disjoint_and_in_bounds() {
    let items = random_items(2024, 40);
    let sizes: Vec<(u32, u32)> = items.iter().map(|(_, w, h)| (*w, *h)).collect();
    let cfg = AtlasConfig::builder().max_dimension(1024).padding(2).build();
    let layout = pack_layout(items, cfg).expect("pack");

    assert_eq!(layout.entries.len(), 40);
    for (i, a) in layout.entries.iter().enumerate() {
        // Placement bounds stay within the sheet.
        assert!(a.rect.left >= 0 && a.rect.top >= 0, "{a:?}");
        assert!(a.rect.right <= layout.width as i64, "{a:?}");
        assert!(a.rect.bottom <= layout.height as i64, "{a:?}");
        // Entries keep their input order and dimensions.
        let (w, h) = sizes[i];
        assert_eq!(a.key, format!("r{i}"));
        assert_eq!((a.rect.width(), a.rect.height()), (w as i64, h as i64));
        // No pair of placements shares a pixel.
        for b in layout.entries.iter().skip(i + 1) {
            assert!(!a.rect.collides(&b.rect), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn aligned_packing_respects_padding_gap() {
    let items = random_items(7, 24);
    let cfg = AtlasConfig::builder().max_dimension(1024).padding(3).build();
    let layout = pack_layout(items, cfg).expect("pack");

    // With padding 3, no two placements may come closer than 3 pixels on
    // either axis unless they are separated on the other one.
    for (i, a) in layout.entries.iter().enumerate() {
        for b in layout.entries.iter().skip(i + 1) {
            let gap_x = (b.rect.left - a.rect.right).max(a.rect.left - b.rect.right);
            let gap_y = (b.rect.top - a.rect.bottom).max(a.rect.top - b.rect.bottom);
            assert!(
                gap_x >= 3 || gap_y >= 3,
                "{a:?} and {b:?} are closer than the padding"
            );
        }
    }
}

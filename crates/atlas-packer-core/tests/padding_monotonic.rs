use atlas_packer_core::prelude::*;

fn sheet_area(padding: u32, items: &[(u32, u32)]) -> u64 {
    let cfg = AtlasConfig::builder()
        .max_dimension(256)
        .padding(padding)
        .cell_align(1)
        .build();
    let inputs: Vec<(String, u32, u32)> = items
        .iter()
        .enumerate()
        .map(|(i, &(w, h))| (format!("r{i}"), w, h))
        .collect();
    let layout = pack_layout(inputs, cfg).expect("pack");
    layout.width as u64 * layout.height as u64
}

#[test]
fn growing_padding_never_shrinks_the_sheet() {
    let items = [(10, 10), (10, 10)];
    let mut last = 0u64;
    for padding in [0, 1, 2, 3, 4, 6, 8] {
        let area = sheet_area(padding, &items);
        assert!(
            area >= last,
            "padding {padding} shrank the sheet: {area} < {last}"
        );
        last = area;
    }
}

#[test]
fn padding_widens_the_two_square_strip_linearly() {
    // With two 10x10 images the packed strip grows by exactly twice the
    // padding on its long axis.
    let items = [(10, 10), (10, 10)];
    assert_eq!(sheet_area(0, &items), 200);
    assert_eq!(sheet_area(1, &items), 220);
    assert_eq!(sheet_area(2, &items), 240);
}

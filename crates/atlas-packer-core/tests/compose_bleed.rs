use atlas_packer_core::compositing::{BlitFrame, composite};
use atlas_packer_core::model::Coordinates;
use atlas_packer_core::prelude::*;
use image::{DynamicImage, Rgba, RgbaImage};

fn gradient_image(w: u32, h: u32) -> RgbaImage {
    let mut img = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            img.put_pixel(x, y, Rgba([(10 + x * 40) as u8, (10 + y * 40) as u8, 0, 255]));
        }
    }
    img
}

#[test]
fn bleed_fills_padding_with_nearest_edge_pixels() {
    let src = gradient_image(4, 4);
    let frame = BlitFrame {
        image: 0,
        content: Coordinates::new(2, 6, 2, 6),
        padded: Coordinates::new(2, 10, 2, 10),
    };
    let fill = Rgba([7, 7, 7, 7]);
    let sheet = composite(&[src.clone()], &[frame], 8, 8, fill, 2);

    for y in 0..8u32 {
        for x in 0..8u32 {
            let px = *sheet.get_pixel(x, y);
            let in_content = (2..6).contains(&x) && (2..6).contains(&y);
            if in_content {
                assert_eq!(px, *src.get_pixel(x - 2, y - 2));
            } else {
                // Every padding pixel matches the nearest source edge pixel
                // and never shows the fill color.
                let sx = (x as i32 - 2).clamp(0, 3) as u32;
                let sy = (y as i32 - 2).clamp(0, 3) as u32;
                assert_eq!(px, *src.get_pixel(sx, sy), "bad bleed at ({x},{y})");
                assert_ne!(px, fill);
            }
        }
    }
}

#[test]
fn full_pipeline_copies_source_pixels_verbatim() {
    let src = gradient_image(4, 4);
    let cfg = AtlasConfig::builder()
        .max_dimension(16)
        .padding(0)
        .cell_align(1)
        .build();
    let out = pack_images(
        vec![InputImage {
            key: "g".into(),
            image: DynamicImage::ImageRgba8(src.clone()),
        }],
        cfg,
    )
    .expect("pack");

    assert_eq!((out.layout.width, out.layout.height), (4, 4));
    let rect = &out.layout.entries[0].rect;
    for y in 0..4u32 {
        for x in 0..4u32 {
            assert_eq!(
                *out.rgba
                    .get_pixel(rect.left as u32 + x, rect.top as u32 + y),
                *src.get_pixel(x, y)
            );
        }
    }
}

#[test]
fn placeholder_cell_is_solid_white() {
    let cfg = AtlasConfig::builder()
        .max_dimension(64)
        .padding(0)
        .placeholder(true)
        .build();
    let out = pack_images(
        vec![InputImage {
            key: "img".into(),
            image: DynamicImage::ImageRgba8(gradient_image(8, 8)),
        }],
        cfg,
    )
    .expect("pack");

    let white = out
        .layout
        .entries
        .iter()
        .find(|e| e.key == PLACEHOLDER_KEY)
        .expect("placeholder entry");
    assert_eq!((white.rect.width(), white.rect.height()), (4, 4));
    for y in white.rect.top..white.rect.bottom {
        for x in white.rect.left..white.rect.right {
            assert_eq!(
                *out.rgba.get_pixel(x as u32, y as u32),
                Rgba([255, 255, 255, 255])
            );
        }
    }
}

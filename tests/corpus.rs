//! Test corpus: pattern-generated images across sizes, depths and
//! orientations.

mod common;

use common::{BmpBuilder, noise, ramp_palette, xbgr};
use enough::Unstoppable;
use zenbmp::*;

/// Pack palette indices into bytes, leftmost pixel in the high bits.
fn pack_row(indices: &[u8], bpp: u16) -> Vec<u8> {
    let bpp = usize::from(bpp);
    let per_byte = 8 / bpp;
    indices
        .chunks(per_byte)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |b, (i, &v)| b | (v << (8 - bpp * (i + 1))))
        })
        .collect()
}

/// Random palette indices for a `w` x `h` image, top row first.
fn index_grid(w: usize, h: usize, bpp: u16, seed: u32) -> Vec<Vec<u8>> {
    let max = 1u16 << bpp;
    (0..h)
        .map(|y| {
            noise(w, seed.wrapping_add(y as u32 * 7919))
                .into_iter()
                .map(|v| (u16::from(v) % max) as u8)
                .collect()
        })
        .collect()
}

/// Stored rows (top row first) for any depth.
fn stored_rows(w: usize, h: usize, bpp: u16, seed: u32) -> Vec<Vec<u8>> {
    match bpp {
        1 | 4 | 8 => index_grid(w, h, bpp, seed)
            .iter()
            .map(|row| pack_row(row, bpp))
            .collect(),
        _ => (0..h)
            .map(|y| noise(w * usize::from(bpp) / 8, seed ^ (y as u32 + 1)))
            .collect(),
    }
}

fn builder(w: usize, h: i32, bpp: u16) -> BmpBuilder {
    let b = BmpBuilder::new(w as u32, h, bpp);
    if bpp <= 8 {
        b.palette(&ramp_palette(1 << bpp))
    } else {
        b
    }
}

/// The same image stored bottom-up and top-down.
fn orientation_pair(w: usize, h: usize, bpp: u16, seed: u32) -> (Vec<u8>, Vec<u8>) {
    let top_first = stored_rows(w, h, bpp, seed);
    let bottom_first: Vec<Vec<u8>> = top_first.iter().rev().cloned().collect();
    let bottom_up = builder(w, h as i32, bpp).rows(&bottom_first).build();
    let top_down = builder(w, -(h as i32), bpp).rows(&top_first).build();
    (bottom_up, top_down)
}

// ── Orientation and size ─────────────────────────────────────────────

#[test]
fn orientation_twins_decode_identically() {
    for bpp in [1u16, 4, 8, 16, 24, 32] {
        for w in 1..=9usize {
            for h in 1..=4usize {
                let (bottom_up, top_down) = orientation_pair(w, h, bpp, (w * 31 + h) as u32);
                for rgba in [false, true] {
                    let a = DecodeRequest::new(&bottom_up)
                        .with_rgba_order(rgba)
                        .decode(Unstoppable)
                        .unwrap();
                    let b = DecodeRequest::new(&top_down)
                        .with_rgba_order(rgba)
                        .decode(Unstoppable)
                        .unwrap();
                    assert_eq!(a.pixels().len(), w * h * 4, "{bpp}bpp {w}x{h}");
                    assert_eq!(a.pixels(), b.pixels(), "{bpp}bpp {w}x{h} rgba={rgba}");
                    assert_eq!(a.layout, b.layout);
                    assert_eq!(a.header.orientation, Orientation::BottomUp);
                    assert_eq!(b.header.orientation, Orientation::TopDown);
                }
            }
        }
    }
}

#[test]
fn empty_images_decode_to_empty_buffers() {
    for (w, h) in [(0u32, 3i32), (3, 0), (0, 0)] {
        for bpp in [1u16, 8, 24, 32] {
            let bmp = builder(w as usize, h, bpp).build();
            let decoded = decode_bmp(&bmp, Unstoppable).unwrap();
            assert!(decoded.pixels().is_empty(), "{bpp}bpp {w}x{h}");
        }
    }
}

// ── Reference comparisons ────────────────────────────────────────────

#[test]
fn palette_depths_match_reference() {
    for bpp in [1u16, 4, 8] {
        let pal = ramp_palette(1 << bpp);
        for w in [1usize, 3, 7, 8, 13] {
            let h = 3;
            let grid = index_grid(w, h, bpp, 0xBEEF + w as u32);
            let stored: Vec<Vec<u8>> = grid.iter().rev().map(|r| pack_row(r, bpp)).collect();
            let bmp = builder(w, h as i32, bpp).rows(&stored).build();
            let decoded = decode_bmp(&bmp, Unstoppable).unwrap();

            let expect: Vec<u8> = grid
                .iter()
                .flatten()
                .flat_map(|&i| xbgr(pal[usize::from(i)]))
                .collect();
            assert_eq!(decoded.pixels(), &expect[..], "{bpp}bpp width {w}");
        }
    }
}

#[test]
fn bgr24_matches_reference() {
    let (w, h) = (5usize, 4usize);
    let top_first = stored_rows(w, h, 24, 0xCAFE);
    let bmp = BmpBuilder::new(w as u32, -(h as i32), 24)
        .rows(&top_first)
        .build();

    let native = decode_bmp(&bmp, Unstoppable).unwrap();
    let rgba = decode_bmp_rgba(&bmp, Unstoppable).unwrap();
    for (y, row) in top_first.iter().enumerate() {
        for (x, bgr) in row.chunks_exact(3).enumerate() {
            let (x, y) = (x as u32, y as u32);
            assert_eq!(native.pixel(x, y).unwrap(), [0, bgr[0], bgr[1], bgr[2]]);
            assert_eq!(rgba.pixel(x, y).unwrap(), [bgr[2], bgr[1], bgr[0], 0]);
        }
    }
}

#[test]
fn bgrx32_matches_reference() {
    let (w, h) = (6usize, 3usize);
    let top_first = stored_rows(w, h, 32, 0xF00D);
    let bmp = BmpBuilder::new(w as u32, -(h as i32), 32)
        .rows(&top_first)
        .build();
    let decoded = decode_bmp_rgba(&bmp, Unstoppable).unwrap();
    for (y, row) in top_first.iter().enumerate() {
        for (x, bgrx) in row.chunks_exact(4).enumerate() {
            assert_eq!(
                decoded.pixel(x as u32, y as u32).unwrap(),
                [bgrx[2], bgrx[1], bgrx[0], 255]
            );
        }
    }
}

#[test]
fn five_bit_channels_cover_full_range() {
    // One row holding every 5-bit red value.
    let samples: Vec<u8> = (0u16..32)
        .flat_map(|v| (v << 10).to_le_bytes())
        .collect();
    let bmp = BmpBuilder::new(32, 1, 16).rows(&[samples]).build();
    let decoded = decode_bmp_rgba(&bmp, Unstoppable).unwrap();
    let reds: Vec<u8> = decoded.pixels().chunks_exact(4).map(|p| p[0]).collect();
    assert_eq!(reds[0], 0);
    assert_eq!(reds[31], 255);
    assert!(reds.windows(2).all(|w| w[0] <= w[1]), "{reds:?}");
}

// ── RLE against uncompressed twins ───────────────────────────────────

/// Simple RLE8 encoder: encoded runs only, end-of-line after each row.
fn rle8_encode(rows_file_order: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows_file_order {
        let mut i = 0;
        while i < row.len() {
            let v = row[i];
            let mut n = 1;
            while i + n < row.len() && row[i + n] == v && n < 255 {
                n += 1;
            }
            out.extend_from_slice(&[n as u8, v]);
            i += n;
        }
        out.extend_from_slice(&[0, 0]);
    }
    out.extend_from_slice(&[0, 1]);
    out
}

/// RLE4 encoder: one run per pixel with both nibbles set to the index.
fn rle4_encode(rows_file_order: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows_file_order {
        for &v in row {
            out.extend_from_slice(&[1, (v << 4) | v]);
        }
        out.extend_from_slice(&[0, 0]);
    }
    out.extend_from_slice(&[0, 1]);
    out
}

#[test]
fn rle8_matches_uncompressed_twin() {
    let pal = ramp_palette(256);
    for (w, h) in [(1usize, 1usize), (4, 3), (9, 5), (300, 2)] {
        // Few distinct values so runs actually form.
        let grid: Vec<Vec<u8>> = index_grid(w, h, 8, 0x1234 + w as u32)
            .into_iter()
            .map(|r| r.into_iter().map(|v| v / 64).collect())
            .collect();
        let bottom_first: Vec<Vec<u8>> = grid.iter().rev().cloned().collect();

        let plain = BmpBuilder::new(w as u32, h as i32, 8)
            .palette(&pal)
            .rows(&bottom_first)
            .build();
        let rle = BmpBuilder::new(w as u32, h as i32, 8)
            .compression(1)
            .palette(&pal)
            .data(rle8_encode(&bottom_first))
            .build();

        let a = decode_bmp(&plain, Unstoppable).unwrap();
        let b = decode_bmp(&rle, Unstoppable).unwrap();
        assert_eq!(a.pixels(), b.pixels(), "{w}x{h}");
        assert_eq!(b.layout, PixelLayout::Xbgr8);
    }
}

#[test]
fn rle4_matches_uncompressed_twin() {
    let pal = ramp_palette(16);
    for (w, h) in [(1usize, 1usize), (5, 3), (8, 2)] {
        let grid = index_grid(w, h, 4, 0x4321 + w as u32);
        let bottom_first: Vec<Vec<u8>> = grid.iter().rev().cloned().collect();
        let packed: Vec<Vec<u8>> = bottom_first.iter().map(|r| pack_row(r, 4)).collect();

        let plain = BmpBuilder::new(w as u32, h as i32, 4)
            .palette(&pal)
            .rows(&packed)
            .build();
        let rle = BmpBuilder::new(w as u32, h as i32, 4)
            .compression(2)
            .palette(&pal)
            .data(rle4_encode(&bottom_first))
            .build();

        let a = decode_bmp(&plain, Unstoppable).unwrap();
        let b = decode_bmp(&rle, Unstoppable).unwrap();
        assert_eq!(a.pixels(), b.pixels(), "{w}x{h}");
    }
}

#[test]
fn rle_top_down_matches_bottom_up() {
    let pal = ramp_palette(256);
    let grid = index_grid(6, 4, 8, 0x5555);
    let top_first: Vec<Vec<u8>> = grid;
    let bottom_first: Vec<Vec<u8>> = top_first.iter().rev().cloned().collect();

    let bottom_up = BmpBuilder::new(6, 4, 8)
        .compression(1)
        .palette(&pal)
        .data(rle8_encode(&bottom_first))
        .build();
    let top_down = BmpBuilder::new(6, -4, 8)
        .compression(1)
        .palette(&pal)
        .data(rle8_encode(&top_first))
        .build();

    let a = decode_bmp(&bottom_up, Unstoppable).unwrap();
    let b = decode_bmp(&top_down, Unstoppable).unwrap();
    assert_eq!(a.pixels(), b.pixels());
}

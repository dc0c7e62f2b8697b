#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

/// File header + 40-byte info header, followed by `palette` and `pixels`.
fn bmp(width: i32, height: i32, bpp: u16, compression: u32, palette: &[u8], pixels: &[u8]) -> Vec<u8> {
    let masks: &[u32] = if compression == 3 { &[0xf800, 0x07e0, 0x001f] } else { &[] };
    let offset = 14 + 40 + masks.len() * 4 + palette.len();
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((offset + pixels.len()) as u32).to_le_bytes()); // file size
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&(offset as u32).to_le_bytes()); // data offset
    out.extend_from_slice(&40u32.to_le_bytes()); // DIB header size
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 16]); // resolution, colors used, important
    for m in masks {
        out.extend_from_slice(&m.to_le_bytes());
    }
    out.extend_from_slice(palette);
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1
    fs::write(format!("{dir}/bgr24_1x1.bmp"), bmp(1, 1, 24, 0, &[], &[0xff, 0, 0, 0])).unwrap();

    // 8-bit palette 2x2, top-down
    let pal = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0];
    let px = [0, 1, 0, 0, 1, 0, 0, 0];
    fs::write(format!("{dir}/pal8_2x2.bmp"), bmp(2, -2, 8, 0, &pal, &px)).unwrap();

    // RLE8 4x2: run, end-of-line, absolute run, end-of-bitmap
    let rle = [4, 1, 0, 0, 0, 3, 0, 1, 0, 0, 0, 0, 1];
    fs::write(format!("{dir}/rle8_4x2.bmp"), bmp(4, 2, 8, 1, &pal, &rle)).unwrap();

    // RLE4 with a delta
    let rle4 = [3, 0x10, 0, 2, 1, 1, 2, 0x11, 0, 1];
    fs::write(format!("{dir}/rle4_5x3.bmp"), bmp(5, 3, 4, 2, &pal, &rle4)).unwrap();

    // 16-bit 565 bitfields 2x1
    fs::write(format!("{dir}/rgb565_2x1.bmp"), bmp(2, 1, 16, 3, &[], &[0x1f, 0xf8, 0xe0, 0x07])).unwrap();

    // Truncated/malformed seeds for edge coverage
    let full = bmp(3, 3, 24, 0, &[], &[0x80; 36]);
    fs::write(format!("{dir}/truncated.bmp"), &full[..full.len() - 10]).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}

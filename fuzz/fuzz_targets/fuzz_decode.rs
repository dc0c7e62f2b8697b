#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = zenbmp::read_header(data);

    // RLE streams can legitimately cover large images from a few bytes,
    // so allocation is capped by limits.
    let limits = zenbmp::Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    for rgba_order in [false, true] {
        if let Ok(out) = zenbmp::DecodeRequest::new(data)
            .with_rgba_order(rgba_order)
            .with_limits(&limits)
            .decode(enough::Unstoppable)
        {
            assert_eq!(
                out.pixels().len(),
                out.width as usize * out.height as usize * 4
            );
            let _ = out.as_pixels::<rgb::RGBA8>();
        }
    }
});

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep output allocation bounded so the fuzzer exercises the parser
    // rather than the allocator.
    let limits = zenanymap::Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };

    // Must never panic
    if let Ok(out) = zenanymap::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    {
        assert_eq!(
            out.pixels().len(),
            out.width as usize * out.height as usize
        );
    }

    // Header probe must never panic either
    let _ = zenanymap::ImageInfo::from_bytes(data);
});

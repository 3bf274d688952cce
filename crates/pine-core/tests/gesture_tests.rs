// Host-side tests for the brightness-heuristic classifier over synthetic
// RGBA frames at the capture resolution.

use pine_core::{
    classify_frame, CaptureError, SceneMode, CAPTURE_HEIGHT, CAPTURE_WIDTH, OPEN_COUNT_THRESHOLD,
};

const W: u32 = CAPTURE_WIDTH;
const H: u32 = CAPTURE_HEIGHT;

fn dark_frame() -> Vec<u8> {
    vec![0u8; (W * H * 4) as usize]
}

fn set_pixel(frame: &mut [u8], x: u32, y: u32, value: u8) {
    let i = ((y * W + x) * 4) as usize;
    frame[i] = value;
    frame[i + 1] = value;
    frame[i + 2] = value;
    frame[i + 3] = 255;
}

fn frame_with_bright(count: usize) -> Vec<u8> {
    let mut frame = dark_frame();
    for i in 0..count as u32 {
        set_pixel(&mut frame, i % W, i / W, 255);
    }
    frame
}

#[test]
fn empty_frame_yields_no_sample() {
    assert!(classify_frame(&dark_frame(), W, H).is_none());
}

#[test]
fn brightness_threshold_is_strict() {
    let mut frame = dark_frame();
    set_pixel(&mut frame, 10, 10, 180); // mean of exactly 180 does not count
    assert!(classify_frame(&frame, W, H).is_none());
    set_pixel(&mut frame, 10, 10, 181);
    assert!(classify_frame(&frame, W, H).is_some());
}

#[test]
fn brightness_averages_the_channels() {
    let mut frame = dark_frame();
    let i = ((5 * W + 5) * 4) as usize;
    frame[i] = 255;
    frame[i + 1] = 200;
    frame[i + 2] = 100; // mean 185, bright
    frame[i + 3] = 255;
    assert!(classify_frame(&frame, W, H).is_some());
    frame[i + 1] = 50; // mean 135, dark again
    assert!(classify_frame(&frame, W, H).is_none());
}

#[test]
fn open_needs_strictly_more_than_the_pixel_threshold() {
    let at = classify_frame(&frame_with_bright(OPEN_COUNT_THRESHOLD), W, H)
        .expect("bright pixels present");
    assert!(!at.open, "exactly the threshold must still read closed");
    let above = classify_frame(&frame_with_bright(OPEN_COUNT_THRESHOLD + 1), W, H)
        .expect("bright pixels present");
    assert!(above.open);
    let few = classify_frame(&frame_with_bright(40), W, H).expect("bright pixels present");
    assert!(!few.open);
}

#[test]
fn centroid_is_normalized_with_y_up() {
    let mut frame = dark_frame();
    set_pixel(&mut frame, 0, 0, 255);
    let s = classify_frame(&frame, W, H).unwrap();
    assert!((s.centroid.x + 1.0).abs() < 1e-6, "left edge maps to -1, got {}", s.centroid.x);
    assert!((s.centroid.y - 1.0).abs() < 1e-6, "top edge maps to +1, got {}", s.centroid.y);

    let mut frame = dark_frame();
    set_pixel(&mut frame, W - 1, H - 1, 255);
    let s = classify_frame(&frame, W, H).unwrap();
    let expect_x = ((W - 1) as f32 / W as f32) * 2.0 - 1.0;
    let expect_y = -(((H - 1) as f32 / H as f32) * 2.0 - 1.0);
    assert!((s.centroid.x - expect_x).abs() < 1e-5);
    assert!((s.centroid.y - expect_y).abs() < 1e-5);
}

#[test]
fn centroid_averages_symmetric_pixels_to_centre() {
    let mut frame = dark_frame();
    set_pixel(&mut frame, 20, 60, 255);
    set_pixel(&mut frame, 140, 60, 255);
    let s = classify_frame(&frame, W, H).unwrap();
    assert!(s.centroid.x.abs() < 1e-6, "mean x of 20 and 140 is the centre column");
    assert!(s.centroid.y.abs() < 1e-6);
}

#[test]
fn sample_mode_maps_open_to_chaos() {
    let open = classify_frame(&frame_with_bright(OPEN_COUNT_THRESHOLD * 2), W, H).unwrap();
    assert_eq!(open.mode(), SceneMode::Chaos);
    let closed = classify_frame(&frame_with_bright(10), W, H).unwrap();
    assert_eq!(closed.mode(), SceneMode::Formed);
}

#[test]
fn capture_errors_classify_by_dom_exception_name() {
    assert!(matches!(
        CaptureError::from_dom_name("NotAllowedError", "dismissed"),
        CaptureError::PermissionDenied
    ));
    assert!(matches!(
        CaptureError::from_dom_name("SecurityError", ""),
        CaptureError::PermissionDenied
    ));
    assert!(matches!(
        CaptureError::from_dom_name("NotFoundError", ""),
        CaptureError::NoDevice
    ));
    assert!(matches!(
        CaptureError::from_dom_name("OverconstrainedError", "width"),
        CaptureError::NoDevice
    ));
    match CaptureError::from_dom_name("NotSupportedError", "no capture api") {
        CaptureError::Unsupported(detail) => assert_eq!(detail, "no capture api"),
        other => panic!("expected Unsupported, got {other}"),
    }
    let fallback = CaptureError::from_dom_name("AbortError", "hardware in use");
    assert_eq!(
        fallback.to_string(),
        "camera capture failed: AbortError: hardware in use"
    );
}

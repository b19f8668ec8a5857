use surfview::colormap::{height_to_rgb, srgb_to_linear, HEIGHT_MAX, HEIGHT_MIN};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn domain_endpoints() {
    let low = height_to_rgb(HEIGHT_MIN);
    assert!(close(low[0], 0.01) && close(low[1], 0.01) && close(low[2], 0.15));

    let high = height_to_rgb(HEIGHT_MAX);
    assert!(close(high[0], 1.0) && close(high[1], 1.0) && close(high[2], 0.0));
}

#[test]
fn midpoint_is_linear_in_height() {
    let mid = height_to_rgb((HEIGHT_MIN + HEIGHT_MAX) / 2.0);
    assert!(close(mid[0], 0.505) && close(mid[1], 0.505) && close(mid[2], 0.075));
}

#[test]
fn out_of_domain_heights_are_not_clamped() {
    // Accepted upstream behavior: the ratio may leave [0,1].
    let below = height_to_rgb(50.0);
    assert!(below[0] < 0.01 && below[2] > 0.15);

    let above = height_to_rgb(80.0);
    assert!(above[0] > 1.0 && above[2] < 0.0);
}

#[test]
fn srgb_transfer_endpoints_and_monotonicity() {
    assert!(close(srgb_to_linear(0.0), 0.0));
    assert!(close(srgb_to_linear(1.0), 1.0));
    // Below the toe the curve is the linear segment.
    assert!(close(srgb_to_linear(0.04), 0.04 / 12.92));

    let mut prev = srgb_to_linear(0.0);
    for step in 1..=20 {
        let cur = srgb_to_linear(step as f32 / 20.0);
        assert!(cur > prev);
        prev = cur;
    }
}

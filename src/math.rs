/// Maps a difficulty value in `0..=10` onto a range anchored at
/// `min` (0), `mid` (5) and `max` (10).
pub fn diff_rate(diff: f64, min: f64, mid: f64, max: f64) -> f64 {
    if diff > 5.0 {
        return mid + (max - mid) * (diff - 5.0) / 5.0;
    }

    if diff < 5.0 {
        return mid - (mid - min) * (5.0 - diff) / 5.0;
    }

    mid
}

#[test]
pub fn test_diff_rate_anchors() {
    assert_eq!(diff_rate(0.0, 1.5, 2.5, 3.75), 1.5);
    assert_eq!(diff_rate(5.0, 1.5, 2.5, 3.75), 2.5);
    assert_eq!(diff_rate(10.0, 1.5, 2.5, 3.75), 3.75);
}

#[test]
pub fn test_diff_rate_interpolates() {
    assert!((diff_rate(2.5, 1.5, 2.5, 3.75) - 2.0).abs() < 1e-9);
    assert!((diff_rate(7.5, 1.5, 2.5, 3.75) - 3.125).abs() < 1e-9);
}

#[test]
pub fn test_diff_rate_monotonic() {
    let anchors = [(1.5, 2.5, 3.75), (80.0, 80.0, 80.0), (0.0, 10.0, 100.0)];

    for (min, mid, max) in anchors {
        let mut last = f64::MIN;

        for step in 0..=100 {
            let rate = diff_rate(step as f64 / 10.0, min, mid, max);
            assert!(rate >= last, "rate dropped at od {}", step as f64 / 10.0);
            last = rate;
        }
    }
}

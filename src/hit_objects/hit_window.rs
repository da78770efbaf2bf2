use crate::math::diff_rate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindow {
    pub x300: f64,
    pub x100: f64,
    pub x50: f64,
}

impl HitWindow {
    pub fn from_od(od: f64) -> Self {
        HitWindow {
            x300: diff_rate(od, 80.0, 50.0, 20.0),
            x100: diff_rate(od, 140.0, 100.0, 60.0),
            x50: diff_rate(od, 200.0, 150.0, 100.0),
        }
    }

    /// Windows for objects that are never judged on timing, e.g. spinners
    pub fn empty() -> Self {
        Self {
            x300: 0.0,
            x100: 0.0,
            x50: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x50 <= 0.0
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::empty()
    }
}

#[test]
fn test_hit_window_from_od() {
    let window = HitWindow::from_od(5.0);

    assert_eq!(window.x300, 50.0);
    assert_eq!(window.x100, 100.0);
    assert_eq!(window.x50, 150.0);

    let window = HitWindow::from_od(10.0);
    assert_eq!(window.x300, 20.0);
    assert!(!window.is_empty());
    assert!(HitWindow::default().is_empty());
}

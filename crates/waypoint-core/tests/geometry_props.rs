//! Property tests for rectangle and size arithmetic.

use proptest::prelude::*;
use waypoint_core::{ScreenSize, UiRect};

fn rect() -> impl Strategy<Value = UiRect> {
    (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..400.0, 1.0f64..400.0)
        .prop_map(|(x, y, w, h)| UiRect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_is_contained_in_both(a in rect(), b in rect()) {
        if let Some(i) = a.intersection(&b) {
            prop_assert!(!i.is_empty());
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.right() <= a.right() + 1e-9 && i.right() <= b.right() + 1e-9);
            prop_assert!(i.bottom() <= a.bottom() + 1e-9 && i.bottom() <= b.bottom() + 1e-9);
        }
    }

    #[test]
    fn intersection_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn inflated_rect_contains_original_points(r in rect(), pad in 0.0f64..50.0, fx in 0.0f64..1.0, fy in 0.0f64..1.0) {
        let x = r.x + r.width * fx;
        let y = r.y + r.height * fy;
        prop_assume!(r.contains(x, y));
        prop_assert!(r.inflate(pad).contains(x, y));
    }

    #[test]
    fn validated_sizes_are_positive(w in -100.0f64..3000.0, h in -100.0f64..3000.0) {
        match ScreenSize::try_new(w, h) {
            Ok(size) => prop_assert!(size.width > 0.0 && size.height > 0.0),
            Err(_) => prop_assert!(w <= 0.0 || h <= 0.0),
        }
    }

    #[test]
    fn transpose_swaps_orientation(w in 1.0f64..3000.0, h in 1.0f64..3000.0) {
        let size = ScreenSize::new(w, h);
        prop_assume!(w != h);
        prop_assert_ne!(size.is_landscape(), size.transposed().is_landscape());
    }
}

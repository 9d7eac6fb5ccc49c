/// Move the menu cursor by `delta` items, wrapping in both directions.
///
/// `item_count` must be non-zero.
pub fn select_wrapped(selected: usize, delta: i32, item_count: usize) -> usize {
    let n = item_count as i64;
    (selected as i64 + delta as i64).rem_euclid(n) as usize
}

/// Release-edge detector for the knob push switch.
///
/// Reports a click on the one poll where the button goes from pressed to
/// released, so holding the knob down across many polls fires once.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickEdge {
    prev_pressed: bool,
}

impl ClickEdge {
    pub const fn new() -> Self {
        Self {
            prev_pressed: false,
        }
    }

    /// Feed the current button level; returns `true` on a release edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let fired = !pressed && pressed != self.prev_pressed;
        self.prev_pressed = pressed;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_backwards_from_first_item() {
        assert_eq!(select_wrapped(0, -1, 3), 2);
        assert_eq!(select_wrapped(0, -4, 3), 2);
    }

    #[test]
    fn wraps_forwards_past_last_item() {
        assert_eq!(select_wrapped(2, 1, 3), 0);
        assert_eq!(select_wrapped(1, 7, 3), 2);
    }

    #[test]
    fn zero_delta_keeps_selection() {
        assert_eq!(select_wrapped(1, 0, 3), 1);
    }

    #[test]
    fn large_deltas_stay_in_range() {
        for delta in [i32::MIN, -1000, 999, i32::MAX] {
            assert!(select_wrapped(0, delta, 3) < 3);
        }
    }

    #[test]
    fn click_fires_once_on_release() {
        let mut edge = ClickEdge::new();
        assert!(!edge.update(false));
        assert!(!edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(true));
        assert!(edge.update(false));
        assert!(!edge.update(false));
    }

    #[test]
    fn click_never_fires_while_idle() {
        let mut edge = ClickEdge::new();
        for _ in 0..10 {
            assert!(!edge.update(false));
        }
    }
}

//! Easing curves and a polled scalar tween.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Slow start.
    InQuad,
    InOutQuad,
    InOutCubic,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::InQuad => t * t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Progress value driven from 0 to 1 over wall-clock time.
///
/// Nothing runs in the background: callers poll [`Tween::value`] with the
/// current time. Restarting while a run is in flight replaces it.
#[derive(Debug, Clone)]
pub struct Tween {
    started_ms: Option<u64>,
    duration_ms: u64,
    easing: Easing,
}

impl Tween {
    /// A settled tween that reports 1.0 until restarted.
    pub fn settled(duration_ms: u64, easing: Easing) -> Self {
        Self {
            started_ms: None,
            duration_ms,
            easing,
        }
    }

    /// Cancel whatever is running and start over from 0.
    pub fn restart(&mut self, now_ms: u64) {
        self.started_ms = Some(now_ms);
    }

    pub fn value(&self, now_ms: u64) -> f32 {
        let Some(start) = self.started_ms else {
            return 1.0;
        };
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(start) as f32;
        self.easing.apply(elapsed / self.duration_ms as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints_and_midpoint() {
        for e in [Easing::InQuad, Easing::InOutQuad, Easing::InOutCubic] {
            assert_eq!(e.apply(0.0), 0.0, "{e:?}");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-6, "{e:?}");
            assert!((e.apply(2.0) - 1.0).abs() < 1e-6, "{e:?}");
        }
        assert!((Easing::InOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::InOutQuad.apply(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(Easing::InQuad.apply(0.5), 0.25);
    }

    #[test]
    fn in_out_cubic_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = Easing::InOutCubic.apply(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn tween_progresses_and_settles() {
        let mut tw = Tween::settled(1200, Easing::InOutQuad);
        assert_eq!(tw.value(0), 1.0);

        tw.restart(1000);
        assert_eq!(tw.value(1000), 0.0);
        assert!((tw.value(1600) - 0.5).abs() < 1e-6);
        assert!(tw.value(2000) < 1.0);
        assert_eq!(tw.value(2200), 1.0);
        assert_eq!(tw.value(9999), 1.0);
    }

    #[test]
    fn restart_overwrites_in_flight_run() {
        let mut tw = Tween::settled(1000, Easing::InOutQuad);
        tw.restart(0);
        assert!(tw.value(800) > 0.8);
        tw.restart(800);
        assert_eq!(tw.value(800), 0.0);
        assert!((tw.value(1300) - 0.5).abs() < 1e-6);
    }
}

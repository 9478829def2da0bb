//! Constant-velocity linear interpolation
//!
//! A segment runs from the pose current at [`Interpolator::start`] to the
//! goal along a straight 4-D line. Progress is a pure function of elapsed
//! time and feed rate, so a late update just jumps further along the line.
//! There is no acceleration profile and no per-axis speed limit.
//!
//! Only one segment is live. Starting another drops the old goal and begins
//! from wherever the current pose happens to be.

use super::Waypoint;

/// Segments shorter than this finish immediately (mm)
pub const MIN_SEGMENT_LENGTH: f32 = 0.001;

const MS_PER_MINUTE: f32 = 60_000.0;

/// Linear segment interpolator
#[derive(Debug, Clone)]
pub struct Interpolator {
    start: Waypoint,
    goal: Waypoint,
    current: Waypoint,
    /// mm/min
    feed_rate: f32,
    start_ms: u64,
    total_distance: f32,
    ratio: f32,
    finished: bool,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpolator {
    /// Finished, with every pose at the origin
    pub const fn new() -> Self {
        Self {
            start: Waypoint::new(0.0, 0.0, 0.0, 0.0),
            goal: Waypoint::new(0.0, 0.0, 0.0, 0.0),
            current: Waypoint::new(0.0, 0.0, 0.0, 0.0),
            feed_rate: 0.0,
            start_ms: 0,
            total_distance: 0.0,
            ratio: 1.0,
            finished: true,
        }
    }

    /// Begin a segment from the current pose to `goal`
    ///
    /// `feed_rate` is in mm/min and must be positive for the segment to
    /// make progress.
    pub fn start(&mut self, goal: Waypoint, feed_rate: f32, now_ms: u64) {
        self.start = self.current;
        self.goal = goal;
        self.feed_rate = feed_rate;
        self.start_ms = now_ms;
        self.total_distance = self.start.distance(&goal);
        self.ratio = 0.0;
        self.finished = false;

        if self.total_distance < MIN_SEGMENT_LENGTH {
            self.snap_to_goal();
        }
    }

    /// Advance the current pose to `now_ms`
    pub fn update(&mut self, now_ms: u64) {
        if self.finished {
            return;
        }

        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        let traveled = self.feed_rate / MS_PER_MINUTE * elapsed;

        if traveled >= self.total_distance {
            self.snap_to_goal();
        } else {
            self.ratio = traveled / self.total_distance;
            self.current = self.start.lerp(&self.goal, self.ratio);
        }
    }

    /// Overwrite the current pose and drop any live segment
    pub fn set_current(&mut self, pose: Waypoint) {
        self.current = pose;
        self.goal = pose;
        self.ratio = 1.0;
        self.finished = true;
    }

    fn snap_to_goal(&mut self) {
        self.current = self.goal;
        self.ratio = 1.0;
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> Waypoint {
        self.current
    }

    pub fn start_pose(&self) -> Waypoint {
        self.start
    }

    pub fn goal(&self) -> Waypoint {
        self.goal
    }

    pub fn feed_rate(&self) -> f32 {
        self.feed_rate
    }

    /// Fraction of the segment covered so far, 0 to 1
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn total_distance(&self) -> f32 {
        self.total_distance
    }

    /// Time the segment takes at its feed rate (ms)
    pub fn duration_ms(&self) -> f32 {
        if self.feed_rate <= 0.0 {
            return f32::INFINITY;
        }
        self.total_distance * MS_PER_MINUTE / self.feed_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_finished_at_origin() {
        let interp = Interpolator::new();
        assert!(interp.is_finished());
        assert_eq!(interp.current(), Waypoint::default());
    }

    #[test]
    fn test_linear_progress() {
        let mut interp = Interpolator::new();
        // 100 mm at 6000 mm/min = 1000 ms
        interp.start(Waypoint::new(100.0, 0.0, 0.0, 0.0), 6000.0, 500);
        assert!(!interp.is_finished());
        assert!((interp.duration_ms() - 1000.0).abs() < 1e-3);

        interp.update(1000);
        assert!((interp.ratio() - 0.5).abs() < 1e-6);
        assert!((interp.current().x - 50.0).abs() < 1e-4);

        interp.update(1499);
        assert!(!interp.is_finished());

        interp.update(1500);
        assert!(interp.is_finished());
        assert_eq!(interp.current(), interp.goal());
    }

    #[test]
    fn test_zero_length_segment_finishes_immediately() {
        let mut interp = Interpolator::new();
        interp.set_current(Waypoint::new(5.0, 5.0, 5.0, 1.0));
        interp.start(Waypoint::new(5.0, 5.0, 5.0005, 1.0), 1000.0, 0);
        assert!(interp.is_finished());
        assert_eq!(interp.current().z, 5.0005);
    }

    #[test]
    fn test_new_segment_starts_from_current_pose() {
        let mut interp = Interpolator::new();
        interp.start(Waypoint::new(0.0, 60.0, 0.0, 0.0), 600.0, 0);
        interp.update(3000); // 30 mm in
        let mid = interp.current();

        interp.start(Waypoint::new(0.0, 0.0, 0.0, 0.0), 600.0, 3000);
        assert_eq!(interp.start_pose(), mid);
        assert!((interp.total_distance() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_slider_only_move() {
        let mut interp = Interpolator::new();
        interp.start(Waypoint::new(0.0, 0.0, 0.0, 10.0), 600.0, 0);
        interp.update(500); // 5 mm
        let c = interp.current();
        assert_eq!((c.x, c.y, c.z), (0.0, 0.0, 0.0));
        assert!((c.e - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_current_cancels_segment() {
        let mut interp = Interpolator::new();
        interp.start(Waypoint::new(100.0, 0.0, 0.0, 0.0), 100.0, 0);
        interp.set_current(Waypoint::new(1.0, 2.0, 3.0, 4.0));
        assert!(interp.is_finished());
        interp.update(1_000_000);
        assert_eq!(interp.current(), Waypoint::new(1.0, 2.0, 3.0, 4.0));
    }

    fn waypoint() -> impl Strategy<Value = Waypoint> {
        (-300f32..300.0, -300f32..300.0, -300f32..300.0, -50f32..50.0)
            .prop_map(|(x, y, z, e)| Waypoint::new(x, y, z, e))
    }

    proptest! {
        #[test]
        fn prop_ratio_is_monotonic(
            from in waypoint(),
            to in waypoint(),
            feed in 100f32..20_000.0,
            steps in prop::collection::vec(1u64..50, 1..64),
        ) {
            let mut interp = Interpolator::new();
            interp.set_current(from);
            interp.start(to, feed, 0);

            let mut now = 0u64;
            let mut last_ratio = interp.ratio();
            for dt in steps {
                now += dt;
                interp.update(now);
                prop_assert!(interp.ratio() >= last_ratio);
                last_ratio = interp.ratio();
            }
        }

        #[test]
        fn prop_goal_exact_after_duration(
            from in waypoint(),
            to in waypoint(),
            feed in 100f32..20_000.0,
            extra in 0u64..1000,
        ) {
            let mut interp = Interpolator::new();
            interp.set_current(from);
            interp.start(to, feed, 0);

            let done_at = interp.duration_ms() as u64 + 2 + extra;
            interp.update(done_at);
            prop_assert!(interp.is_finished());
            prop_assert_eq!(interp.current(), to);
        }
    }
}

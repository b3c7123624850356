use taffy::prelude::{auto, length};
use taffy::style::Dimension;
use unfurl_core::{AnimatedValue, AnimationSpec, LineLayout, Size};
use web_time::Instant;

/// Caller-owned settings for one truncated text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TruncationConfig {
    /// Visible lines while collapsed, at least 1.
    pub length: usize,
    /// `true` collapses, `false` expands.
    pub enabled: bool,
    pub animation: AnimationSpec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Collapsed,
    Transitioning,
    Expanded,
}

fn target_for(enabled: bool) -> f32 {
    if enabled { 0.0 } else { 1.0 }
}

/// Owns the expansion progress and the two measured sizes.
///
/// The host calls [`measure`](Self::measure) on every layout pass,
/// [`on_enabled_changed`](Self::on_enabled_changed) when the flag flips and
/// [`tick`](Self::tick) once per frame.
#[derive(Clone, Debug)]
pub struct LayoutCoordinator {
    config: TruncationConfig,
    progress: AnimatedValue<f32>,
    collapsed_size: Size,
    full_size: Size,
    appeared: bool,
}

impl LayoutCoordinator {
    pub fn new(config: TruncationConfig) -> Self {
        Self {
            progress: AnimatedValue::new(target_for(config.enabled), config.animation),
            config,
            collapsed_size: Size::ZERO,
            full_size: Size::ZERO,
            appeared: false,
        }
    }

    pub fn config(&self) -> &TruncationConfig {
        &self.config
    }

    /// Set the starting progress without animating. Only the first call has
    /// an effect.
    pub fn initialize(&mut self) {
        if self.appeared {
            return;
        }
        self.appeared = true;
        self.progress.snap_to(target_for(self.config.enabled));
        log::debug!(
            "truncation appeared {:?} (length={})",
            self.phase(),
            self.config.length
        );
    }

    pub fn on_enabled_changed(&mut self, enabled: bool) {
        self.on_enabled_changed_at(enabled, unfurl_core::animation::now());
    }

    pub fn on_enabled_changed_at(&mut self, enabled: bool, at: Instant) {
        if enabled == self.config.enabled {
            return;
        }
        self.config.enabled = enabled;
        if !self.appeared {
            // Nothing on screen yet; appearing will pick up the new flag.
            self.progress.snap_to(target_for(enabled));
            return;
        }
        log::debug!(
            "retargeting progress {:.3} -> {}",
            self.progress(),
            target_for(enabled)
        );
        self.progress.set_spec(self.config.animation);
        self.progress.set_target_at(target_for(enabled), at);
    }

    pub fn set_animation(&mut self, animation: AnimationSpec) {
        self.config.animation = animation;
    }

    /// Advance the transition; returns `true` while it is still running.
    pub fn tick(&mut self, at: Instant) -> bool {
        self.progress.update_at(at)
    }

    pub fn is_animating(&self) -> bool {
        self.progress.is_animating()
    }

    /// Current progress, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        let p = *self.progress.get();
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }

    pub fn phase(&self) -> Phase {
        // Raw sample: an overshooting curve is still transitioning.
        let p = *self.progress.get();
        if p == 0.0 {
            Phase::Collapsed
        } else if p == 1.0 {
            Phase::Expanded
        } else {
            Phase::Transitioning
        }
    }

    /// Store the collapsed and full sizes of `layout`.
    pub fn measure(&mut self, layout: &LineLayout) -> (Size, Size) {
        let collapsed = layout.size_capped(self.config.length);
        let full = layout.size();
        self.set_collapsed_size(collapsed);
        self.set_full_size(full);
        log::trace!(
            "measured {} lines: collapsed {:?}, full {:?}",
            layout.len(),
            collapsed,
            full
        );
        (self.collapsed_size, self.full_size)
    }

    pub fn set_collapsed_size(&mut self, size: Size) {
        self.collapsed_size = size.sanitized();
    }

    pub fn set_full_size(&mut self, size: Size) {
        self.full_size = size.sanitized();
    }

    pub fn collapsed_size(&self) -> Size {
        self.collapsed_size
    }

    pub fn full_size(&self) -> Size {
        self.full_size
    }

    /// Container height: pinned to the full height once fully expanded,
    /// intrinsic otherwise.
    pub fn resolved_height(&self) -> Dimension {
        if self.phase() == Phase::Expanded {
            length(self.full_size.height)
        } else {
            auto()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unfurl_core::{Easing, FixedAdvanceShaper, TextShaper};
    use web_time::Duration;

    fn config(enabled: bool) -> TruncationConfig {
        TruncationConfig {
            length: 2,
            enabled,
            animation: AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
        }
    }

    #[test]
    fn test_initialize_sets_progress_without_animation() {
        let mut c = LayoutCoordinator::new(config(true));
        c.initialize();
        assert_eq!(c.progress(), 0.0);
        assert_eq!(c.phase(), Phase::Collapsed);
        assert!(!c.is_animating());

        let mut c = LayoutCoordinator::new(config(false));
        c.initialize();
        assert_eq!(c.progress(), 1.0);
        assert_eq!(c.phase(), Phase::Expanded);
        assert!(!c.is_animating());
    }

    #[test]
    fn test_expand_then_collapse() {
        let t0 = Instant::now();
        let mut c = LayoutCoordinator::new(config(true));
        c.initialize();

        c.on_enabled_changed_at(false, t0);
        assert!(c.tick(t0 + Duration::from_millis(50)));
        assert_eq!(c.phase(), Phase::Transitioning);
        assert!((c.progress() - 0.5).abs() < 1e-3);

        assert!(!c.tick(t0 + Duration::from_millis(100)));
        assert_eq!(c.phase(), Phase::Expanded);

        let t1 = t0 + Duration::from_millis(200);
        c.on_enabled_changed_at(true, t1);
        c.tick(t1 + Duration::from_millis(100));
        assert_eq!(c.phase(), Phase::Collapsed);
    }

    #[test]
    fn test_retarget_mid_flight_has_no_jump() {
        let t0 = Instant::now();
        let mut c = LayoutCoordinator::new(config(true));
        c.initialize();
        c.on_enabled_changed_at(false, t0);
        let t1 = t0 + Duration::from_millis(30);
        c.tick(t1);
        let before = c.progress();

        c.on_enabled_changed_at(true, t1);
        c.tick(t1 + Duration::from_millis(1));
        let after = c.progress();
        assert!((after - before).abs() < 0.02, "{before} -> {after}");
        assert!(after <= before);
    }

    #[test]
    fn test_unchanged_flag_is_noop() {
        let t0 = Instant::now();
        let mut c = LayoutCoordinator::new(config(true));
        c.initialize();
        c.on_enabled_changed_at(true, t0);
        assert!(!c.is_animating());
    }

    #[test]
    fn test_change_before_appear_snaps() {
        let mut c = LayoutCoordinator::new(config(true));
        c.on_enabled_changed_at(false, Instant::now());
        c.initialize();
        assert_eq!(c.progress(), 1.0);
        assert!(!c.is_animating());
    }

    #[test]
    fn test_measure_and_resolved_height() {
        let shaper = FixedAdvanceShaper {
            advance: 0.5,
            line_height: 1.5,
            ascent: 0.75,
        };
        let layout = shaper.shape("one\ntwo\nthree\nfour", 10.0, None);

        let mut c = LayoutCoordinator::new(config(true));
        c.initialize();
        let (collapsed, full) = c.measure(&layout);
        assert_eq!(collapsed, Size::new(15.0, 30.0));
        assert_eq!(full, Size::new(25.0, 60.0));
        let natural: Dimension = auto();
        assert_eq!(c.resolved_height(), natural);

        let t0 = Instant::now();
        c.on_enabled_changed_at(false, t0);
        c.tick(t0 + Duration::from_millis(50));
        assert_eq!(c.resolved_height(), natural);

        c.tick(t0 + Duration::from_millis(100));
        let pinned: Dimension = length(60.0);
        assert_eq!(c.resolved_height(), pinned);
    }

    #[test]
    fn test_degenerate_sizes_become_zero() {
        let mut c = LayoutCoordinator::new(config(true));
        c.set_full_size(Size::new(f32::NAN, -4.0));
        assert_eq!(c.full_size(), Size::ZERO);
        assert_eq!(c.measure(&LineLayout::default()), (Size::ZERO, Size::ZERO));
    }
}

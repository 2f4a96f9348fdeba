//! Animation driver for the drawer panel
//!
//! Three independent scalars drive the drawer visuals:
//!
//! - panel offset: `0.0` is fully open, the panel height is fully closed
//! - backdrop opacity: `0.0` closed, the configured maximum when open
//! - drag offset: live gesture displacement, `0.0` outside a drag
//!
//! Each scalar is an [`AnimationHandle`] created once and reused for the
//! lifetime of the controller. Time only moves when the owner calls
//! `advance`, so every transition is deterministic and testable without a
//! real clock.
//!
//! [`AnimationDriver`] groups the scalars into transitions (open, close,
//! snap-back). Starting a transition cancels the one in flight; a
//! cancelled transition never reports completion.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest step used when integrating spring physics
const SPRING_STEP: Duration = Duration::from_millis(4);

// =============================================================================
// Easing & Spring Configuration
// =============================================================================

/// Timing curve for duration-based animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start and end (cubic)
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `0..=1` onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Spring physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    /// Spring stiffness
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Mass of the animated object
    pub mass: f32,
    /// Distance from target considered at rest
    pub rest_displacement: f32,
    /// Speed considered at rest (units per second)
    pub rest_speed: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 180.0,
            damping: 22.0,
            mass: 1.0,
            rest_displacement: 0.5,
            rest_speed: 2.0,
        }
    }
}

/// How an animated value moves towards its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationConfig {
    /// Fixed duration along an easing curve
    Timing {
        /// Total duration
        duration: Duration,
        /// Timing curve
        easing: Easing,
    },
    /// Physics-based, no fixed duration
    Spring(SpringConfig),
}

impl AnimationConfig {
    /// Timing animation with the given duration and easing
    pub fn timing(duration: Duration, easing: Easing) -> Self {
        AnimationConfig::Timing { duration, easing }
    }
}

// =============================================================================
// Animation Handle
// =============================================================================

/// Identifier of one `animate_to` call on one handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug, Clone)]
struct ActiveAnimation {
    id: AnimationId,
    from: f32,
    to: f32,
    config: AnimationConfig,
    elapsed: Duration,
    velocity: f32,
}

/// A reusable animated scalar
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    value: f32,
    active: Option<ActiveAnimation>,
    next_id: u64,
}

impl AnimationHandle {
    /// Create a handle resting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            active: None,
            next_id: 0,
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the running animation, if any
    pub fn target(&self) -> Option<f32> {
        self.active.as_ref().map(|a| a.to)
    }

    /// Whether an animation is running
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Start animating from the current value to `target`
    ///
    /// Any running animation is cancelled first and will never complete.
    pub fn animate_to(&mut self, target: f32, config: AnimationConfig) -> AnimationId {
        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.active = Some(ActiveAnimation {
            id,
            from: self.value,
            to: target,
            config,
            elapsed: Duration::ZERO,
            velocity: 0.0,
        });
        id
    }

    /// Stop the running animation where it is
    pub fn cancel(&mut self) -> Option<AnimationId> {
        self.active.take().map(|a| a.id)
    }

    /// Jump to `value`, cancelling any running animation
    pub fn set_value(&mut self, value: f32) {
        self.active = None;
        self.value = value;
    }

    /// Move time forward by `dt`
    ///
    /// Returns the id of the animation that finished during this step.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationId> {
        let active = self.active.as_mut()?;
        active.elapsed += dt;

        let finished = match active.config {
            AnimationConfig::Timing { duration, easing } => {
                if duration.is_zero() || active.elapsed >= duration {
                    true
                } else {
                    let t = active.elapsed.as_secs_f32() / duration.as_secs_f32();
                    self.value = active.from + (active.to - active.from) * easing.apply(t);
                    false
                }
            }
            AnimationConfig::Spring(spring) => {
                let mut remaining = dt;
                let mut position = self.value;
                while !remaining.is_zero() {
                    let step = remaining.min(SPRING_STEP);
                    remaining -= step;
                    let h = step.as_secs_f32();
                    let force = -spring.stiffness * (position - active.to)
                        - spring.damping * active.velocity;
                    active.velocity += force / spring.mass * h;
                    position += active.velocity * h;
                }
                self.value = position;
                (position - active.to).abs() <= spring.rest_displacement
                    && active.velocity.abs() <= spring.rest_speed
            }
        };

        if finished {
            self.value = active.to;
            self.active.take().map(|a| a.id)
        } else {
            None
        }
    }
}

// =============================================================================
// Animation Driver
// =============================================================================

/// Kind of grouped transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    /// Panel slides up, backdrop fades in
    Open,
    /// Panel slides down, backdrop fades out
    Close,
    /// Panel springs back to open after a cancelled drag
    SnapBack,
}

/// Identifier of a started transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

/// A transition that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionComplete {
    /// Which transition
    pub id: TransitionId,
    /// What it did
    pub kind: TransitionKind,
}

#[derive(Debug, Clone)]
struct RunningTransition {
    id: TransitionId,
    kind: TransitionKind,
    panel: Option<AnimationId>,
    backdrop: Option<AnimationId>,
}

impl RunningTransition {
    fn is_done(&self) -> bool {
        self.panel.is_none() && self.backdrop.is_none()
    }
}

/// Timing contract for the drawer transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverTiming {
    /// Open duration
    pub open: Duration,
    /// Close duration
    pub close: Duration,
    /// Curve for open and close
    pub easing: Easing,
    /// Snap-back spring
    pub spring: SpringConfig,
    /// Backdrop opacity when open
    pub max_backdrop_opacity: f32,
}

/// Owner of the three drawer scalars
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    panel_offset: AnimationHandle,
    backdrop_opacity: AnimationHandle,
    drag_offset: AnimationHandle,
    panel_height: f32,
    timing: DriverTiming,
    running: Option<RunningTransition>,
    next_transition: u64,
}

impl AnimationDriver {
    /// Create a driver resting in the closed position
    pub fn new(panel_height: f32, timing: DriverTiming) -> Self {
        Self {
            panel_offset: AnimationHandle::new(panel_height),
            backdrop_opacity: AnimationHandle::new(0.0),
            drag_offset: AnimationHandle::new(0.0),
            panel_height,
            timing,
            running: None,
            next_transition: 0,
        }
    }

    /// Panel offset (`0.0` open, panel height closed)
    pub fn panel_offset(&self) -> f32 {
        self.panel_offset.value()
    }

    /// Backdrop opacity
    pub fn backdrop_opacity(&self) -> f32 {
        self.backdrop_opacity.value()
    }

    /// Live drag offset
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset.value()
    }

    /// Where the panel is drawn: panel offset plus drag, capped at closed
    pub fn visual_offset(&self) -> f32 {
        (self.panel_offset.value() + self.drag_offset.value()).min(self.panel_height)
    }

    /// Panel height used as the closed offset
    pub fn panel_height(&self) -> f32 {
        self.panel_height
    }

    /// Kind of the running transition
    pub fn running(&self) -> Option<TransitionKind> {
        self.running.as_ref().map(|r| r.kind)
    }

    /// Whether any scalar is moving
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
            || self.panel_offset.is_animating()
            || self.backdrop_opacity.is_animating()
    }

    /// Start a transition, cancelling the one in flight
    pub fn start(&mut self, kind: TransitionKind) -> TransitionId {
        self.cancel();
        self.next_transition += 1;
        let id = TransitionId(self.next_transition);

        let timing = self.timing;
        let (panel, backdrop) = match kind {
            TransitionKind::Open => {
                let config = AnimationConfig::timing(timing.open, timing.easing);
                (
                    self.panel_offset.animate_to(0.0, config),
                    Some(
                        self.backdrop_opacity
                            .animate_to(timing.max_backdrop_opacity, config),
                    ),
                )
            }
            TransitionKind::Close => {
                let config = AnimationConfig::timing(timing.close, timing.easing);
                (
                    self.panel_offset.animate_to(self.panel_height, config),
                    Some(self.backdrop_opacity.animate_to(0.0, config)),
                )
            }
            TransitionKind::SnapBack => {
                self.backdrop_opacity.set_value(timing.max_backdrop_opacity);
                (
                    self.panel_offset
                        .animate_to(0.0, AnimationConfig::Spring(timing.spring)),
                    None,
                )
            }
        };

        self.running = Some(RunningTransition {
            id,
            kind,
            panel: Some(panel),
            backdrop,
        });
        id
    }

    /// Cancel the running transition, leaving values where they are
    pub fn cancel(&mut self) -> Option<TransitionId> {
        self.panel_offset.cancel();
        self.backdrop_opacity.cancel();
        self.running.take().map(|r| r.id)
    }

    /// Cancel everything and rest at the open or closed position
    pub fn snap(&mut self, open: bool) {
        self.cancel();
        self.drag_offset.set_value(0.0);
        if open {
            self.panel_offset.set_value(0.0);
            self.backdrop_opacity
                .set_value(self.timing.max_backdrop_opacity);
        } else {
            self.panel_offset.set_value(self.panel_height);
            self.backdrop_opacity.set_value(0.0);
        }
    }

    /// Track a gesture displacement
    pub fn set_drag(&mut self, offset: f32) {
        self.drag_offset.set_value(offset);
    }

    /// Fold the drag offset into the panel offset and zero the drag
    ///
    /// The drawn position is unchanged, so a transition started afterwards
    /// continues from where the finger left the panel.
    pub fn absorb_drag(&mut self) {
        let visual = self.visual_offset();
        self.cancel();
        self.drag_offset.set_value(0.0);
        self.panel_offset.set_value(visual);
    }

    /// Change the panel height
    ///
    /// A resting closed panel moves to the new closed offset; a running
    /// close transition is retargeted.
    pub fn set_panel_height(&mut self, height: f32) {
        let was_closed = !self.is_animating()
            && (self.panel_offset.value() - self.panel_height).abs() < f32::EPSILON;
        self.panel_height = height;
        if was_closed {
            self.panel_offset.set_value(height);
        } else if self.running() == Some(TransitionKind::Close) {
            self.start(TransitionKind::Close);
        }
    }

    /// Move time forward
    ///
    /// Returns the transition that completed during this step. Completions
    /// of cancelled transitions are never reported.
    pub fn advance(&mut self, dt: Duration) -> Option<TransitionComplete> {
        let panel_done = self.panel_offset.advance(dt);
        let backdrop_done = self.backdrop_opacity.advance(dt);

        let running = self.running.as_mut()?;
        if panel_done.is_some() && panel_done == running.panel {
            running.panel = None;
        }
        if backdrop_done.is_some() && backdrop_done == running.backdrop {
            running.backdrop = None;
        }

        if running.is_done() {
            let done = self.running.take()?;
            Some(TransitionComplete {
                id: done.id,
                kind: done.kind,
            })
        } else {
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn timing() -> DriverTiming {
        DriverTiming {
            open: Duration::from_millis(300),
            close: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            spring: SpringConfig::default(),
            max_backdrop_opacity: 0.5,
        }
    }

    fn run_until_complete(driver: &mut AnimationDriver) -> (TransitionComplete, Duration) {
        let mut elapsed = Duration::ZERO;
        for _ in 0..1000 {
            elapsed += FRAME;
            if let Some(done) = driver.advance(FRAME) {
                return (done, elapsed);
            }
        }
        panic!("transition did not complete");
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::EaseInOut.apply(0.1) < 0.1);
        assert!(Easing::EaseInOut.apply(0.9) > 0.9);
    }

    #[test]
    fn test_timing_animation_lands_on_target() {
        let mut handle = AnimationHandle::new(0.0);
        let id = handle.animate_to(
            100.0,
            AnimationConfig::timing(Duration::from_millis(100), Easing::Linear),
        );

        assert_eq!(handle.advance(Duration::from_millis(50)), None);
        assert!((handle.value() - 50.0).abs() < 1e-3);

        assert_eq!(handle.advance(Duration::from_millis(60)), Some(id));
        assert_eq!(handle.value(), 100.0);
        assert!(!handle.is_animating());
    }

    #[test]
    fn test_superseded_animation_never_completes() {
        let mut handle = AnimationHandle::new(0.0);
        let first = handle.animate_to(
            100.0,
            AnimationConfig::timing(Duration::from_millis(100), Easing::Linear),
        );
        handle.advance(Duration::from_millis(50));

        let second = handle.animate_to(
            0.0,
            AnimationConfig::timing(Duration::from_millis(100), Easing::Linear),
        );
        assert_ne!(first, second);

        let mut completed = Vec::new();
        for _ in 0..20 {
            if let Some(id) = handle.advance(Duration::from_millis(10)) {
                completed.push(id);
            }
        }
        assert_eq!(completed, vec![second]);
        assert_eq!(handle.value(), 0.0);
    }

    #[test]
    fn test_spring_settles() {
        let mut handle = AnimationHandle::new(80.0);
        let id = handle.animate_to(0.0, AnimationConfig::Spring(SpringConfig::default()));

        let mut done = None;
        for _ in 0..500 {
            if let Some(finished) = handle.advance(FRAME) {
                done = Some(finished);
                break;
            }
        }
        assert_eq!(done, Some(id));
        assert_eq!(handle.value(), 0.0);
    }

    #[test]
    fn test_driver_open_then_close() {
        let mut driver = AnimationDriver::new(400.0, timing());
        assert_eq!(driver.panel_offset(), 400.0);
        assert_eq!(driver.backdrop_opacity(), 0.0);

        let open = driver.start(TransitionKind::Open);
        let (done, elapsed) = run_until_complete(&mut driver);
        assert_eq!(done.id, open);
        assert_eq!(done.kind, TransitionKind::Open);
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(300) + FRAME * 2);
        assert_eq!(driver.panel_offset(), 0.0);
        assert_eq!(driver.backdrop_opacity(), 0.5);

        driver.start(TransitionKind::Close);
        let (done, _) = run_until_complete(&mut driver);
        assert_eq!(done.kind, TransitionKind::Close);
        assert_eq!(driver.panel_offset(), 400.0);
        assert_eq!(driver.backdrop_opacity(), 0.0);
    }

    #[test]
    fn test_driver_supersede_reports_only_latest() {
        let mut driver = AnimationDriver::new(400.0, timing());
        driver.start(TransitionKind::Open);
        driver.advance(FRAME * 5);

        let close = driver.start(TransitionKind::Close);
        let (done, _) = run_until_complete(&mut driver);
        assert_eq!(done.id, close);
        assert_eq!(driver.advance(FRAME), None);
        assert!(!driver.is_animating());
    }

    #[test]
    fn test_absorb_drag_keeps_visual_position() {
        let mut driver = AnimationDriver::new(400.0, timing());
        driver.snap(true);
        driver.set_drag(120.0);
        assert_eq!(driver.visual_offset(), 120.0);

        driver.absorb_drag();
        assert_eq!(driver.drag_offset(), 0.0);
        assert_eq!(driver.panel_offset(), 120.0);
        assert_eq!(driver.visual_offset(), 120.0);
    }

    #[test]
    fn test_visual_offset_capped_at_height() {
        let mut driver = AnimationDriver::new(400.0, timing());
        driver.snap(true);
        driver.set_drag(900.0);
        assert_eq!(driver.visual_offset(), 400.0);
    }

    #[test]
    fn test_snap_back_uses_spring() {
        let mut driver = AnimationDriver::new(400.0, timing());
        driver.snap(true);
        driver.set_drag(50.0);
        driver.absorb_drag();

        driver.start(TransitionKind::SnapBack);
        let (done, _) = run_until_complete(&mut driver);
        assert_eq!(done.kind, TransitionKind::SnapBack);
        assert_eq!(driver.panel_offset(), 0.0);
        assert_eq!(driver.backdrop_opacity(), 0.5);
    }

    #[test]
    fn test_panel_height_change_moves_closed_panel() {
        let mut driver = AnimationDriver::new(400.0, timing());
        driver.set_panel_height(600.0);
        assert_eq!(driver.panel_offset(), 600.0);

        driver.snap(true);
        driver.set_panel_height(500.0);
        assert_eq!(driver.panel_offset(), 0.0);
    }
}

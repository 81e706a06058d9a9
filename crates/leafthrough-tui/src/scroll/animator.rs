//! Viewport scroll animation.
//!
//! One animator per viewport. Commands either jump instantly or start
//! a timed glide toward a target offset; `update` is called every
//! frame while a glide is in flight and reports the interpolated
//! offset. Relative scrolls arriving between frames are batched and
//! folded into one retarget on the next update.

use std::time::{Duration, Instant};

use leafthrough_core::ScrollConfig;

use super::easing::{Easing, EasingExt};

/// An in-flight glide from one offset to another
#[derive(Debug, Clone)]
struct Glide {
    started: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: Easing,
}

impl Glide {
    fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = self.started.elapsed().as_secs_f64() / self.duration.as_secs_f64();
        ratio.clamp(0.0, 1.0)
    }

    fn done(&self) -> bool {
        self.started.elapsed() >= self.duration
    }
}

/// Scroll state for one viewport
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    glide: Option<Glide>,
    config: ScrollConfig,
    /// Offset currently on screen
    offset: u16,
    /// Relative scroll accumulated since the last update
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            glide: None,
            config,
            offset: 0,
            pending_delta: 0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Offset currently on screen
    #[inline]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Where the viewport will end up once in-flight work settles
    pub fn target(&self) -> u16 {
        self.glide.as_ref().map(|g| g.to).unwrap_or(self.offset)
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.glide.is_some()
    }

    /// True while there is a glide or batched delta to process. Drives
    /// the switch to the animation frame rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.glide.is_some() || self.pending_delta != 0
    }

    /// Frame interval for the configured animation rate
    pub fn frame_interval(&self) -> Duration {
        if self.config.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(1000 / self.config.animation_fps as u64)
        }
    }

    /// Lines moved per scroll step
    pub fn step_lines(&self) -> i32 {
        self.config.scroll_lines.max(1) as i32
    }

    /// Set the offset immediately, dropping any in-flight work
    pub fn jump_to(&mut self, offset: u16) {
        self.glide = None;
        self.pending_delta = 0;
        self.offset = offset;
    }

    /// Start a glide toward `target`, or jump if animation is off
    pub fn glide_to(&mut self, target: u16, max_offset: u16) {
        let target = target.min(max_offset);
        self.pending_delta = 0;

        if !self.is_smooth() {
            self.jump_to(target);
            return;
        }
        if self.offset == target {
            self.glide = None;
            return;
        }
        self.start_glide(target);
    }

    /// Glide the viewport back to the very top
    pub fn glide_to_top(&mut self) {
        self.pending_delta = 0;

        if !self.is_smooth() {
            self.jump_to(0);
            return;
        }
        if self.offset == 0 {
            self.glide = None;
            return;
        }
        self.start_glide(0);
    }

    /// Scroll by a delta (positive = down). Deltas batch until the
    /// next update so rapid input folds into one retarget.
    pub fn scroll_by(&mut self, delta: i32, max_offset: u16) {
        if !self.is_smooth() {
            let next = (self.offset as i32 + delta).clamp(0, max_offset as i32) as u16;
            self.jump_to(next);
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance in-flight work and return the offset to draw
    pub fn update(&mut self, max_offset: u16) -> u16 {
        if self.pending_delta != 0 {
            let retarget =
                (self.target() as i32 + self.pending_delta).clamp(0, max_offset as i32) as u16;
            self.pending_delta = 0;

            if retarget != self.offset {
                self.start_glide(retarget);
            } else {
                self.glide = None;
            }
        }

        if let Some(glide) = &self.glide {
            if glide.done() {
                self.offset = glide.to.min(max_offset);
                self.glide = None;
            } else {
                let eased = glide.easing.apply(glide.progress());
                self.offset = lerp_u16(glide.from, glide.to, eased).min(max_offset);
            }
        } else {
            // The viewport may have shrunk under us
            self.offset = self.offset.min(max_offset);
        }

        self.offset
    }

    /// Stop at the current offset, dropping in-flight work
    pub fn cancel(&mut self) {
        self.glide = None;
        self.pending_delta = 0;
    }

    fn is_smooth(&self) -> bool {
        self.config.smooth_enabled && self.config.animation_duration_ms > 0
    }

    fn start_glide(&mut self, to: u16) {
        self.glide = Some(Glide {
            started: Instant::now(),
            from: self.offset,
            to,
            duration: Duration::from_millis(self.config.animation_duration_ms),
            easing: self.config.easing,
        });
    }
}

#[inline]
fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u16
}

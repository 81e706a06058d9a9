mod animator;
mod easing;

pub use animator::ScrollAnimator;
pub use easing::{Easing, EasingExt};

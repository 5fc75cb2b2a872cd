//! Keyframe animation for secondary motion.
//!
//! Animators produce a visual-only pose offset (melee swings, reloads, death
//! sequences) on top of an entity's transform. They never feed back into
//! gameplay: combat timing runs on absolute deadlines in the AI crate.

pub mod animator;
pub mod rig;

pub use animator::{Animator, Keyframe};
pub use rig::AnimationRig;

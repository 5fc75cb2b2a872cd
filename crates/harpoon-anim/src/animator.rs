//! Keyframe timeline engine.
//!
//! An animator owns an ordered list of keyframes. Index 0 is the rest pose:
//! it is never played, only used as the interpolation source of segment 1.
//! The current index always stays in `[1, len - 1]`, and the previous
//! keyframe is always the one before it.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use harpoon_core::types::Pose;

/// One animation segment: move from the previous target to `target` over
/// `duration` seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    pub target: Pose,
    pub duration: f64,
    /// Time spent in this segment so far.
    pub runtime: f64,
    /// Interpolated pose for the current instant.
    pub offset: Pose,
}

impl Keyframe {
    pub fn new(target: Pose, duration: f64) -> Self {
        Self {
            target,
            duration,
            runtime: 0.0,
            offset: Pose::IDENTITY,
        }
    }

    /// Keyframe from translation, scale and Euler rotation (degrees).
    pub fn from_parts(translation: [f32; 3], scale: [f32; 3], rotation: [f32; 3], duration: f64) -> Self {
        Self::new(
            Pose {
                translation: Vec3::from(translation),
                scale: Vec3::from(scale),
                rotation: Vec3::from(rotation),
            },
            duration,
        )
    }

    fn rest() -> Self {
        Self::new(Pose::IDENTITY, 0.0)
    }

    /// Advance by `dt` and interpolate from `from`. Returns true once the
    /// segment is complete, with the offset snapped to the target.
    fn progress(&mut self, from: &Pose, dt: f64) -> bool {
        self.runtime += dt;
        if self.runtime >= self.duration {
            self.offset = self.target;
            return true;
        }
        let t = (self.runtime / self.duration).clamp(0.0, 1.0);
        self.offset = from.lerp(&self.target, t as f32);
        false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator {
    pub label: String,
    keyframes: Vec<Keyframe>,
    current: usize,
    running: bool,
    stop_once_finished: bool,
    keep_pos_after_end: bool,
    run_until_end: bool,
}

impl Animator {
    /// Build an animator from its played keyframes; the rest pose is
    /// inserted in front. Starts stopped, looping when started.
    pub fn new(label: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        let mut all = Vec::with_capacity(keyframes.len() + 1);
        all.push(Keyframe::rest());
        all.extend(keyframes);
        Self {
            label: label.into(),
            keyframes: all,
            current: 1,
            running: false,
            stop_once_finished: false,
            keep_pos_after_end: false,
            run_until_end: false,
        }
    }

    pub fn with_stop_once_finished(mut self, stop: bool) -> Self {
        self.stop_once_finished = stop;
        self
    }

    pub fn with_keep_pos_after_end(mut self, keep: bool) -> Self {
        self.keep_pos_after_end = keep;
        self
    }

    /// Start playing right away (looping tracks like running or floating).
    pub fn playing(mut self) -> Self {
        self.running = true;
        self
    }

    /// Resume playback from wherever the timeline was left.
    pub fn start_animation(&mut self) {
        self.running = true;
    }

    pub fn stop_animation(&mut self) {
        self.running = false;
    }

    /// Stop outright, dropping any pending play-to-end pass as well.
    pub fn halt(&mut self) {
        self.running = false;
        self.run_until_end = false;
    }

    /// Rewind to the first segment without changing play state.
    pub fn reset(&mut self) {
        self.current = 1;
        for keyframe in &mut self.keyframes {
            keyframe.runtime = 0.0;
            keyframe.offset = Pose::IDENTITY;
        }
    }

    /// Play through to the end once, then stop.
    pub fn run_animation_until_end(&mut self) {
        self.running = false;
        self.run_until_end = true;
        self.stop_once_finished = true;
    }

    /// One-shot trigger that keeps looping after the first pass.
    pub fn run_animation_until_end_repeated(&mut self) {
        self.running = true;
        self.run_until_end = true;
        self.stop_once_finished = false;
    }

    pub fn is_playing(&self) -> bool {
        self.running || self.run_until_end
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Advance the timeline by `dt` seconds.
    pub fn progress(&mut self, dt: f64) {
        if !self.is_playing() || self.keyframes.len() < 2 {
            return;
        }
        let index = self.current;
        let from = self.keyframes[index - 1].target;
        if !self.keyframes[index].progress(&from, dt) {
            return;
        }

        if index + 1 == self.keyframes.len() {
            self.keyframes[index].runtime = 0.0;
            self.keyframes[index - 1].runtime = 0.0;
            self.current = 1;
            self.run_until_end = false;
            if self.stop_once_finished {
                self.running = false;
            } else {
                self.running = true;
                // Pose-correct first frame of the next cycle.
                let rest = self.keyframes[0].target;
                self.keyframes[1].progress(&rest, 0.0);
            }
        } else {
            self.keyframes[index - 1].runtime = 0.0;
            self.current += 1;
            // Hold the reached target until the next segment moves.
            let reached = self.keyframes[index].target;
            self.keyframes[self.current].progress(&reached, 0.0);
        }
    }

    /// Offset to apply this instant.
    pub fn pose(&self) -> Pose {
        if self.keyframes.len() < 2 {
            return Pose::IDENTITY;
        }
        if self.is_playing() {
            self.keyframes[self.current].offset
        } else if self.keep_pos_after_end {
            self.keyframes[self.keyframes.len() - 1].offset
        } else {
            Pose::IDENTITY
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.pose().translation
    }

    pub fn scale(&self) -> Vec3 {
        self.pose().scale
    }

    pub fn rotation(&self) -> Quat {
        self.pose().rotation_quat()
    }
}

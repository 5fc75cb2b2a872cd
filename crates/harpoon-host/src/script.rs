//! Scripted input: player commands stamped with the simulation time at which
//! the loop should queue them. Stands in for a real input device.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use harpoon_core::commands::PlayerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_secs: f64,
    pub command: PlayerCommand,
}

/// Steps in time order. Steps sharing a time keep their file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
    next: usize,
}

impl Script {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self { steps, next: 0 }
    }

    /// Decode a JSON array of `{ "at_secs": .., "command": { "type": .. } }`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Commands due at or before `now`, each handed out once.
    pub fn due(&mut self, now: f64) -> impl Iterator<Item = PlayerCommand> + '_ {
        let start = self.next;
        while self.next < self.steps.len() && self.steps[self.next].at_secs <= now {
            self.next += 1;
        }
        self.steps[start..self.next].iter().map(|step| step.command)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A player who strafes in a square, reloads, fires and swings at whatever
/// is in front of them, once every four seconds.
pub fn demo(duration_secs: f64) -> Script {
    let headings = [Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y];
    let mut steps = Vec::new();
    let mut at = 0.0;
    let mut lap = 0usize;
    while at < duration_secs {
        let heading = headings[lap % headings.len()];
        steps.push(ScriptStep {
            at_secs: at,
            command: PlayerCommand::Reload,
        });
        steps.push(ScriptStep {
            at_secs: at + 0.8,
            command: PlayerCommand::Face { direction: heading },
        });
        steps.push(ScriptStep {
            at_secs: at + 0.8,
            command: PlayerCommand::Fire,
        });
        steps.push(ScriptStep {
            at_secs: at + 1.0,
            command: PlayerCommand::Move { intent: heading },
        });
        steps.push(ScriptStep {
            at_secs: at + 2.0,
            command: PlayerCommand::Dash,
        });
        steps.push(ScriptStep {
            at_secs: at + 3.0,
            command: PlayerCommand::Move { intent: Vec2::ZERO },
        });
        steps.push(ScriptStep {
            at_secs: at + 3.5,
            command: PlayerCommand::Melee,
        });
        at += 4.0;
        lap += 1;
    }
    Script::new(steps)
}

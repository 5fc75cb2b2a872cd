//! Immutable tuning configuration.
//!
//! Built once at startup (defaults or JSON) and moved into the engine.
//! Nothing mutates it after that.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EnemyArchetype;

/// Enemy counts as `[standard, fast, tank]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota(pub [u32; 3]);

impl Quota {
    pub fn get(&self, archetype: EnemyArchetype) -> u32 {
        self.0[archetype.index()]
    }

    pub fn get_mut(&mut self, archetype: EnemyArchetype) -> &mut u32 {
        &mut self.0[archetype.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSettings {
    /// Quota per wave, first row is wave 1.
    pub quotas: Vec<Quota>,
    /// Growth per wave beyond the last table row.
    pub endless_growth: f64,
    pub spawn_delay_secs: f64,
    pub spawn_distances: [f32; 3],
    pub spawn_distance_jitter: f32,
    pub spawn_near_tank_chance: f64,
    pub tank_angle_jitter: f32,
    pub bolt_waves: Vec<u32>,
    pub bolt_offset: f32,
    pub crate_spawn_distance: f32,
    pub crate_drop_height: f32,
}

impl WaveSettings {
    /// Quota for a 1-based wave number. Waves past the table reuse the last
    /// row scaled by `endless_growth` per extra wave (rounded up).
    pub fn quota_for(&self, wave: u32) -> Quota {
        let Some(last) = self.quotas.last() else {
            return Quota::default();
        };
        if wave == 0 {
            return Quota::default();
        }
        let defined = self.quotas.len() as u32;
        if wave <= defined {
            return self.quotas[(wave - 1) as usize];
        }
        let factor = self.endless_growth.powi((wave - defined) as i32);
        let mut scaled = *last;
        for count in scaled.0.iter_mut() {
            // Epsilon keeps exact products (20 * 1.2) from rounding up.
            *count = (*count as f64 * factor - 1e-9).ceil() as u32;
        }
        scaled
    }

    pub fn spawn_distance(&self, archetype: EnemyArchetype) -> f32 {
        self.spawn_distances[archetype.index()]
    }

    pub fn is_bolt_wave(&self, wave: u32) -> bool {
        self.bolt_waves.contains(&wave)
    }
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            quotas: WAVE_QUOTAS.iter().map(|q| Quota(*q)).collect(),
            endless_growth: ENDLESS_GROWTH,
            spawn_delay_secs: SPAWN_DELAY_SECS,
            spawn_distances: SPAWN_DISTANCES,
            spawn_distance_jitter: SPAWN_DISTANCE_JITTER,
            spawn_near_tank_chance: SPAWN_NEAR_TANK_CHANCE,
            tank_angle_jitter: TANK_ANGLE_JITTER,
            bolt_waves: BOLT_SPAWN_WAVES.to_vec(),
            bolt_offset: BOLT_OFFSET,
            crate_spawn_distance: CRATE_SPAWN_DISTANCE,
            crate_drop_height: CRATE_DROP_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub health: f32,
    pub melee_damage: f32,
    pub melee_range: f32,
    pub melee_reach: f32,
    pub melee_cooldown_secs: f64,
    pub start_ammo_capacity: u32,
    pub reload_secs: f64,
    pub volley_spread_per_round: f32,
    pub harpoon_speed: f32,
    pub dash_cooldown_secs: f64,
    pub dash_duration_secs: f64,
    pub dash_boost: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            health: PLAYER_HEALTH,
            melee_damage: PLAYER_MELEE_DAMAGE,
            melee_range: PLAYER_MELEE_RANGE,
            melee_reach: PLAYER_MELEE_REACH,
            melee_cooldown_secs: PLAYER_MELEE_COOLDOWN_SECS,
            start_ammo_capacity: PLAYER_START_AMMO_CAPACITY,
            reload_secs: PLAYER_RELOAD_SECS,
            volley_spread_per_round: VOLLEY_SPREAD_PER_ROUND,
            harpoon_speed: HARPOON_SPEED,
            dash_cooldown_secs: DASH_COOLDOWN_SECS,
            dash_duration_secs: DASH_DURATION_SECS,
            dash_boost: DASH_BOOST,
        }
    }
}

/// Ranged branch parameters (standard archetype).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangedProfile {
    pub min_range: f32,
    pub max_range: f32,
    pub window_secs: f64,
    pub windup_secs: f64,
    pub projectile_speed: f32,
}

/// Per-archetype combat tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyProfile {
    pub health: f32,
    /// Facing blend rate toward the player (per second).
    pub turn_rate: f32,
    pub melee_range: f32,
    pub melee_duration_secs: f64,
    pub melee_cooldown_secs: f64,
    /// Where in the swing the single hit-scan happens (0..1).
    pub melee_hit_fraction: f64,
    pub melee_damage: f32,
    /// Half extent of the hit-scan box, centred `melee_range` ahead.
    pub melee_reach: f32,
    /// Time between death and removal (length of the death animation).
    pub death_duration_secs: f64,
    pub ranged: Option<RangedProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySettings {
    pub standard: EnemyProfile,
    pub fast: EnemyProfile,
    pub tank: EnemyProfile,
}

impl EnemySettings {
    pub fn profile(&self, archetype: EnemyArchetype) -> &EnemyProfile {
        match archetype {
            EnemyArchetype::Standard => &self.standard,
            EnemyArchetype::Fast => &self.fast,
            EnemyArchetype::Tank => &self.tank,
        }
    }
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            standard: EnemyProfile {
                health: STANDARD_HEALTH,
                turn_rate: 4.0,
                melee_range: STANDARD_MELEE_RANGE,
                melee_duration_secs: STANDARD_MELEE_DURATION_SECS,
                melee_cooldown_secs: STANDARD_MELEE_COOLDOWN_SECS,
                melee_hit_fraction: 0.5,
                melee_damage: 1.0,
                melee_reach: 3.0,
                death_duration_secs: 5.0,
                ranged: Some(RangedProfile {
                    min_range: STANDARD_RANGED_MIN,
                    max_range: STANDARD_RANGED_MAX,
                    window_secs: STANDARD_RANGED_WINDOW_SECS,
                    windup_secs: STANDARD_RANGED_WINDUP_SECS,
                    projectile_speed: BUBBLE_SPEED,
                }),
            },
            fast: EnemyProfile {
                health: FAST_HEALTH,
                turn_rate: 8.0,
                melee_range: FAST_MELEE_RANGE,
                melee_duration_secs: FAST_MELEE_DURATION_SECS,
                melee_cooldown_secs: FAST_MELEE_COOLDOWN_SECS,
                melee_hit_fraction: 0.2,
                melee_damage: 1.0,
                melee_reach: 3.0,
                death_duration_secs: 4.3,
                ranged: None,
            },
            tank: EnemyProfile {
                health: TANK_HEALTH,
                turn_rate: 1.5,
                melee_range: TANK_MELEE_RANGE,
                melee_duration_secs: TANK_MELEE_DURATION_SECS,
                melee_cooldown_secs: TANK_MELEE_COOLDOWN_SECS,
                melee_hit_fraction: 0.5,
                melee_damage: 3.0,
                melee_reach: 5.0,
                death_duration_secs: 5.0,
                ranged: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    pub cull_radius: f32,
    pub playable_half_extent: f32,
    pub playable_height: f32,
    pub boundary_nudge: f32,
    pub tank_shield_radius: f32,
    pub tank_shield_factor: f32,
    pub embedded_lifetime_secs: f64,
    pub crate_health: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            cull_radius: WORLD_CULL_RADIUS,
            playable_half_extent: PLAYABLE_HALF_EXTENT,
            playable_height: PLAYABLE_HEIGHT,
            boundary_nudge: BOUNDARY_NUDGE,
            tank_shield_radius: TANK_SHIELD_RADIUS,
            tank_shield_factor: TANK_SHIELD_FACTOR,
            embedded_lifetime_secs: EMBEDDED_LIFETIME_SECS,
            crate_health: CRATE_HEALTH,
        }
    }
}

/// All gameplay tuning in one immutable bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default)]
    pub wave: WaveSettings,
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub enemies: EnemySettings,
    #[serde(default)]
    pub world: WorldSettings,
}

impl TuningConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

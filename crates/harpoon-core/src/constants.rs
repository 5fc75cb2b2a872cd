//! Simulation constants and default tuning parameters.
//!
//! These seed `TuningConfig::default()`; systems read tuning from the config,
//! never from here directly.

// --- World ---

/// Entities farther than this from the origin are culled (world units).
pub const WORLD_CULL_RADIUS: f32 = 500.0;

/// Half extent of the square playable area around the origin.
pub const PLAYABLE_HALF_EXTENT: f32 = 60.0;

/// Height of the playable-area box (covers anything standing on the ground).
pub const PLAYABLE_HEIGHT: f32 = 20.0;

/// Step taken back toward the origin when the player leaves the playable area.
pub const BOUNDARY_NUDGE: f32 = 0.5;

/// Tanks shield non-tank allies within this distance.
pub const TANK_SHIELD_RADIUS: f32 = 15.0;

/// Damage divisor applied once per nearby living tank.
pub const TANK_SHIELD_FACTOR: f32 = 10.0;

/// Seconds an embedded harpoon stays stuck before it is cleared.
pub const EMBEDDED_LIFETIME_SECS: f64 = 10.0;

/// Gravity applied to falling crates (units/s²).
pub const CRATE_GRAVITY: f32 = 30.0;

/// Height crates are dropped from.
pub const CRATE_DROP_HEIGHT: f32 = 12.0;

/// Crate health (one melee swing breaks it).
pub const CRATE_HEALTH: f32 = 1.0;

// --- Waves ---

/// Per-wave enemy quotas as `[standard, fast, tank]`. The last row is the
/// endless base, scaled for every wave beyond it.
pub const WAVE_QUOTAS: [[u32; 3]; 11] = [
    [1, 0, 0],
    [2, 0, 0],
    [5, 0, 0],
    [1, 2, 0],
    [0, 6, 0],
    [5, 0, 1],
    [8, 2, 2],
    [10, 4, 3],
    [15, 5, 3],
    [25, 0, 6],
    [20, 10, 5],
];

/// Multiplier per wave past the end of the quota table.
pub const ENDLESS_GROWTH: f64 = 1.2;

/// Delay between enemy spawns (seconds).
pub const SPAWN_DELAY_SECS: f64 = 0.25;

/// Spawn distance from the player per archetype `[standard, fast, tank]`.
pub const SPAWN_DISTANCES: [f32; 3] = [35.0, 18.0, 25.0];

/// Random spread added to the spawn distance (±).
pub const SPAWN_DISTANCE_JITTER: f32 = 2.0;

/// Chance to cluster a spawn near an active tank.
pub const SPAWN_NEAR_TANK_CHANCE: f64 = 0.85;

/// Angular jitter around a tank's spawn angle (radians, ±).
pub const TANK_ANGLE_JITTER: f32 = 0.35;

/// Waves that start with a bonus bolt pickup next to the crate.
pub const BOLT_SPAWN_WAVES: [u32; 4] = [1, 3, 5, 9];

/// Bolt pickup offset from the crate.
pub const BOLT_OFFSET: f32 = 4.0;

/// Crate placement distance from the player at wave reset.
pub const CRATE_SPAWN_DISTANCE: f32 = 8.0;

// --- Player ---

pub const PLAYER_HEALTH: f32 = 10.0;
pub const PLAYER_MELEE_DAMAGE: f32 = 20.0;
pub const PLAYER_MELEE_RANGE: f32 = 2.0;
pub const PLAYER_MELEE_COOLDOWN_SECS: f64 = 0.5;
/// Half extent of the melee hit-scan box.
pub const PLAYER_MELEE_REACH: f32 = 1.5;
pub const PLAYER_START_AMMO_CAPACITY: u32 = 1;
/// One reload cycle, matching the weapon's reload animation.
pub const PLAYER_RELOAD_SECS: f64 = 0.6;
/// Angular gap between harpoons in a volley (radians).
pub const VOLLEY_SPREAD_PER_ROUND: f32 = 0.12;
pub const HARPOON_SPEED: f32 = 40.0;
pub const DASH_COOLDOWN_SECS: f64 = 1.0;
pub const DASH_DURATION_SECS: f64 = 0.1;
pub const DASH_BOOST: f32 = 10.0;

// --- Enemies ---

pub const STANDARD_HEALTH: f32 = 5.0;
pub const STANDARD_MELEE_RANGE: f32 = 6.0;
pub const STANDARD_MELEE_DURATION_SECS: f64 = 1.0;
pub const STANDARD_MELEE_COOLDOWN_SECS: f64 = 2.0;
pub const STANDARD_RANGED_MIN: f32 = 10.0;
pub const STANDARD_RANGED_MAX: f32 = 25.0;
pub const STANDARD_RANGED_WINDOW_SECS: f64 = 3.0;
pub const STANDARD_RANGED_WINDUP_SECS: f64 = 1.0;
pub const BUBBLE_SPEED: f32 = 8.0;

pub const FAST_HEALTH: f32 = 1.0;
pub const FAST_MELEE_RANGE: f32 = 6.0;
pub const FAST_MELEE_DURATION_SECS: f64 = 0.5;
pub const FAST_MELEE_COOLDOWN_SECS: f64 = 1.0;

pub const TANK_HEALTH: f32 = 40.0;
pub const TANK_MELEE_RANGE: f32 = 10.0;
pub const TANK_MELEE_DURATION_SECS: f64 = 1.0;
pub const TANK_MELEE_COOLDOWN_SECS: f64 = 3.0;

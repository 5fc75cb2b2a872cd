#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use harpoon_core::components::{EnemyMind, PlayerMind};
    use harpoon_core::config::{EnemySettings, PlayerSettings};
    use harpoon_core::enums::*;
    use harpoon_core::types::Aabb;

    use crate::fsm::{self, DamageOutcome, EnemyAction, EnemyContext, TargetView};
    use crate::player::{self, AnimTarget, PlayerAction, PlayerContext, PlayerInput};

    fn player_at(position: Vec2) -> TargetView {
        TargetView {
            position,
            bounds: Aabb::new(
                Vec3::new(position.x - 0.5, 0.0, position.y - 0.5),
                Vec3::new(position.x + 0.5, 2.0, position.y + 0.5),
            ),
        }
    }

    fn enemy_ctx<'a>(
        settings: &'a EnemySettings,
        archetype: EnemyArchetype,
        now: f64,
        player: Option<TargetView>,
    ) -> EnemyContext<'a> {
        EnemyContext {
            now,
            dt: 0.016,
            position: Vec2::ZERO,
            elevation: 0.0,
            facing: Vec2::X,
            player,
            profile: settings.profile(archetype),
        }
    }

    fn mind(settings: &EnemySettings, archetype: EnemyArchetype) -> EnemyMind {
        EnemyMind::new(archetype, settings.profile(archetype).health)
    }

    // ---- Chase ----

    #[test]
    fn test_chase_accelerates_toward_distant_player() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        let ctx = enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, Some(player_at(Vec2::new(20.0, 0.0))));
        let update = fsm::evaluate(&mut m, &ctx);
        assert_eq!(m.state, EnemyState::ChasePlayer);
        assert_eq!(update.accel_intent, Vec2::X);
        assert!(!update.avoid_displacement);
    }

    #[test]
    fn test_chase_turns_gradually() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Tank);
        let ctx = enemy_ctx(&settings, EnemyArchetype::Tank, 1.0, Some(player_at(Vec2::new(0.0, 30.0))));
        let update = fsm::evaluate(&mut m, &ctx);
        // Blended, not snapped.
        assert!(update.facing.y > 0.0);
        assert!(update.facing.x > 0.5);
    }

    #[test]
    fn test_chase_without_player_idles() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Fast);
        let ctx = enemy_ctx(&settings, EnemyArchetype::Fast, 1.0, None);
        let update = fsm::evaluate(&mut m, &ctx);
        assert_eq!(update.accel_intent, Vec2::ZERO);
        assert_eq!(m.state, EnemyState::ChasePlayer);
    }

    #[test]
    fn test_melee_waits_for_cooldown() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        m.melee_ready_at = 5.0;
        let ctx = enemy_ctx(&settings, EnemyArchetype::Standard, 4.0, Some(player_at(Vec2::new(5.0, 0.0))));
        let update = fsm::evaluate(&mut m, &ctx);
        assert_eq!(m.state, EnemyState::ChasePlayer);
        // Inside melee range: no acceleration.
        assert_eq!(update.accel_intent, Vec2::ZERO);
    }

    // ---- Melee ----

    #[test]
    fn test_melee_entry_freezes_displacement() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        let ctx = enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, Some(player_at(Vec2::new(5.0, 0.0))));
        let update = fsm::evaluate(&mut m, &ctx);
        assert_eq!(m.state, EnemyState::MeleeAttack);
        assert!(update.state_changed);
        assert!(update.avoid_displacement);
        assert!((m.melee_ends_at - 2.0).abs() < 1e-9);
        assert!((m.melee_hit_at - 1.5).abs() < 1e-9);
        assert!(update
            .actions
            .contains(&EnemyAction::Animate(AnimSlot::Melee, AnimCue::PlayOnce)));
    }

    #[test]
    fn test_melee_hits_exactly_once() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        let target = Some(player_at(Vec2::new(5.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, target));

        let mut hits = 0;
        let mut now = 1.0;
        while now < 1.9 {
            now += 0.05;
            let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, now, target));
            hits += update
                .actions
                .iter()
                .filter(|a| matches!(a, EnemyAction::DamagePlayer(_)))
                .count();
        }
        assert_eq!(hits, 1);
        assert!(m.melee_landed);
    }

    #[test]
    fn test_fast_hits_early_in_swing() {
        let settings = EnemySettings::default();
        let profile = settings.profile(EnemyArchetype::Fast);
        assert!(profile.melee_hit_fraction < settings.standard.melee_hit_fraction);
        let mut m = mind(&settings, EnemyArchetype::Fast);
        let target = Some(player_at(Vec2::new(5.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Fast, 1.0, target));
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Fast, 1.11, target));
        assert!(update.actions.contains(&EnemyAction::DamagePlayer(profile.melee_damage)));
    }

    #[test]
    fn test_standard_miss_goes_to_ranged_positioning() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        let close = Some(player_at(Vec2::new(5.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, close));
        // Player sidesteps before the hit-scan.
        let away = Some(player_at(Vec2::new(0.0, 30.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.6, away));
        assert!(!m.melee_landed);
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 2.01, away));
        assert_eq!(m.state, EnemyState::PositionForRanged);
        assert!(!update.avoid_displacement);
    }

    #[test]
    fn test_standard_hit_returns_to_chase() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        let close = Some(player_at(Vec2::new(5.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, close));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.6, close));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 2.01, close));
        assert_eq!(m.state, EnemyState::ChasePlayer);
    }

    #[test]
    fn test_tank_miss_returns_to_chase() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Tank);
        let close = Some(player_at(Vec2::new(8.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Tank, 1.0, close));
        assert_eq!(m.state, EnemyState::MeleeAttack);
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Tank, 2.5, None));
        assert_eq!(m.state, EnemyState::ChasePlayer);
    }

    // ---- Ranged ----

    #[test]
    fn test_positioning_backs_off_then_fires() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        m.state = EnemyState::PositionForRanged;
        m.ranged_window_ends_at = 10.0;

        let near = Some(player_at(Vec2::new(5.0, 0.0)));
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 1.0, near));
        assert_eq!(update.accel_intent, -Vec2::X);
        assert_eq!(m.state, EnemyState::PositionForRanged);

        let in_band = Some(player_at(Vec2::new(15.0, 0.0)));
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 2.0, in_band));
        assert_eq!(m.state, EnemyState::RangedAttack);
        assert!(update.avoid_displacement);

        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 2.5, in_band));
        assert!(update.actions.iter().all(|a| !matches!(a, EnemyAction::FireBubble { .. })));

        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 3.0, in_band));
        let fired = update.actions.iter().find_map(|a| match a {
            EnemyAction::FireBubble { direction, .. } => Some(*direction),
            _ => None,
        });
        assert_eq!(fired, Some(Vec2::X));
        assert_eq!(m.state, EnemyState::ChasePlayer);
    }

    #[test]
    fn test_positioning_gives_up() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Standard);
        m.state = EnemyState::PositionForRanged;
        m.ranged_window_ends_at = 3.0;
        let near = Some(player_at(Vec2::new(5.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 3.0, near));
        assert_eq!(m.state, EnemyState::ChasePlayer);

        m.state = EnemyState::PositionForRanged;
        m.ranged_window_ends_at = 10.0;
        let far = Some(player_at(Vec2::new(40.0, 0.0)));
        fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Standard, 4.0, far));
        assert_eq!(m.state, EnemyState::ChasePlayer);
    }

    #[test]
    fn test_ranged_state_without_profile_recovers() {
        let settings = EnemySettings::default();
        let mut m = mind(&settings, EnemyArchetype::Fast);
        m.state = EnemyState::RangedAttack;
        let update = fsm::evaluate(
            &mut m,
            &enemy_ctx(&settings, EnemyArchetype::Fast, 1.0, Some(player_at(Vec2::new(5.0, 0.0)))),
        );
        assert_eq!(m.state, EnemyState::ChasePlayer);
        assert!(update.state_changed);
    }

    // ---- Death ----

    #[test]
    fn test_death_fires_once() {
        let settings = EnemySettings::default();
        let profile = settings.profile(EnemyArchetype::Standard);
        let mut m = mind(&settings, EnemyArchetype::Standard);
        assert_eq!(fsm::apply_damage(&mut m, 3.0, 1.0, profile), DamageOutcome::Wounded);
        assert_eq!(fsm::apply_damage(&mut m, 2.0, 1.0, profile), DamageOutcome::Killed);
        assert_eq!(m.health, 0.0);
        assert_eq!(m.state, EnemyState::Dead);
        for _ in 0..5 {
            assert_eq!(fsm::apply_damage(&mut m, 10.0, 1.5, profile), DamageOutcome::Ignored);
        }
        assert_eq!(m.health, 0.0);
        assert!((m.remove_at - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_dead_enemy_removed_after_animation() {
        let settings = EnemySettings::default();
        let profile = settings.profile(EnemyArchetype::Fast);
        let mut m = mind(&settings, EnemyArchetype::Fast);
        fsm::apply_damage(&mut m, 5.0, 1.0, profile);
        let target = Some(player_at(Vec2::new(3.0, 0.0)));
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Fast, 3.0, target));
        assert!(update.actions.is_empty());
        assert_eq!(update.accel_intent, Vec2::ZERO);
        let update = fsm::evaluate(&mut m, &enemy_ctx(&settings, EnemyArchetype::Fast, 5.4, target));
        assert_eq!(update.actions, vec![EnemyAction::Remove]);
    }

    // ---- Player ----

    fn player_ctx<'a>(input: &'a PlayerInput, settings: &'a PlayerSettings, now: f64) -> PlayerContext<'a> {
        PlayerContext {
            now,
            position: Vec2::ZERO,
            elevation: 0.0,
            facing: Vec2::X,
            input,
            settings,
        }
    }

    #[test]
    fn test_player_idle_running_follows_intent() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 1);
        let input = PlayerInput {
            move_intent: Vec2::new(0.0, 2.0),
            ..Default::default()
        };
        let update = player::evaluate(&mut m, &player_ctx(&input, &settings, 0.0));
        assert_eq!(m.state, PlayerState::Running);
        assert_eq!(update.accel_intent, Vec2::Y);
        assert!(update
            .actions
            .contains(&PlayerAction::Animate(AnimTarget::Body, AnimSlot::Run, AnimCue::Start)));

        let still = PlayerInput::default();
        player::evaluate(&mut m, &player_ctx(&still, &settings, 0.1));
        assert_eq!(m.state, PlayerState::Idle);
    }

    #[test]
    fn test_reload_adds_one_round() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 3);
        let reload = PlayerInput {
            reload: true,
            ..Default::default()
        };
        player::evaluate(&mut m, &player_ctx(&reload, &settings, 0.0));
        assert_eq!(m.state, PlayerState::Reloading);
        // A second press mid-reload does nothing.
        player::evaluate(&mut m, &player_ctx(&reload, &settings, 0.1));
        assert!((m.reload_ends_at - settings.reload_secs).abs() < 1e-9);

        let idle = PlayerInput::default();
        let update = player::evaluate(&mut m, &player_ctx(&idle, &settings, settings.reload_secs));
        assert_eq!(m.loaded_ammo, 1);
        assert_eq!(m.state, PlayerState::Idle);
        assert!(update
            .actions
            .contains(&PlayerAction::AmmoChanged { loaded: 1, capacity: 3 }));
    }

    #[test]
    fn test_reload_refused_when_full() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 1);
        m.loaded_ammo = 1;
        let reload = PlayerInput {
            reload: true,
            ..Default::default()
        };
        player::evaluate(&mut m, &player_ctx(&reload, &settings, 0.0));
        assert_eq!(m.state, PlayerState::Idle);
    }

    #[test]
    fn test_fire_spends_all_loaded_and_cancels_reload() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 5);
        m.loaded_ammo = 3;
        m.state = PlayerState::Reloading;
        m.reload_ends_at = 10.0;
        let fire = PlayerInput {
            fire: true,
            ..Default::default()
        };
        let update = player::evaluate(&mut m, &player_ctx(&fire, &settings, 1.0));
        assert_eq!(m.loaded_ammo, 0);
        assert_eq!(m.state, PlayerState::Idle);
        let volley = update.actions.iter().find_map(|a| match a {
            PlayerAction::FireVolley { directions, .. } => Some(directions.clone()),
            _ => None,
        });
        let directions = volley.unwrap();
        assert_eq!(directions.len(), 3);
        // Symmetric fan around the facing.
        assert!((directions[1] - Vec2::X).length() < 1e-5);
        assert!((directions[0].y + directions[2].y).abs() < 1e-5);
    }

    #[test]
    fn test_fire_without_ammo_does_nothing() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 1);
        let fire = PlayerInput {
            fire: true,
            ..Default::default()
        };
        let update = player::evaluate(&mut m, &player_ctx(&fire, &settings, 0.0));
        assert!(update.actions.is_empty());
    }

    #[test]
    fn test_melee_is_cooldown_gated() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 1);
        let melee = PlayerInput {
            melee: true,
            ..Default::default()
        };
        let swings = |update: &player::PlayerUpdate| {
            update
                .actions
                .iter()
                .filter(|a| matches!(a, PlayerAction::MeleeSwing { .. }))
                .count()
        };
        assert_eq!(swings(&player::evaluate(&mut m, &player_ctx(&melee, &settings, 0.0))), 1);
        assert_eq!(swings(&player::evaluate(&mut m, &player_ctx(&melee, &settings, 0.2))), 0);
        assert_eq!(swings(&player::evaluate(&mut m, &player_ctx(&melee, &settings, 0.6))), 1);
    }

    #[test]
    fn test_dash_boosts_briefly() {
        let settings = PlayerSettings::default();
        let mut m = PlayerMind::new(settings.health, 1);
        let dash = PlayerInput {
            dash: true,
            move_intent: Vec2::X,
            ..Default::default()
        };
        let update = player::evaluate(&mut m, &player_ctx(&dash, &settings, 0.0));
        assert_eq!(update.acceleration_scale, settings.dash_boost);
        assert!(update.bypass_max_speed);

        let run = PlayerInput {
            move_intent: Vec2::X,
            ..Default::default()
        };
        let update = player::evaluate(&mut m, &player_ctx(&run, &settings, 0.2));
        assert_eq!(update.acceleration_scale, 1.0);
        assert!(!update.bypass_max_speed);

        // Cooldown not yet over.
        let update = player::evaluate(&mut m, &player_ctx(&dash, &settings, 0.5));
        assert!(!update.bypass_max_speed);
    }

    #[test]
    fn test_player_death_once() {
        let mut m = PlayerMind::new(2.0, 1);
        assert_eq!(player::apply_damage(&mut m, 1.0), DamageOutcome::Wounded);
        assert_eq!(player::apply_damage(&mut m, 1.0), DamageOutcome::Killed);
        assert_eq!(player::apply_damage(&mut m, 1.0), DamageOutcome::Ignored);
        let input = PlayerInput {
            move_intent: Vec2::X,
            ..Default::default()
        };
        let settings = PlayerSettings::default();
        let update = player::evaluate(&mut m, &player_ctx(&input, &settings, 1.0));
        assert_eq!(update.accel_intent, Vec2::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec2, Vec3};

    use crate::commands::PlayerCommand;
    use crate::config::{Quota, TuningConfig, WaveSettings};
    use crate::definitions::{DefinitionError, DefinitionTable, PropertyOverrides};
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::types::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_entity_type_tags_are_stable() {
        assert_eq!(EntityType::WorldMap.tag(), 0);
        assert_eq!(EntityType::Crate.tag(), 6);
        assert_eq!(EntityType::Player.tag(), 7);
        assert_eq!(EntityType::EnemyTank.tag(), 10);
        assert_eq!(EntityType::BoltPickup.tag(), 15);
        for kind in EntityType::ALL {
            assert_eq!(EntityType::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(EntityType::from_tag(16), None);
    }

    #[test]
    fn test_entity_type_serializes_as_tag() {
        let json = serde_json::to_string(&EntityType::EnemyFast).unwrap();
        assert_eq!(json, "9");
        let back: EntityType = serde_json::from_str("13").unwrap();
        assert_eq!(back, EntityType::HarpoonProjectile);
        assert!(serde_json::from_str::<EntityType>("99").is_err());
    }

    #[test]
    fn test_archetype_mapping() {
        for archetype in EnemyArchetype::ALL {
            let kind = archetype.entity_type();
            assert!(kind.is_enemy());
            assert_eq!(kind.enemy_archetype(), Some(archetype));
        }
        assert!(!EntityType::Player.is_enemy());
        assert!(EntityType::BubbleProjectile.is_projectile());
        assert!(EntityType::Rock.is_scenery());
        assert!(!EntityType::Crate.is_scenery());
    }

    #[test]
    fn test_aabb_intersection_touching_counts() {
        let a = unit_box();
        let b = Aabb::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        let c = Aabb::new(Vec3::new(1.01, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_needs_overlap_on_every_axis() {
        let a = unit_box();
        let above = Aabb::new(Vec3::new(-1.0, 2.0, -1.0), Vec3::new(1.0, 4.0, 1.0));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_transformed_box_translation() {
        let moved = unit_box().transformed(&Mat4::from_translation(Vec3::new(5.0, 0.0, 2.0)));
        assert!((moved.min - Vec3::new(4.0, -1.0, 1.0)).length() < 1e-5);
        assert!((moved.max - Vec3::new(6.0, 1.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_transformed_box_rotation_is_conservative() {
        // 45° about y grows the x/z extent to sqrt(2).
        let rotated = unit_box().transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        let expected = 2.0_f32.sqrt();
        assert!((rotated.max.x - expected).abs() < 1e-4);
        assert!((rotated.max.z - expected).abs() < 1e-4);
        assert!((rotated.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_world_matrix_maps_ground_plane() {
        let m = world_matrix(Vec2::new(3.0, -4.0), 2.0, Vec2::X, Vec3::ONE);
        let p = m.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(3.0, 2.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn test_facing_rotation_points_local_x_along_facing() {
        let facing = Vec2::new(0.0, 1.0);
        let v = facing_rotation(facing) * Vec3::X;
        // Ground-plane y is world z.
        assert!((v - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_blend_facing_converges_without_overshoot() {
        let mut facing = Vec2::X;
        let target = Vec2::Y;
        for _ in 0..200 {
            facing = blend_facing(facing, target, 5.0, 0.016);
            assert!((facing.length() - 1.0).abs() < 1e-4);
        }
        assert!(facing.dot(target) > 0.999);
    }

    #[test]
    fn test_blend_facing_turns_around_from_opposite() {
        let snapped = blend_facing(Vec2::X, -Vec2::X, 1.0e6, 1.0);
        assert!(snapped.dot(-Vec2::X) > 0.999, "got {snapped}");

        let mut facing = Vec2::X;
        facing = blend_facing(facing, -Vec2::X, 5.0, 0.016);
        assert!(facing.dot(Vec2::X) < 1.0 - 1e-4, "no turn: {facing}");
        for _ in 0..400 {
            facing = blend_facing(facing, -Vec2::X, 5.0, 0.016);
            assert!((facing.length() - 1.0).abs() < 1e-4);
        }
        assert!(facing.dot(-Vec2::X) > 0.999, "got {facing}");
    }

    #[test]
    fn test_blend_facing_zero_target_keeps_current() {
        assert_eq!(blend_facing(Vec2::Y, Vec2::ZERO, 5.0, 0.016), Vec2::Y);
    }

    #[test]
    fn test_pose_lerp_and_compose() {
        let a = Pose::IDENTITY;
        let b = Pose {
            translation: Vec3::new(0.0, 2.0, 0.0),
            scale: Vec3::splat(3.0),
            rotation: Vec3::new(90.0, 0.0, 0.0),
        };
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.translation, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(mid.scale, Vec3::splat(2.0));
        assert_eq!(mid.rotation, Vec3::new(45.0, 0.0, 0.0));

        let stacked = b.compose(&b);
        assert_eq!(stacked.translation.y, 4.0);
        assert_eq!(stacked.scale, Vec3::splat(9.0));
        assert_eq!(stacked.rotation.x, 180.0);
    }

    #[test]
    fn test_entity_id_display() {
        let id = EntityId((3u64 << 32) | 7);
        assert_eq!(id.to_string(), "E7g3");
    }

    // ---- Configuration ----

    #[test]
    fn test_quota_lookup_within_table() {
        let waves = WaveSettings::default();
        assert_eq!(waves.quota_for(0), Quota::default());
        assert_eq!(waves.quota_for(1), Quota([1, 0, 0]));
        assert_eq!(waves.quota_for(4), Quota([1, 2, 0]));
        assert_eq!(waves.quota_for(11), Quota([20, 10, 5]));
    }

    #[test]
    fn test_quota_scales_past_table() {
        let waves = WaveSettings::default();
        assert_eq!(waves.quota_for(12), Quota([24, 12, 6]));
        let later = waves.quota_for(14);
        assert!(later.total() > waves.quota_for(13).total());
        // 20 * 1.2^3 = 34.56
        assert_eq!(later.get(EnemyArchetype::Standard), 35);
    }

    #[test]
    fn test_bolt_waves() {
        let waves = WaveSettings::default();
        assert!(waves.is_bolt_wave(1));
        assert!(!waves.is_bolt_wave(2));
        assert!(waves.is_bolt_wave(9));
    }

    #[test]
    fn test_tuning_defaults() {
        let config = TuningConfig::default();
        assert_eq!(config.player.melee_damage, 20.0);
        assert_eq!(config.enemies.tank.health, 40.0);
        assert!(config.enemies.standard.ranged.is_some());
        assert!(config.enemies.fast.ranged.is_none());
        assert!(config.enemies.tank.ranged.is_none());
        assert_eq!(config.world.tank_shield_factor, 10.0);
        assert_eq!(config.wave.spawn_delay_secs, 0.25);
    }

    #[test]
    fn test_tuning_partial_json_fills_defaults() {
        let config = TuningConfig::from_json(r#"{}"#).unwrap();
        assert_eq!(config.wave.quotas.len(), 11);
        assert_eq!(config.enemies.profile(EnemyArchetype::Fast).health, 1.0);
    }

    // ---- Definition table ----

    #[test]
    fn test_builtin_table_covers_every_tag() {
        let table = DefinitionTable::builtin();
        assert_eq!(table.len(), 15);
        for kind in EntityType::ALL {
            if kind == EntityType::WorldMap {
                assert!(table.get(kind).is_none());
            } else {
                assert_eq!(table.get(kind).unwrap().tag, kind.tag());
            }
        }
    }

    #[test]
    fn test_builtin_table_survives_json() {
        let table = DefinitionTable::builtin();
        let json = table.to_json().unwrap();
        let back = DefinitionTable::from_json(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_definition_rejects_reserved_tag() {
        let err = DefinitionTable::from_json(r#"[{"tag": 0}]"#).unwrap_err();
        assert!(matches!(err, DefinitionError::ReservedTag));
    }

    #[test]
    fn test_definition_rejects_out_of_order_tags() {
        let err = DefinitionTable::from_json(r#"[{"tag": 1}, {"tag": 3}]"#).unwrap_err();
        assert!(matches!(
            err,
            DefinitionError::TagMismatch {
                index: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_definition_rejects_bad_json() {
        let err = DefinitionTable::from_json("not json").unwrap_err();
        assert!(matches!(err, DefinitionError::Decode(_)));
    }

    #[test]
    fn test_definition_defaults_for_sparse_entry() {
        let table =
            DefinitionTable::from_json(r#"[{"tag": 1, "properties": {"flags": {"is_rigid": true}}}]"#)
                .unwrap();
        let props = &table.get(EntityType::TreeFoliage).unwrap().properties;
        assert!(props.flags.is_rigid);
        assert!(!props.flags.is_dynamic);
        assert_eq!(props.scale, Vec3::ONE);
        assert!(props.bounding_box.is_none());
        assert!(table.get(EntityType::Player).is_none());
    }

    #[test]
    fn test_property_overrides_apply_only_set_fields() {
        let table = DefinitionTable::builtin();
        let base = &table.get(EntityType::HarpoonProjectile).unwrap().properties;
        let overrides = PropertyOverrides {
            velocity: Some(Vec2::new(0.0, 40.0)),
            damage: Some(12.0),
            ..Default::default()
        };
        let props = base.with_overrides(&overrides);
        assert_eq!(props.velocity, Vec2::new(0.0, 40.0));
        assert_eq!(props.damage, 12.0);
        assert_eq!(props.bounding_box, base.bounding_box);
        assert_eq!(props.flags, base.flags);
    }

    // ---- Events and commands ----

    #[test]
    fn test_event_is_tagged() {
        let event = SimEvent::WaveCleared { wave: 3 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "WaveCleared");
        assert_eq!(json["wave"], 3);
    }

    #[test]
    fn test_command_from_json() {
        let cmd: PlayerCommand =
            serde_json::from_str(r#"{"type": "Move", "intent": [1.0, 0.0]}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::Move { intent: Vec2::X });
        let cmd: PlayerCommand = serde_json::from_str(r#"{"type": "Dash"}"#).unwrap();
        assert_eq!(cmd, PlayerCommand::Dash);
    }
}

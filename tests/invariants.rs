//! Property tests over whole-game behaviour

use glam::Vec2;
use proptest::prelude::*;

use silo_defense::consts::{FRAME_MS, GROUND_Y};
use silo_defense::sim::logistics;
use silo_defense::sim::state::EnemyMissile;
use silo_defense::sim::{GameEvent, GameMode, GameState, TickInput, TurretUpgrade, tick};

/// One player action between frames
#[derive(Debug, Clone)]
enum Action {
    Fire(usize, f32, f32),
    Upgrade(usize, usize),
    Truck(usize),
    Wait(u8),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..4usize, -100.0f32..1300.0, -100.0f32..900.0).prop_map(|(l, x, y)| Action::Fire(l, x, y)),
        (0..3usize, 0..5usize).prop_map(|(l, k)| Action::Upgrade(l, k)),
        (0..6usize).prop_map(Action::Truck),
        (1..30u8).prop_map(Action::Wait),
    ]
}

fn mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Arcade), Just(GameMode::Command)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn ammo_stays_within_capacity(
        seed in any::<u64>(),
        mode in mode(),
        actions in prop::collection::vec(action(), 1..80),
    ) {
        let mut state = GameState::new(mode, seed);
        state.economy.scrap = 2_000;
        for (i, city) in state.cities.iter_mut().enumerate() {
            city.ammo_stockpile = i as u32;
        }

        for action in actions {
            let mut frames = 1;
            let mut input = TickInput::default();
            match action {
                Action::Fire(l, x, y) => input.fire = Some((l, Vec2::new(x, y))),
                Action::Upgrade(l, k) => {
                    let _ = state.purchase_turret_upgrade(l, TurretUpgrade::ALL[k]);
                }
                Action::Truck(city) => {
                    let _ = logistics::dispatch_truck(&mut state, city, None);
                }
                Action::Wait(n) => frames = n as u32,
            }
            for _ in 0..frames {
                tick(&mut state, &input, FRAME_MS);
                input.fire = None;
                for launcher in &state.launchers {
                    prop_assert!(launcher.missiles <= launcher.max_missiles);
                }
            }
        }
    }

    #[test]
    fn every_grounded_missile_impacts_once(
        xs in prop::collection::vec(0.0f32..1200.0, 1..12),
    ) {
        let mut state = GameState::new(GameMode::Arcade, 1);
        // Keep the wave from spawning its own missiles
        if let Some(arcade) = state.arcade_mut() {
            arcade.enemies_to_spawn = 0;
        }
        for &x in &xs {
            let id = state.next_entity_id();
            let mut missile =
                EnemyMissile::new(id, Vec2::new(x, 0.0), Vec2::new(x, GROUND_Y), 3.0);
            missile.pos = Vec2::new(x, GROUND_Y - 1.0);
            state.enemy_missiles.push(missile);
        }

        tick(&mut state, &TickInput::default(), FRAME_MS);

        prop_assert!(state.enemy_missiles.is_empty());
        let impacts = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ScreenShake { duration_ms, .. } if *duration_ms == 150.0))
            .count();
        prop_assert_eq!(impacts, xs.len());
        // No city or launcher is destroyed twice
        let lost = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CityDestroyed { .. }))
            .count();
        prop_assert_eq!(lost, state.destroyed_cities.len());
    }

    #[test]
    fn same_seed_same_game(seed in any::<u64>(), mode in mode()) {
        let input = TickInput { idle_mode: true, ..Default::default() };
        let mut a = GameState::new(mode, seed);
        let mut b = GameState::new(mode, seed);
        for _ in 0..600 {
            tick(&mut a, &input, FRAME_MS);
            tick(&mut b, &input, FRAME_MS);
        }
        prop_assert_eq!(a.hud(), b.hud());
        prop_assert_eq!(a.drain_events(), b.drain_events());
    }
}

#[test]
fn first_arcade_wave_uses_six_missiles() {
    let state = GameState::new(GameMode::Arcade, 0);
    assert_eq!(state.arcade().map(|a| a.enemies_to_spawn), Some(6));
}

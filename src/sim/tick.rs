//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session by one frame.

use glam::Vec3;

use super::collision::collides;
use super::session::Session;
use super::vector::{add, distance, normalize, scale, subtract};

/// Enemies closer than this make the autopilot run instead of chase coins
const IDLE_FLEE_RADIUS: f32 = 3.0;
/// Autopilot ignores offsets smaller than this on an axis
const IDLE_DEADZONE: f32 = 0.05;

/// Movement intent for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Toward -Z
    pub forward: bool,
    /// Toward +Z
    pub back: bool,
    /// Toward -X
    pub left: bool,
    /// Toward +X
    pub right: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the session by one fixed timestep
///
/// Deferred tasks are drained on every call, even after game over, so a
/// respawn that comes due in a finished run is dropped rather than kept.
pub fn tick(session: &mut Session, input: &TickInput) {
    session.time_ticks += 1;
    session.run_due_tasks();

    if !session.is_active() {
        return;
    }

    let input = if input.idle_mode {
        idle_input(session)
    } else {
        input.clone()
    };

    move_player(session, &input);
    pursue_player(session);
    check_coins(session);
    check_enemies(session);

    let coin_spin = session.tuning.coin_spin;
    for coin in session.coins.iter_mut() {
        coin.spin += coin_spin;
    }

    session.advance_particles();

    session.player.rotation += session.tuning.player_spin;
}

fn move_player(session: &mut Session, input: &TickInput) {
    let speed = session.tuning.player_speed;
    let mut step = Vec3::ZERO;
    if input.forward {
        step.z -= speed;
    }
    if input.back {
        step.z += speed;
    }
    if input.left {
        step.x -= speed;
    }
    if input.right {
        step.x += speed;
    }

    let limit = session.tuning.arena_limit;
    session.player.pos =
        add(session.player.pos, step).clamp(Vec3::splat(-limit), Vec3::splat(limit));
}

/// Every enemy steps straight at where the player is now
fn pursue_player(session: &mut Session) {
    let target = session.player.pos;
    let speed = session.tuning.enemy_speed;
    for enemy in session.enemies.iter_mut() {
        let dir = normalize(subtract(target, enemy.pos));
        enemy.pos = add(enemy.pos, scale(dir, speed));
    }
}

fn check_coins(session: &mut Session) {
    let radius = session.tuning.coin_pickup_radius;
    // Reverse scan: collection swaps the last coin into the freed slot
    for i in (0..session.coins.len()).rev() {
        let hit = session
            .coins
            .get(i)
            .is_some_and(|coin| collides(&session.player, coin, radius));
        if hit {
            session.collect_coin(i);
        }
    }
}

fn check_enemies(session: &mut Session) {
    let radius = session.tuning.enemy_contact_radius;
    // The scan runs to the end even if a hit ends the run; later hits are no-ops
    for i in (0..session.enemies.len()).rev() {
        let hit = session
            .enemies
            .get(i)
            .is_some_and(|enemy| collides(&session.player, enemy, radius));
        if hit {
            session.take_hit(i);
        }
    }
}

/// Autopilot intent: run from close enemies, otherwise head for the nearest coin
pub fn idle_input(session: &Session) -> TickInput {
    let player = session.player.pos;

    let threat = session
        .enemies
        .iter()
        .map(|e| (e.pos, distance(player, e.pos)))
        .filter(|&(_, d)| d < IDLE_FLEE_RADIUS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let desired = if let Some((enemy_pos, _)) = threat {
        subtract(player, enemy_pos)
    } else if let Some(coin) = session.coins.iter().min_by(|a, b| {
        distance(player, a.pos)
            .partial_cmp(&distance(player, b.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        subtract(coin.pos, player)
    } else {
        Vec3::ZERO
    };

    TickInput {
        forward: desired.z < -IDLE_DEADZONE,
        back: desired.z > IDLE_DEADZONE,
        left: desired.x < -IDLE_DEADZONE,
        right: desired.x > IDLE_DEADZONE,
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ColorTag, GameEvent, GamePhase};
    use proptest::prelude::*;

    /// Session with empty coin and enemy pools and no queued events
    fn empty_session(seed: u64) -> Session {
        let mut session = Session::new(seed);
        session.coins.clear();
        session.enemies.clear();
        session.drain_events();
        session
    }

    fn explosions(events: &[GameEvent], tag: ColorTag) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Explosion { color, .. } if *color == tag))
            .count()
    }

    #[test]
    fn test_player_moves_and_spins() {
        let mut session = empty_session(1);
        let input = TickInput {
            forward: true,
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut session, &input);
        }
        assert!((session.player.pos - Vec3::new(1.5, 0.0, -1.5)).length() < 1e-4);
        assert!((session.player.rotation - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut session = empty_session(1);
        let input = TickInput {
            left: true,
            right: true,
            forward: true,
            back: true,
            ..Default::default()
        };
        tick(&mut session, &input);
        assert_eq!(session.player.pos, Vec3::ZERO);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut session = empty_session(1);
        let input = TickInput {
            right: true,
            back: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut session, &input);
        }
        assert_eq!(session.player.pos.x, 20.0);
        assert_eq!(session.player.pos.z, 20.0);
    }

    #[test]
    fn test_enemy_pursues_current_position() {
        let mut session = empty_session(2);
        session.place_enemy(Vec3::new(10.0, 0.0, 0.0));
        tick(&mut session, &TickInput::default());
        let pos = session.enemies.get(0).unwrap().pos;
        assert!((pos - Vec3::new(9.95, 0.0, 0.0)).length() < 1e-5);

        // Player moves; the next step aims at the new position
        session.player.pos = Vec3::new(9.95, 0.0, 10.0);
        tick(&mut session, &TickInput::default());
        let pos = session.enemies.get(0).unwrap().pos;
        assert!((pos - Vec3::new(9.95, 0.0, 0.05)).length() < 1e-5);
    }

    #[test]
    fn test_coin_pickup_scenario() {
        let mut session = empty_session(3);
        session.place_coin(Vec3::new(0.0, 0.5, 0.0));
        session.drain_events();

        tick(&mut session, &TickInput::default());
        assert_eq!(session.state.score, 10);
        assert_eq!(session.coins.len(), 1);
        assert_eq!(session.particles.len(), 20);

        let events = session.drain_events();
        assert_eq!(explosions(&events, ColorTag::Pickup), 1);
        assert!(events.contains(&GameEvent::HudChanged { score: 10, lives: 3 }));
    }

    #[test]
    fn test_coins_spin() {
        let mut session = empty_session(3);
        session.place_coin(Vec3::new(10.0, 0.5, 0.0));
        for _ in 0..10 {
            tick(&mut session, &TickInput::default());
        }
        assert!((session.coins.get(0).unwrap().spin - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_last_life_scenario() {
        let mut session = empty_session(4);
        session.state.lives = 1;
        session.state.score = 40;
        session.place_enemy(Vec3::new(0.0, 0.0, 1.0));
        session.drain_events();

        tick(&mut session, &TickInput::default());
        assert_eq!(session.state.lives, 0);
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert!(session.enemies.is_empty());

        let events = session.drain_events();
        assert!(events.contains(&GameEvent::GameOver { final_score: 40 }));
    }

    #[test]
    fn test_simultaneous_contacts_take_one_life() {
        let mut session = empty_session(5);
        session.state.lives = 1;
        session.place_enemy(Vec3::new(0.0, 0.0, 1.0));
        session.place_enemy(Vec3::new(1.0, 0.0, 0.0));
        session.place_enemy(Vec3::new(0.0, 0.0, -0.5));
        session.drain_events();

        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.state.lives, 0);
        // Only the first contact in the scan is consumed
        assert_eq!(session.enemies.len(), 2);

        let events = session.drain_events();
        assert_eq!(explosions(&events, ColorTag::Hit), 1);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_enemy_respawns_after_delay() {
        let mut session = empty_session(6);
        session.place_enemy(Vec3::new(0.0, 0.0, 1.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.state.lives, 2);
        assert!(session.enemies.is_empty());

        for _ in 0..119 {
            tick(&mut session, &TickInput::default());
        }
        assert!(session.enemies.is_empty());

        tick(&mut session, &TickInput::default());
        assert_eq!(session.enemies.len(), 1);
    }

    #[test]
    fn test_respawn_after_game_over_is_noop() {
        let mut session = empty_session(7);
        session.state.lives = 2;
        session.place_enemy(Vec3::new(0.0, 0.0, 1.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.pending_spawns(), 1);

        session.place_enemy(Vec3::new(1.0, 0.0, 0.0));
        tick(&mut session, &TickInput::default());
        assert_eq!(session.phase(), GamePhase::GameOver);

        for _ in 0..300 {
            tick(&mut session, &TickInput::default());
        }
        assert!(session.enemies.is_empty());
        assert_eq!(session.pending_spawns(), 0);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut session = Session::new(8);
        session.state.lives = 1;
        session.take_hit(0);
        session.drain_events();

        let player = session.player.clone();
        let particles = session.particles.len();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut session, &input);
        }
        assert_eq!(session.player.pos, player.pos);
        assert_eq!(session.player.rotation, player.rotation);
        assert_eq!(session.particles.len(), particles);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_idle_mode_collects_coin() {
        let mut session = empty_session(9);
        session.place_coin(Vec3::new(3.0, 0.5, 0.0));

        let idle = idle_input(&session);
        assert!(idle.right && !idle.left && !idle.forward && !idle.back);

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut ticks = 0;
        while session.state.score == 0 && ticks < 30 {
            tick(&mut session, &input);
            ticks += 1;
        }
        assert_eq!(session.state.score, 10);
        // First step within pickup range is x = 2.25
        assert_eq!(ticks, 15);
    }

    #[test]
    fn test_idle_mode_flees_close_enemy() {
        let mut session = empty_session(10);
        session.place_coin(Vec3::new(5.0, 0.5, 0.0));
        session.place_enemy(Vec3::new(2.0, 0.0, 0.0));

        let idle = idle_input(&session);
        assert!(idle.left && !idle.right);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs end up identical
        let mut a = Session::new(99999);
        let mut b = Session::new(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.state.score, b.state.score);
        assert_eq!(a.state.lives, b.state.lives);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.coins.len(), b.coins.len());
        for (ca, cb) in a.coins.iter().zip(b.coins.iter()) {
            assert_eq!(ca.pos, cb.pos);
        }
        assert_eq!(a.drain_events(), b.drain_events());
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), prop::bool::weighted(0.2))
            .prop_map(|(forward, back, left, right, idle_mode)| TickInput {
                forward,
                back,
                left,
                right,
                idle_mode,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_session_invariants(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut session = Session::new(seed);
            let mut last_score = 0;
            let mut last_lives = session.state.lives;

            for input in &inputs {
                let was_active = session.is_active();
                tick(&mut session, input);

                let state = &session.state;
                prop_assert!(state.lives <= 3);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.lives <= last_lives);
                prop_assert_eq!(state.score % 10, 0);
                prop_assert!(session.player.pos.abs().max_element() <= 20.0);

                if session.is_active() {
                    prop_assert_eq!(session.coins.len(), 10);
                    prop_assert_eq!(session.enemies.len() + session.pending_spawns(), 5);
                } else if !was_active {
                    prop_assert_eq!(state.score, last_score);
                    prop_assert_eq!(state.lives, last_lives);
                }

                last_score = state.score;
                last_lives = state.lives;
            }
        }
    }
}

//! Enduro frame logic: steering, traffic, spawning, collision detection.
//!
//! Everything here is pure state transition; drawing lives in
//! `ui::enduro_scene`.

use super::types::*;
use log::debug;
use rand::Rng;

/// Input sampled for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub quit: bool,
}

/// Advance the run by one frame at simulated time `now_ms`.
///
/// Order: input, traffic movement, spawn, collision, lane scroll. A quit
/// request still lets the frame finish; a crash on that same frame wins.
/// Does nothing once the run has ended. Returns true if the run is still going.
pub fn step_frame<R: Rng>(
    game: &mut EnduroGame,
    controls: Controls,
    now_ms: u64,
    rng: &mut R,
) -> bool {
    if !game.is_running() {
        return false;
    }

    game.frame_count += 1;
    game.elapsed_ms = now_ms;

    // 1. Input
    steer(game, controls);

    // 2. Traffic
    advance_obstacles(game);

    // 3. Spawn
    if now_ms >= game.next_spawn_ms {
        game.spawn_obstacle(rng);
        game.next_spawn_ms = now_ms.saturating_add(game.config.spawn_interval_ms);
    }

    // 4. Collision
    let crashed = player_collides(game);

    // 5. Lane markers
    game.lane_offset = (game.lane_offset + game.config.lane_scroll_step)
        .rem_euclid(game.config.lane_marker_spacing);

    if crashed {
        finish(game, RunOutcome::Crashed);
    } else if controls.quit {
        finish(game, RunOutcome::Quit);
    }

    game.is_running()
}

/// Apply left then right, then clamp the player onto the road.
///
/// Both keys held moves by `-speed + speed`, which nets zero.
pub fn steer(game: &mut EnduroGame, controls: Controls) {
    let speed = game.config.player_speed;
    let rect = &mut game.player.rect;

    if controls.left {
        rect.x -= speed;
    }
    if controls.right {
        rect.x += speed;
    }

    let (min_x, max_x) = game.config.lane_range(rect.width);
    rect.x = rect.x.clamp(min_x, max_x);
}

/// Move every car down by its speed and drop those whose top edge has left
/// the bottom of the board.
pub fn advance_obstacles(game: &mut EnduroGame) {
    let height = game.config.height;

    for car in &mut game.obstacles {
        car.rect.y += car.speed;
    }

    let before = game.obstacles.len();
    game.obstacles.retain(|car| car.rect.top() <= height);
    let removed = before - game.obstacles.len();
    if removed > 0 {
        debug!("{} car(s) left the board", removed);
    }
}

/// True if the player overlaps any car.
pub fn player_collides(game: &EnduroGame) -> bool {
    game.obstacles
        .iter()
        .any(|car| game.player.rect.intersects(&car.rect))
}

fn finish(game: &mut EnduroGame, outcome: RunOutcome) {
    debug!(
        "run ended: {:?} after {} frames ({} ms, {} cars)",
        outcome, game.frame_count, game.elapsed_ms, game.obstacles_spawned
    );
    game.outcome = Some(outcome);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FRAME_MS: u64 = 16;

    fn new_game() -> EnduroGame {
        EnduroGame::new(EnduroConfig::default()).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn obstacle_at(x: i32, y: i32) -> Car {
        Car {
            rect: Rect::new(x, y, CAR_WIDTH, CAR_HEIGHT),
            color: CarColor::Red,
            speed: OBSTACLE_SPEED,
        }
    }

    #[test]
    fn test_steer_left_and_right() {
        let mut game = new_game();
        let start = game.player.rect.x;

        steer(&mut game, Controls { left: true, ..Controls::default() });
        assert_eq!(game.player.rect.x, start - PLAYER_SPEED);

        steer(&mut game, Controls { right: true, ..Controls::default() });
        steer(&mut game, Controls { right: true, ..Controls::default() });
        assert_eq!(game.player.rect.x, start + PLAYER_SPEED);
    }

    #[test]
    fn test_steer_both_keys_nets_zero() {
        let mut game = new_game();
        let start = game.player.rect.x;
        steer(
            &mut game,
            Controls {
                left: true,
                right: true,
                quit: false,
            },
        );
        assert_eq!(game.player.rect.x, start);
    }

    #[test]
    fn test_steer_clamps_to_road() {
        let mut game = new_game();
        for _ in 0..200 {
            steer(&mut game, Controls { left: true, ..Controls::default() });
            assert!(game.player.rect.x >= game.config.road_left());
        }
        assert_eq!(game.player.rect.x, 80);

        for _ in 0..200 {
            steer(&mut game, Controls { right: true, ..Controls::default() });
            assert!(game.player.rect.right() <= game.config.road_right());
        }
        assert_eq!(game.player.rect.x, 360);
    }

    #[test]
    fn test_quit_frame_still_completes() {
        let mut game = new_game();
        game.obstacles.push(obstacle_at(100, 0));
        let start_x = game.player.rect.x;

        let running = step_frame(
            &mut game,
            Controls {
                left: true,
                right: false,
                quit: true,
            },
            0,
            &mut rng(),
        );

        assert!(!running);
        assert_eq!(game.outcome, Some(RunOutcome::Quit));
        assert_eq!(game.player.rect.x, start_x - PLAYER_SPEED);
        assert_eq!(game.obstacles[0].rect.y, OBSTACLE_SPEED);
        assert_eq!(game.obstacles_spawned, 1);
        assert_eq!(game.lane_offset, LANE_SCROLL_STEP);
        assert_eq!(game.frame_count, 1);
    }

    #[test]
    fn test_crash_wins_over_quit_on_same_frame() {
        let mut game = new_game();
        let player = game.player.rect;
        game.obstacles.push(obstacle_at(player.x, player.y - CAR_HEIGHT));
        game.next_spawn_ms = 10_000;

        step_frame(
            &mut game,
            Controls { quit: true, ..Controls::default() },
            0,
            &mut rng(),
        );
        assert_eq!(game.outcome, Some(RunOutcome::Crashed));
    }

    #[test]
    fn test_huge_spawn_interval_does_not_overflow() {
        let mut game = EnduroGame::new(EnduroConfig {
            spawn_interval_ms: u64::MAX,
            ..EnduroConfig::default()
        })
        .unwrap();
        let mut rng = rng();

        step_frame(&mut game, Controls::default(), 5, &mut rng);
        assert_eq!(game.next_spawn_ms, u64::MAX);
        step_frame(&mut game, Controls::default(), 21, &mut rng);
        assert_eq!(game.obstacles_spawned, 1);
    }

    #[test]
    fn test_first_frame_spawns_immediately() {
        let mut game = new_game();
        step_frame(&mut game, Controls::default(), 0, &mut rng());
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.next_spawn_ms, SPAWN_INTERVAL_MS);
        // Fresh car is not moved on its spawn frame
        assert_eq!(game.obstacles[0].rect.y, -CAR_HEIGHT);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut game = new_game();
        let mut rng = rng();
        step_frame(&mut game, Controls::default(), 0, &mut rng);
        step_frame(&mut game, Controls::default(), 799, &mut rng);
        assert_eq!(game.obstacles_spawned, 1);
        step_frame(&mut game, Controls::default(), 800, &mut rng);
        assert_eq!(game.obstacles_spawned, 2);
        assert_eq!(game.next_spawn_ms, 1600);
    }

    #[test]
    fn test_spawn_does_not_catch_up_after_lag() {
        let mut game = new_game();
        let mut rng = rng();
        step_frame(&mut game, Controls::default(), 0, &mut rng);
        // A five-second stall yields one car, not six
        step_frame(&mut game, Controls::default(), 5_000, &mut rng);
        assert_eq!(game.obstacles_spawned, 2);
        assert_eq!(game.next_spawn_ms, 5_800);
    }

    #[test]
    fn test_obstacle_removed_after_passing_bottom() {
        let mut game = new_game();
        // Keep the car in the left lane, away from the centered player
        game.obstacles.push(obstacle_at(100, -60));
        game.next_spawn_ms = u64::MAX;

        for _ in 0..10 {
            advance_obstacles(&mut game);
        }
        assert_eq!(game.obstacles[0].rect.y, 0);

        for _ in 10..116 {
            advance_obstacles(&mut game);
        }
        // y = 636: top still on the board
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.obstacles[0].rect.y, 636);

        advance_obstacles(&mut game);
        assert!(game.obstacles.is_empty());
    }

    #[test]
    fn test_top_exactly_at_bottom_edge_is_kept() {
        let mut game = new_game();
        game.obstacles.push(obstacle_at(100, SCREEN_HEIGHT - OBSTACLE_SPEED));
        advance_obstacles(&mut game);
        assert_eq!(game.obstacles.len(), 1);
        assert_eq!(game.obstacles[0].rect.top(), SCREEN_HEIGHT);
    }

    #[test]
    fn test_removal_keeps_order_of_survivors() {
        let mut game = new_game();
        game.obstacles.push(obstacle_at(100, 0));
        game.obstacles.push(obstacle_at(140, 638));
        game.obstacles.push(obstacle_at(300, 10));
        game.obstacles.push(obstacle_at(200, 700));

        advance_obstacles(&mut game);

        let ys: Vec<i32> = game.obstacles.iter().map(|c| c.rect.y).collect();
        assert_eq!(ys, vec![6, 16]);
    }

    #[test]
    fn test_collision_crashes_and_freezes_run() {
        let mut game = new_game();
        let player = game.player.rect;
        // One step above the player, overlapping after this frame's move
        game.obstacles.push(obstacle_at(player.x, player.y - CAR_HEIGHT));
        game.next_spawn_ms = 10_000;

        let running = step_frame(&mut game, Controls::default(), 0, &mut rng());
        assert!(!running);
        assert_eq!(game.outcome, Some(RunOutcome::Crashed));

        let snapshot: Vec<Car> = game.obstacles.clone();
        let spawned = game.obstacles_spawned;
        let lane_offset = game.lane_offset;
        let frames = game.frame_count;

        for i in 1..=100 {
            let now = 10_000 + i * FRAME_MS;
            assert!(!step_frame(&mut game, Controls::default(), now, &mut rng()));
        }
        assert_eq!(game.obstacles, snapshot);
        assert_eq!(game.obstacles_spawned, spawned);
        assert_eq!(game.lane_offset, lane_offset);
        assert_eq!(game.frame_count, frames);
        assert_eq!(game.outcome, Some(RunOutcome::Crashed));
    }

    #[test]
    fn test_quit_after_crash_keeps_crash_outcome() {
        let mut game = new_game();
        game.outcome = Some(RunOutcome::Crashed);
        step_frame(
            &mut game,
            Controls { quit: true, ..Controls::default() },
            0,
            &mut rng(),
        );
        assert_eq!(game.outcome, Some(RunOutcome::Crashed));
    }

    #[test]
    fn test_touching_edges_do_not_crash() {
        let mut game = new_game();
        let player = game.player.rect;
        game.obstacles.push(obstacle_at(player.right(), player.y));
        assert!(!player_collides(&game));
    }

    #[test]
    fn test_lane_offset_cycles() {
        let mut game = new_game();
        game.next_spawn_ms = u64::MAX;
        let mut seen = Vec::new();
        for i in 0..10 {
            step_frame(&mut game, Controls::default(), i * FRAME_MS, &mut rng());
            seen.push(game.lane_offset);
        }
        assert_eq!(seen, vec![5, 10, 15, 20, 25, 30, 35, 0, 5, 10]);
    }
}

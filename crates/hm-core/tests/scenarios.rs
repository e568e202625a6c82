//! Scripted episodes on a fixed layout.

use hm_core::{
    Action, EnvConfig, EnvError, GameRng, HauntedMansion, Position, RecordingAdapter, RenderMode,
    ResetOptions, Tile,
};
use strum::IntoEnumIterator;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

/// Full 5x5 environment with the agent at `agent` and ghosts parked on the
/// right-hand column, away from both candies.
fn full_env(agent: Position) -> HauntedMansion {
    let mut env = HauntedMansion::with_rng(EnvConfig::full(), GameRng::new(42)).unwrap();
    env.reset(Some(42), Some(ResetOptions::with_agent_start(agent)))
        .unwrap();
    for (i, y) in [0, 1, 2].into_iter().enumerate() {
        env.state_mut().place_ghost(i, Position::new(4, y)).unwrap();
    }
    env
}

#[test]
fn test_reach_door_from_left() {
    let mut env = full_env(Position::new(3, 4));
    let step = env.step(Action::Right).unwrap();
    assert_eq!(step.observation.agent, [4, 4]);
    assert!(step.terminated);
    assert!(!step.truncated);
    assert_close(step.reward, 9.9);
    assert_eq!(step.info.distance, 0.0);
}

#[test]
fn test_reach_door_from_above() {
    let mut env = full_env(Position::new(4, 3));
    env.state_mut().place_ghost(2, Position::new(0, 4)).unwrap();
    let step = env.step(1).unwrap();
    assert!(step.terminated);
    assert_close(step.reward, 9.9);
}

#[test]
fn test_ghost_collision_costs_seven() {
    let mut env = full_env(Position::new(3, 1));
    let step = env.step(Action::Right).unwrap();
    assert_eq!(step.observation.agent, [4, 1]);
    assert!(!step.terminated);
    assert_close(step.reward, -7.1);
}

#[test]
fn test_candy_pays_once() {
    let mut env = full_env(Position::new(1, 2));
    let step = env.step(Action::Right).unwrap();
    assert_close(step.reward, 2.9);
    assert_eq!(step.observation.candies, Some(vec![[-1, -1], [3, 0]]));

    env.step(Action::Left).unwrap();
    let step = env.step(Action::Right).unwrap();
    assert_close(step.reward, -0.1);
    assert_eq!(step.observation.candies, Some(vec![[-1, -1], [3, 0]]));
}

#[test]
fn test_candies_come_back_on_reset() {
    let mut env = full_env(Position::new(1, 2));
    env.step(Action::Right).unwrap();
    let (obs, _) = env.reset(None, None).unwrap();
    assert_eq!(obs.candies, Some(vec![[2, 2], [3, 0]]));
}

#[test]
fn test_wall_clamp_keeps_agent() {
    let mut env = full_env(Position::new(0, 2));
    let step = env.step(Action::Left).unwrap();
    assert_eq!(step.observation.agent, [0, 2]);
    assert_close(step.reward, -0.1);
    assert!(!step.terminated);
}

#[test]
fn test_invalid_code_is_rejected() {
    let mut env = full_env(Position::new(2, 3));
    let before = env.state().clone();
    let err = env.step(7).unwrap_err();
    assert_eq!(err, EnvError::InvalidAction { code: 7 });
    assert!(err.is_recoverable());
    assert_eq!(env.state(), &before);

    assert!(matches!(
        env.step(vec![0i64, 1]),
        Err(EnvError::InvalidActionShape { len: 2 })
    ));
    assert!(matches!(env.step(-1), Err(EnvError::InvalidAction { code: -1 })));
    assert_eq!(env.state(), &before);
}

#[test]
fn test_simple_episode() {
    let mut env = HauntedMansion::with_rng(EnvConfig::simple(), GameRng::new(0)).unwrap();
    let (obs, info) = env
        .reset(None, Some(ResetOptions::with_agent_start(Position::new(0, 0))))
        .unwrap();
    assert!(obs.ghosts.is_none());
    assert!(obs.candies.is_none());
    assert_eq!(info.distance, 8.0);

    let mut last = None;
    for action in [0, 0, 0, 0, 1, 1, 1, 1] {
        last = Some(env.step(action).unwrap());
    }
    let last = last.unwrap();
    assert!(last.terminated);
    assert_close(last.reward, 1.0);
    assert_close(env.episode_return(), 1.0);
    assert_eq!(env.steps(), 8);
}

#[test]
fn test_step_penalty_override() {
    let config = EnvConfig::full().with_step_penalty(0.5);
    let mut env = HauntedMansion::with_rng(config, GameRng::new(3)).unwrap();
    env.reset(None, Some(ResetOptions::with_agent_start(Position::new(0, 1))))
        .unwrap();
    for (i, y) in [0, 1, 2].into_iter().enumerate() {
        env.state_mut().place_ghost(i, Position::new(4, y)).unwrap();
    }
    let step = env.step(Action::Up).unwrap();
    assert_close(step.reward, -0.5);
}

#[test]
fn test_custom_target() {
    let config = EnvConfig::simple().with_size(7).with_target(Position::new(0, 6));
    let mut env = HauntedMansion::with_rng(config, GameRng::new(3)).unwrap();
    let (obs, _) = env
        .reset(None, Some(ResetOptions::with_agent_start(Position::new(0, 5))))
        .unwrap();
    assert_eq!(obs.target, [0, 6]);
    assert!(env.step(Action::Down).unwrap().terminated);
}

#[test]
fn test_agent_start_out_of_bounds() {
    let mut env = HauntedMansion::with_rng(EnvConfig::full(), GameRng::new(3)).unwrap();
    let result = env.reset(None, Some(ResetOptions::with_agent_start(Position::new(5, 0))));
    assert!(matches!(result, Err(EnvError::InvalidConfig(_))));
}

#[test]
fn test_single_cell_grid() {
    let mut env = HauntedMansion::with_rng(EnvConfig::simple().with_size(1), GameRng::new(9))
        .unwrap();
    let (obs, info) = env.reset(None, None).unwrap();
    assert_eq!(obs.agent, [0, 0]);
    assert_eq!(info.distance, 0.0);
    for action in Action::iter() {
        let step = env.step(action).unwrap();
        assert!(step.terminated);
        assert_eq!(step.observation.agent, [0, 0]);
    }
}

#[test]
fn test_human_mode_renders_on_reset() {
    let recorder = RecordingAdapter::new();
    let config = EnvConfig::full().with_render_mode(RenderMode::Human);
    let mut env = HauntedMansion::with_rng(config, GameRng::new(11))
        .unwrap()
        .with_renderer(Box::new(recorder.clone()));

    env.reset(None, Some(ResetOptions::with_agent_start(Position::new(1, 1))))
        .unwrap();
    let frame = recorder.last_frame().unwrap();
    assert_eq!(frame.view.tile(1, 1), Some(Tile::Agent));
    assert_eq!(frame.view.tile(4, 4), Some(Tile::Door));
    assert_eq!(frame.view.tile(3, 0), Some(Tile::Candy));

    env.close().unwrap();
    env.close().unwrap();
    assert_eq!(recorder.close_count(), 1);
}

//! Application state - ties the environment to input and episode bookkeeping

use crossterm::event::Event;
use hm_core::{EnvError, GameRng, HauntedMansion, Step};

use crate::input::{Command, key_to_command};

/// How one episode ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// 1-based episode number.
    pub episode: u32,
    pub steps: u64,
    pub episode_return: f64,
    /// Reached the door, as opposed to being reset or quit midway.
    pub escaped: bool,
}

/// Front-end state shared by the interactive, auto and headless modes.
pub struct App {
    env: HauntedMansion,
    policy_rng: GameRng,
    episode: u32,
    recorded: bool,
    should_quit: bool,
    summaries: Vec<EpisodeSummary>,
}

impl App {
    /// `policy_seed` seeds the random policy used by [`App::auto_step`],
    /// kept apart from the environment's own placement stream.
    pub fn new(env: HauntedMansion, policy_seed: Option<u64>) -> Self {
        let policy_rng = match policy_seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            env,
            policy_rng,
            episode: 0,
            recorded: false,
            should_quit: false,
            summaries: Vec::new(),
        }
    }

    pub fn env(&self) -> &HauntedMansion {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut HauntedMansion {
        &mut self.env
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self) {
        self.should_quit = true;
    }

    /// Finished episodes, oldest first.
    pub fn summaries(&self) -> &[EpisodeSummary] {
        &self.summaries
    }

    /// Begin the next episode. The first call should pass the run seed;
    /// later calls continue its stream.
    pub fn new_episode(&mut self, seed: Option<u64>) -> Result<(), EnvError> {
        self.record_unfinished();
        self.env.reset(seed, None)?;
        self.episode += 1;
        self.recorded = false;
        log::debug!("episode {} started", self.episode);
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) => key_to_command(key),
            _ => None,
        }
    }

    /// Run a command. Moves after the door was reached are ignored until
    /// the next reset.
    pub fn execute(&mut self, command: Command) -> Result<Option<Step>, EnvError> {
        match command {
            Command::Move(action) => {
                if self.env.is_terminated() {
                    return Ok(None);
                }
                let step = self.env.step(action)?;
                self.after_step(&step)?;
                Ok(Some(step))
            }
            Command::Reset => {
                self.new_episode(None)?;
                Ok(None)
            }
            Command::Quit => {
                self.record_unfinished();
                self.should_quit = true;
                Ok(None)
            }
        }
    }

    /// Take one uniformly random action.
    pub fn auto_step(&mut self) -> Result<Step, EnvError> {
        let action = self.env.action_space().sample(&mut self.policy_rng);
        let step = self.env.step(action)?;
        self.after_step(&step)?;
        Ok(step)
    }

    fn after_step(&mut self, step: &Step) -> Result<(), EnvError> {
        self.env.render()?;
        if step.terminated {
            self.record(true);
        }
        Ok(())
    }

    /// Record the current episode if it ended without reaching the door.
    pub fn finish_episode(&mut self) {
        self.record_unfinished();
    }

    fn record_unfinished(&mut self) {
        if self.episode > 0 && !self.recorded && self.env.steps() > 0 {
            self.record(false);
        }
    }

    fn record(&mut self, escaped: bool) {
        let summary = EpisodeSummary {
            episode: self.episode,
            steps: self.env.steps(),
            episode_return: self.env.episode_return(),
            escaped,
        };
        self.summaries.push(summary);
        self.recorded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_core::{Action, EnvConfig, Position, RecordingAdapter, RenderMode, ResetOptions};

    fn simple_app() -> App {
        let env = HauntedMansion::with_rng(EnvConfig::simple(), GameRng::new(5)).unwrap();
        App::new(env, Some(6))
    }

    #[test]
    fn test_moves_are_ignored_after_escape() {
        let mut app = simple_app();
        app.new_episode(Some(1)).unwrap();
        app.env_mut()
            .reset(None, Some(ResetOptions::with_agent_start(Position::new(3, 4))))
            .unwrap();

        let step = app.execute(Command::Move(Action::Right)).unwrap().unwrap();
        assert!(step.terminated);
        assert_eq!(app.summaries().len(), 1);
        assert!(app.summaries()[0].escaped);

        assert!(app.execute(Command::Move(Action::Left)).unwrap().is_none());
        assert_eq!(app.env().steps(), 1);
    }

    #[test]
    fn test_reset_records_unfinished_episode() {
        let mut app = simple_app();
        app.new_episode(Some(1)).unwrap();
        app.env_mut()
            .reset(None, Some(ResetOptions::with_agent_start(Position::new(0, 0))))
            .unwrap();
        app.execute(Command::Move(Action::Right)).unwrap();
        app.execute(Command::Reset).unwrap();

        assert_eq!(app.episode(), 2);
        let summary = app.summaries()[0];
        assert_eq!(summary.episode, 1);
        assert_eq!(summary.steps, 1);
        assert!(!summary.escaped);
    }

    #[test]
    fn test_quit() {
        let mut app = simple_app();
        app.new_episode(None).unwrap();
        app.execute(Command::Quit).unwrap();
        assert!(app.should_quit());
        // No steps taken, nothing to record.
        assert!(app.summaries().is_empty());
    }

    #[test]
    fn test_auto_steps_render() {
        let recorder = RecordingAdapter::new();
        let config = EnvConfig::full().with_render_mode(RenderMode::Human);
        let env = HauntedMansion::with_rng(config, GameRng::new(5))
            .unwrap()
            .with_renderer(Box::new(recorder.clone()));
        let mut app = App::new(env, Some(6));
        app.new_episode(Some(9)).unwrap();
        for _ in 0..5 {
            if app.auto_step().unwrap().terminated {
                break;
            }
        }
        assert_eq!(recorder.frame_count() as u64, 1 + app.env().steps());
    }
}

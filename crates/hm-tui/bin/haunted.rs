//! Haunted Mansion grid world in the terminal
//!
//! Main entry point. Plays interactively by default; `--auto` hands the
//! keyboard to a random policy and `--headless` skips the UI entirely.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use hm_core::{EnvConfig, HauntedMansion, METADATA, RenderMode, Variant};
use hm_tui::{App, AppConfig, Command, EpisodeSummary, GraphicsMode, TerminalRenderer, Theme};

/// Trick or ReTreat: escape the haunted mansion
#[derive(Parser, Debug)]
#[command(name = "haunted")]
#[command(author, version, about = "Trick or ReTreat: Escape the Mansion!", long_about = None)]
struct Args {
    /// Board side length
    #[arg(short = 'n', long = "size")]
    size: Option<i32>,

    /// Seed for the first reset
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Feature tier (simple or full)
    #[arg(short = 'v', long = "variant")]
    variant: Option<Variant>,

    /// Penalty subtracted every step in the full variant
    #[arg(long = "step-penalty")]
    step_penalty: Option<f64>,

    /// Episodes to play in auto and headless modes
    #[arg(short = 'e', long = "episodes")]
    episodes: Option<u32>,

    /// Let a random policy play
    #[arg(short = 'a', long = "auto")]
    auto: bool,

    /// No terminal UI; print one summary line per episode
    #[arg(long = "headless")]
    headless: bool,

    /// Glyph set (classic, fancy or auto)
    #[arg(short = 'g', long = "graphics")]
    graphics: Option<GraphicsMode>,

    /// Use the light color palette
    #[arg(long = "light")]
    light: bool,

    /// Configuration file (RON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over every loaded layer.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(variant) = self.variant {
            config.env.variant = variant;
        }
        if let Some(size) = self.size {
            config.env.size = size;
        }
        if let Some(step_penalty) = self.step_penalty {
            config.env.step_penalty = step_penalty;
        }
        if self.seed.is_some() {
            config.run.seed = self.seed;
        }
        if let Some(episodes) = self.episodes {
            config.run.episodes = episodes;
        }
        config.run.auto |= self.auto;
        config.run.headless |= self.headless;
        if let Some(graphics) = self.graphics {
            config.ui.graphics = graphics;
        }
        config.ui.light |= self.light;
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);

    let default_filter = if config.run.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let env_config = EnvConfig {
        render_mode: if config.run.headless {
            RenderMode::Headless
        } else {
            RenderMode::Human
        },
        ..config.env.clone()
    };
    let env = HauntedMansion::new(env_config).context("Failed to create environment")?;
    let policy_seed = config.run.seed.map(|seed| seed.wrapping_add(1));

    if config.run.headless {
        let mut app = App::new(env, policy_seed);
        run_episodes(&mut app, &config, |_| Ok(false))?;
        for summary in app.summaries() {
            println!("{}", describe(summary));
        }
        return Ok(());
    }

    let theme = if config.ui.light {
        Theme::light()
    } else {
        Theme::detect()
    };
    let renderer =
        TerminalRenderer::stdout(theme, config.ui.graphics).context("Failed to set up terminal")?;
    let mut app = App::new(env.with_renderer(Box::new(renderer)), policy_seed);

    let result = if config.run.auto {
        let delay = Duration::from_millis(1000 / u64::from(METADATA.render_fps.max(1)));
        run_episodes(&mut app, &config, |app| poll_quit(app, delay))
    } else {
        run_interactive(&mut app, config.run.seed)
    };

    // Restore the terminal before printing anything.
    app.env_mut().close()?;
    result?;
    for summary in app.summaries() {
        println!("{}", describe(summary));
    }
    Ok(())
}

/// Keyboard-driven play until the user quits.
fn run_interactive(app: &mut App, seed: Option<u64>) -> Result<()> {
    app.new_episode(seed)?;
    while !app.should_quit() {
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Resize(_, _) => app.env_mut().render()?,
            event => {
                if let Some(command) = app.handle_event(event) {
                    app.execute(command)?;
                }
            }
        }
    }
    Ok(())
}

/// Random-policy episodes. `pause` runs before every step and returns true
/// to stop early.
fn run_episodes(
    app: &mut App,
    config: &AppConfig,
    mut pause: impl FnMut(&mut App) -> Result<bool>,
) -> Result<()> {
    for episode in 0..config.run.episodes {
        let seed = if episode == 0 { config.run.seed } else { None };
        app.new_episode(seed)?;
        while app.env().steps() < config.run.max_steps {
            if pause(app)? {
                app.finish_episode();
                return Ok(());
            }
            if app.auto_step()?.terminated {
                break;
            }
        }
        app.finish_episode();
    }
    Ok(())
}

/// Wait one frame, returning true if the user asked to quit meanwhile.
fn poll_quit(app: &mut App, delay: Duration) -> Result<bool> {
    if event::poll(delay)? {
        if let Some(Command::Quit) = app.handle_event(event::read()?) {
            app.set_should_quit();
        }
    }
    Ok(app.should_quit())
}

fn describe(summary: &EpisodeSummary) -> String {
    format!(
        "episode {}: {} after {} steps, return {:.2}",
        summary.episode,
        if summary.escaped { "escaped" } else { "gave up" },
        summary.steps,
        summary.episode_return
    )
}

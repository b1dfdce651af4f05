//! Frame loop
//!
//! One iteration = poll input, simulate one frame, hand the frame to the
//! frontend for drawing. Window creation, key polling and draw calls belong
//! to the `Frontend`.

use std::collections::VecDeque;

use glam::Mat4;
use thiserror::Error;

use crate::level::{CanvasError, ConfigError, LevelLayout, LevelSource, classify};
use crate::renderer::{self, Vertex};
use crate::settings::SettingsError;
use crate::sim::{GameError, GameEvent, GameState, InputEvent, TickInput, tick};

/// Any failure that stops the program
#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("level config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("level editor: {0}")]
    Canvas(#[from] CanvasError),
}

/// Everything the frontend needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub projection: Mat4,
    pub clear_color: [f32; 4],
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            vertices: renderer::scene(state),
            projection: renderer::projection(state.settings.world_size()),
            clear_color: renderer::colors::BACKGROUND,
        }
    }
}

/// Input and output collaborator for the frame loop
pub trait Frontend {
    /// Key transitions since the last call
    fn poll_input(&mut self) -> Vec<InputEvent>;

    fn present(&mut self, frame: &Frame);

    /// Window closed or otherwise done
    fn should_close(&self) -> bool;
}

/// Frontend with no window: replays scripted input for a fixed number of frames
#[derive(Debug, Clone, Default)]
pub struct HeadlessFrontend {
    frames_left: u64,
    script: VecDeque<Vec<InputEvent>>,
    /// Frames presented so far
    pub presented: u64,
    /// Vertex count of the most recent frame
    pub last_vertex_count: usize,
}

impl HeadlessFrontend {
    pub fn new(frames: u64) -> Self {
        Self {
            frames_left: frames,
            ..Default::default()
        }
    }

    /// Queue input for successive frames (one entry per frame)
    pub fn with_script(mut self, script: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        self.script.extend(script);
        self
    }
}

impl Frontend for HeadlessFrontend {
    fn poll_input(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn present(&mut self, frame: &Frame) {
        self.presented += 1;
        self.frames_left = self.frames_left.saturating_sub(1);
        self.last_vertex_count = frame.vertices.len();
    }

    fn should_close(&self) -> bool {
        self.frames_left == 0
    }
}

/// Counters gathered over a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub deaths: u32,
    pub levels_loaded: u32,
    pub quit: bool,
}

/// Drive the game until the frontend closes or the player quits
pub fn run(
    state: &mut GameState,
    frontend: &mut dyn Frontend,
    source: &dyn LevelSource,
) -> Result<RunSummary, GameError> {
    let mut summary = RunSummary::default();

    while !frontend.should_close() {
        let input = TickInput {
            events: frontend.poll_input(),
        };

        for event in tick(state, &input, source)? {
            match event {
                GameEvent::Died { cause } => {
                    summary.deaths += 1;
                    log::debug!("Player died ({:?}) at tick {}", cause, state.time_ticks);
                }
                GameEvent::LevelLoaded { index } => {
                    summary.levels_loaded += 1;
                    log::info!("Reached level {}", index);
                }
                GameEvent::Landed => {}
                GameEvent::Quit => summary.quit = true,
            }
        }
        if summary.quit {
            break;
        }

        frontend.present(&Frame::capture(state));
        summary.frames += 1;
    }

    log::info!(
        "Stopped after {} frames on level {} ({} deaths)",
        summary.frames,
        state.current_level,
        summary.deaths
    );
    Ok(summary)
}

/// Load and classify every configured level without playing it
pub fn inspect_levels(
    state: &GameState,
    source: &dyn LevelSource,
) -> Result<Vec<LevelLayout>, GameError> {
    let world = state.settings.world_size();
    state
        .levels
        .levels
        .iter()
        .map(|entry| {
            let image = source.load(entry)?;
            Ok(classify(&image, entry, world)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{MemorySource, marker};
    use crate::settings::Settings;
    use crate::sim::Key;
    use crate::testutils::{config, paint, px};

    fn source() -> MemorySource {
        MemorySource::new()
            .with(
                "start.bmp",
                paint(
                    8,
                    6,
                    &[
                        (marker::PLATFORM, px(0, 5, 8, 1)),
                        (marker::PLAYER, px(1, 4, 1, 1)),
                        (marker::CHECKPOINT, px(6, 4, 1, 1)),
                        (marker::ENEMY, px(3, 2, 1, 1)),
                    ],
                ),
            )
            .with(
                "end.bmp",
                paint(
                    8,
                    6,
                    &[
                        (marker::PLATFORM, px(0, 5, 8, 1)),
                        (marker::PLAYER, px(1, 4, 1, 1)),
                    ],
                ),
            )
    }

    fn game() -> GameState {
        let levels = config(&[("start.bmp", &[1.0]), ("end.bmp", &[])]);
        GameState::new(Settings::default(), levels, &source()).unwrap()
    }

    #[test]
    fn test_headless_runs_requested_frames() {
        let mut state = game();
        let mut frontend = HeadlessFrontend::new(30);

        let summary = run(&mut state, &mut frontend, &source()).unwrap();
        assert_eq!(summary.frames, 30);
        assert_eq!(frontend.presented, 30);
        assert!(!summary.quit);
        // 1 platform + 1 checkpoint + 1 enemy + player
        assert_eq!(frontend.last_vertex_count, 4 * 6);
    }

    #[test]
    fn test_quit_ends_the_loop() {
        let mut state = game();
        let script = vec![Vec::new(), Vec::new(), vec![InputEvent::Pressed(Key::Quit)]];
        let mut frontend = HeadlessFrontend::new(100).with_script(script);

        let summary = run(&mut state, &mut frontend, &source()).unwrap();
        assert!(summary.quit);
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn test_walking_to_the_checkpoint_loads_next_level() {
        let mut state = game();
        let script = std::iter::once(vec![InputEvent::Pressed(Key::Right)]);
        let mut frontend = HeadlessFrontend::new(120).with_script(script);

        let summary = run(&mut state, &mut frontend, &source()).unwrap();
        assert_eq!(summary.levels_loaded, 1);
        assert_eq!(state.current_level, 1);
    }

    #[test]
    fn test_frame_draws_player_last() {
        let state = game();
        let frame = Frame::capture(&state);
        let last = frame.vertices.last().unwrap();
        assert_eq!(last.color, renderer::colors::PLAYER);
        assert_eq!(frame.vertices[0].color, renderer::colors::PLATFORM);
    }

    #[test]
    fn test_inspect_levels() {
        let state = game();
        let layouts = inspect_levels(&state, &source()).unwrap();
        assert_eq!(layouts.len(), 2);
        assert_eq!(layouts[0].checkpoints.len(), 1);
        assert!(layouts[1].enemies.is_empty());
    }
}

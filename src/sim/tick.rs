//! Per-frame simulation step
//!
//! Order within a frame: input, gravity, player integration, world bounds,
//! platforms, checkpoints, enemies, enemy patrol.

use super::collision::{Contact, resolve_enemy_platform, resolve_player_platform, touches};
use super::state::{DeathCause, GameError, GameEvent, GameState};
use crate::level::LevelSource;
use crate::settings::TriggerMode;

/// Logical keys delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Quit,
}

/// A discrete key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn pressed(key: Key) -> Self {
        Self {
            events: vec![InputEvent::Pressed(key)],
        }
    }
}

/// Apply one input event to the player. Returns false on quit.
pub fn apply_input(state: &mut GameState, event: InputEvent) -> bool {
    let speed = state.settings.player_speed;
    let player = &mut state.player;
    match event {
        InputEvent::Pressed(Key::Quit) => return false,
        InputEvent::Pressed(Key::Left) => player.vel.x = -speed,
        InputEvent::Pressed(Key::Right) => player.vel.x = speed,
        InputEvent::Released(Key::Left | Key::Right) => player.vel.x = 0.0,
        InputEvent::Pressed(Key::Jump) => {
            player.jump(state.settings.jump_force);
        }
        InputEvent::Released(Key::Jump | Key::Quit) => {}
    }
    true
}

/// How many level advances a checkpoint pass fires.
///
/// `contacts` is the number of checkpoints overlapped this frame and
/// `was_touching` whether any were overlapped on the previous pass.
pub fn checkpoint_advances(mode: TriggerMode, contacts: usize, was_touching: bool) -> usize {
    match mode {
        TriggerMode::Edge => usize::from(contacts > 0 && !was_touching),
        TriggerMode::Level => contacts,
    }
}

/// Advance the game state by one frame
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    source: &dyn LevelSource,
) -> Result<Vec<GameEvent>, GameError> {
    let mut events = Vec::new();

    for &event in &input.events {
        if !apply_input(state, event) {
            events.push(GameEvent::Quit);
            return Ok(events);
        }
    }

    state.time_ticks += 1;
    step_player(state);

    if resolve_collisions(state, source, &mut events)? {
        // The level was replaced mid-pass
        return Ok(events);
    }

    update_enemies(state);
    Ok(events)
}

fn step_player(state: &mut GameState) {
    let player = &mut state.player;
    player.vel.y += state.settings.gravity;
    player.rect.x += player.vel.x;
    player.rect.y += player.vel.y;
}

/// Resolve the player against the world. Returns true if a level was loaded.
fn resolve_collisions(
    state: &mut GameState,
    source: &dyn LevelSource,
    events: &mut Vec<GameEvent>,
) -> Result<bool, GameError> {
    let world = state.settings.world_size();

    if state.player.rect.bottom() > world.y {
        state.player.respawn();
        events.push(GameEvent::Died {
            cause: DeathCause::FellOut,
        });
    }

    let player = &mut state.player;
    if player.rect.x < 0.0 {
        player.rect.x = 0.0;
    } else if player.rect.right() > world.x {
        player.rect.x = world.x - player.rect.width;
    }

    // Grounded is recomputed each frame from this pass
    let was_grounded = player.on_ground;
    player.on_ground = false;
    let mut contact = Contact::NONE;
    for platform in &state.platforms {
        contact |= resolve_player_platform(player, platform);
    }
    if contact.contains(Contact::TOP) && !was_grounded {
        events.push(GameEvent::Landed);
    }

    let contacts = state.checkpoint_contacts();
    let advances = checkpoint_advances(
        state.settings.checkpoint_trigger,
        contacts,
        state.touching_checkpoint,
    );
    state.touching_checkpoint = contacts > 0;
    if advances > 0 {
        for _ in 0..advances {
            let next = state.current_level + 1;
            state.load_level(next, source)?;
            events.push(GameEvent::LevelLoaded { index: next });
        }
        return Ok(true);
    }

    if state
        .enemies
        .iter()
        .any(|enemy| touches(&state.player.rect, &enemy.rect))
    {
        state.player.respawn();
        events.push(GameEvent::Died {
            cause: DeathCause::Enemy,
        });
    }

    Ok(false)
}

fn update_enemies(state: &mut GameState) {
    let world_width = state.settings.window_width;
    for enemy in &mut state.enemies {
        enemy.rect.x += enemy.vel.x;
        if enemy.rect.x < 0.0 || enemy.rect.right() > world_width {
            enemy.vel.x = -enemy.vel.x;
        }
        for platform in &state.platforms {
            resolve_enemy_platform(enemy, platform);
        }
    }
}

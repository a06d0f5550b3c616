use bevy_ecs::event::Events;
use bevy_ecs::prelude::*;
use log::{debug, error, info, trace};

use crate::components::{Board, CurrentLevel, HintOutcome, LevelSolved, TileAction};
use crate::content::LevelData;
use crate::game::SMALL_GRID_SIZE;

/// Replaces the board with a freshly shuffled one for `level`.
///
/// Whatever was on the previous board, including a pending selection or swap, is
/// discarded along with any win event it had not delivered yet.
pub fn spawn_level(world: &mut World, level: &LevelData, settle_delay: f32, rng: &mut fastrand::Rng) {
    let board = Board::shuffled(level.grid_size, rng).or_else(|e| {
        error!("Cannot deal level {} ({e}), using a {SMALL_GRID_SIZE}x{SMALL_GRID_SIZE} board", level.id);
        Board::shuffled(SMALL_GRID_SIZE, rng)
    });
    let Ok(board) = board else {
        return;
    };

    world.init_resource::<Events<LevelSolved>>();
    world.resource_mut::<Events<LevelSolved>>().clear();

    info!(
        "Level {} \"{}\" on a {}x{} board",
        level.id,
        level.theme,
        board.grid_size(),
        board.grid_size()
    );
    world.insert_resource(CurrentLevel {
        data: level.clone(),
        palette: level.palette(),
    });
    world.insert_resource(board.with_settle_delay(settle_delay));

    // A shuffle can land on the solution; that still counts as a win
    let solved_on_arrival = world.resource_mut::<Board>().take_win_signal();
    if solved_on_arrival {
        debug!("Level {} was dealt already solved", level.id);
        emit_solved(world);
    }
}

/// Drops the board, e.g. while the next level is loading.
pub fn despawn_level(world: &mut World) {
    world.remove_resource::<Board>();
    world.remove_resource::<CurrentLevel>();
    if let Some(mut events) = world.get_resource_mut::<Events<LevelSolved>>() {
        events.clear();
    }
}

pub fn tile_click_system(world: &mut World, tile_id: usize) -> TileAction {
    let action = match world.get_resource_mut::<Board>() {
        Some(mut board) => board.select_or_swap(tile_id),
        None => return TileAction::Ignored,
    };
    debug!("Tile {tile_id} clicked: {action:?}");

    if let TileAction::Swapped { solved: true, .. } = action {
        emit_solved(world);
    }
    action
}

pub fn hint_system(world: &mut World) -> HintOutcome {
    let outcome = match world.get_resource_mut::<Board>() {
        Some(mut board) => board.apply_hint(),
        None => return HintOutcome::default(),
    };
    debug!("Hint fixed tiles {:?}", outcome.fixed);

    if outcome.solved {
        emit_solved(world);
    }
    outcome
}

/// Advances the swap settle window.
pub fn settle_system(world: &mut World, delta_seconds: f32) {
    if let Some(mut board) = world.get_resource_mut::<Board>() {
        if board.is_swapping() {
            trace!("Settling swap ({delta_seconds:.3}s)");
            board.tick(delta_seconds);
        }
    }
}

/// Takes the pending win event, if any.
pub fn take_level_solved(world: &mut World) -> Option<LevelSolved> {
    let mut events = world.get_resource_mut::<Events<LevelSolved>>()?;
    events.drain().last()
}

fn emit_solved(world: &mut World) {
    let level = world
        .get_resource::<CurrentLevel>()
        .map_or(0, |current| current.data.id);
    info!("Level {level} solved");

    world.init_resource::<Events<LevelSolved>>();
    world
        .resource_mut::<Events<LevelSolved>>()
        .send(LevelSolved { level });
}

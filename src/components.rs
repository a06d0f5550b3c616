#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Grid sizes are tiny, so float conversions for gradient sampling never lose anything visible
    clippy::cast_precision_loss,
    // Color channels are clamped to 0..=255 before the cast back to u8
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use bevy_ecs::prelude::*;
use thiserror::Error;

use crate::content::LevelData;
use crate::game::{HINT_TILE_LIMIT, MIN_GRID_SIZE, PALETTE_SIZE, SETTLE_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `#RGB`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            6 => {
                let value = u32::from_str_radix(digits, 16).ok()?;
                Some(Self::new(
                    (value >> 16) as u8,
                    (value >> 8) as u8,
                    value as u8,
                ))
            }
            3 => {
                let value = u16::from_str_radix(digits, 16).ok()?;
                let expand = |nibble: u16| (nibble & 0xF) as u8 * 17;
                Some(Self::new(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`, `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| {
            (f32::from(a) + (f32::from(b) - f32::from(a)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    /// Perceived brightness, used to pick a readable label color.
    #[must_use]
    pub fn is_light(self) -> bool {
        let luma = 0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b);
        luma > 150.0
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(color: Rgb) -> Self {
        ratatui::style::Color::Rgb(color.r, color.g, color.b)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaletteError {
    #[error("expected {PALETTE_SIZE} colors, got {0}")]
    WrongLength(usize),
    #[error("invalid color {0:?}")]
    InvalidColor(String),
}

/// The four gradient stops of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette([Rgb; PALETTE_SIZE]);

impl Palette {
    #[must_use]
    pub const fn new(colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self(colors)
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, PaletteError> {
        if colors.len() != PALETTE_SIZE {
            return Err(PaletteError::WrongLength(colors.len()));
        }

        let mut parsed = [Rgb::new(0, 0, 0); PALETTE_SIZE];
        for (slot, raw) in parsed.iter_mut().zip(colors) {
            let raw = raw.as_ref();
            *slot = Rgb::from_hex(raw).ok_or_else(|| PaletteError::InvalidColor(raw.to_string()))?;
        }
        Ok(Self(parsed))
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.0
    }

    /// Samples the gradient with evenly spaced stops. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let segments = (PALETTE_SIZE - 1) as f32;
        let scaled = t * segments;
        let index = (scaled.floor() as usize).min(PALETTE_SIZE - 2);
        self.0[index].lerp(self.0[index + 1], scaled - index as f32)
    }
}

/// Fill color of the tile whose correct slot is `tile_id`.
///
/// This samples a diagonal gradient at the tile's *correct* row and column, so a tile
/// carries its fragment of the picture wherever it currently sits. The current slot is
/// deliberately not an input.
#[must_use]
pub fn tile_decoration(tile_id: usize, grid_size: usize, palette: &Palette) -> Rgb {
    if grid_size < MIN_GRID_SIZE {
        return palette.sample(0.0);
    }
    let row = tile_id / grid_size;
    let col = tile_id % grid_size;
    let span = 2 * (grid_size - 1);
    palette.sample((row + col) as f32 / span as f32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Correct slot, fixed for the tile's lifetime.
    pub id: usize,
    /// Slot the tile currently occupies.
    pub current_pos: usize,
}

impl Tile {
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.id == self.current_pos
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleStatus {
    Scrambled,
    InProgress,
    Solved,
}

/// What a tile click did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction {
    Ignored,
    Selected(usize),
    Deselected(usize),
    Swapped {
        first: usize,
        second: usize,
        /// True only for the move that completed the puzzle.
        solved: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintOutcome {
    /// Tiles moved onto their correct slot, in the order they were fixed.
    pub fixed: Vec<usize>,
    pub solved: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("grid size {0} is too small, need at least {MIN_GRID_SIZE}")]
    GridTooSmall(usize),
    #[error("expected {expected} tile positions, got {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("tile positions are not a permutation of the board slots")]
    NotAPermutation,
}

/// Sent once when a level's board becomes solved.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSolved {
    pub level: u32,
}

/// The level currently on the board, kept next to the board for rendering.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub data: LevelData,
    pub palette: Palette,
}

/// Swap puzzle state. Tiles are stored in id order, so `tiles[i].id == i`.
///
/// The `current_pos` values always form a permutation of `0..grid_size²`; every
/// mutation is a pairwise exchange of two tiles' slots.
#[derive(Resource, Debug, Clone)]
pub struct Board {
    grid_size: usize,
    tiles: Vec<Tile>,
    selected: Option<usize>,
    settle_delay: f32,
    settle_remaining: Option<f32>,
    touched: bool,
    win_signalled: bool,
}

impl Board {
    /// A solved board.
    pub fn new(grid_size: usize) -> Result<Self, BoardError> {
        if grid_size < MIN_GRID_SIZE {
            return Err(BoardError::GridTooSmall(grid_size));
        }
        let count = grid_size * grid_size;
        Ok(Self {
            grid_size,
            tiles: (0..count)
                .map(|id| Tile {
                    id,
                    current_pos: id,
                })
                .collect(),
            selected: None,
            settle_delay: SETTLE_DELAY,
            settle_remaining: None,
            touched: false,
            win_signalled: false,
        })
    }

    /// A uniformly shuffled board.
    ///
    /// Runs Fisher-Yates over the slot values. The identity is a legal outcome and is
    /// kept as is.
    pub fn shuffled(grid_size: usize, rng: &mut fastrand::Rng) -> Result<Self, BoardError> {
        let mut board = Self::new(grid_size)?;
        for i in (1..board.tiles.len()).rev() {
            let j = rng.usize(0..=i);
            board.exchange(i, j);
        }
        Ok(board)
    }

    /// Rebuilds a board from `positions[id] = current slot`.
    pub fn from_positions(grid_size: usize, positions: &[usize]) -> Result<Self, BoardError> {
        let mut board = Self::new(grid_size)?;
        let expected = board.tiles.len();
        if positions.len() != expected {
            return Err(BoardError::WrongTileCount {
                expected,
                found: positions.len(),
            });
        }

        let mut seen = vec![false; expected];
        for &pos in positions {
            if pos >= expected || seen[pos] {
                return Err(BoardError::NotAPermutation);
            }
            seen[pos] = true;
        }

        for (tile, &pos) in board.tiles.iter_mut().zip(positions) {
            tile.current_pos = pos;
        }
        Ok(board)
    }

    #[must_use]
    pub fn with_settle_delay(mut self, seconds: f32) -> Self {
        self.settle_delay = seconds.max(0.0);
        self
    }

    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// The tile occupying `slot`.
    #[must_use]
    pub fn tile_at(&self, slot: usize) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.current_pos == slot)
    }

    /// Snapshot of `positions[id] = current slot`, the inverse of [`Board::from_positions`].
    #[must_use]
    pub fn positions(&self) -> Vec<usize> {
        self.tiles.iter().map(|tile| tile.current_pos).collect()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// True while a swap is settling; clicks are ignored meanwhile.
    #[must_use]
    pub fn is_swapping(&self) -> bool {
        self.settle_remaining.is_some()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_placed)
    }

    /// Ids of misplaced tiles, ascending.
    #[must_use]
    pub fn misplaced(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .filter(|tile| !tile.is_placed())
            .map(|tile| tile.id)
            .collect()
    }

    #[must_use]
    pub fn misplaced_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_placed()).count()
    }

    #[must_use]
    pub fn status(&self) -> PuzzleStatus {
        if self.is_solved() {
            PuzzleStatus::Solved
        } else if self.touched {
            PuzzleStatus::InProgress
        } else {
            PuzzleStatus::Scrambled
        }
    }

    /// Click handling: select, toggle off, or swap with the selected tile.
    pub fn select_or_swap(&mut self, tile_id: usize) -> TileAction {
        if self.is_swapping() || tile_id >= self.tiles.len() {
            return TileAction::Ignored;
        }
        self.touched = true;

        match self.selected {
            None => {
                self.selected = Some(tile_id);
                TileAction::Selected(tile_id)
            }
            Some(selected) if selected == tile_id => {
                self.selected = None;
                TileAction::Deselected(tile_id)
            }
            Some(selected) => {
                self.exchange(selected, tile_id);
                self.settle_remaining = Some(self.settle_delay);
                TileAction::Swapped {
                    first: selected,
                    second: tile_id,
                    solved: self.take_win_signal(),
                }
            }
        }
    }

    /// Exchanges whatever occupies two slots, without selection or settle window.
    pub fn swap_slots(&mut self, slot_a: usize, slot_b: usize) -> TileAction {
        let count = self.tiles.len();
        if slot_a >= count || slot_b >= count || slot_a == slot_b {
            return TileAction::Ignored;
        }
        let (Some(first), Some(second)) = (self.occupant(slot_a), self.occupant(slot_b)) else {
            return TileAction::Ignored;
        };

        self.touched = true;
        self.exchange(first, second);
        TileAction::Swapped {
            first,
            second,
            solved: self.take_win_signal(),
        }
    }

    /// Moves up to [`HINT_TILE_LIMIT`] misplaced tiles home, lowest ids first.
    ///
    /// A hint leaves the status category alone unless it completes the board.
    ///
    /// Each fix reads the live board, so an earlier fix in the same call can change who
    /// occupies a later tile's slot.
    pub fn apply_hint(&mut self) -> HintOutcome {
        self.selected = None;

        let targets: Vec<usize> = self
            .tiles
            .iter()
            .filter(|tile| !tile.is_placed())
            .take(HINT_TILE_LIMIT)
            .map(|tile| tile.id)
            .collect();
        if targets.is_empty() {
            return HintOutcome::default();
        }

        let mut fixed = Vec::with_capacity(targets.len());
        for id in targets {
            if self.tiles[id].is_placed() {
                continue;
            }
            if let Some(occupant) = self.occupant(id) {
                self.exchange(id, occupant);
                fixed.push(id);
            }
        }

        HintOutcome {
            fixed,
            solved: self.take_win_signal(),
        }
    }

    /// Advances the settle window; once it elapses the guard and selection clear.
    pub fn tick(&mut self, delta_seconds: f32) {
        if let Some(remaining) = self.settle_remaining {
            let remaining = remaining - delta_seconds;
            if remaining <= 0.0 {
                self.settle_remaining = None;
                self.selected = None;
            } else {
                self.settle_remaining = Some(remaining);
            }
        }
    }

    /// True exactly once per board: the first time it is asked while solved.
    pub fn take_win_signal(&mut self) -> bool {
        if !self.win_signalled && self.is_solved() {
            self.win_signalled = true;
            true
        } else {
            false
        }
    }

    fn occupant(&self, slot: usize) -> Option<usize> {
        self.tile_at(slot).map(|tile| tile.id)
    }

    fn exchange(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let pos_a = self.tiles[a].current_pos;
        self.tiles[a].current_pos = self.tiles[b].current_pos;
        self.tiles[b].current_pos = pos_a;
    }
}

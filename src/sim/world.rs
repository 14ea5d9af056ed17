/// World: the authoritative mutable state of a running game.
///
/// Owns the one grid, the player, the warden list, the session RNG stream,
/// and the most recently computed pursuit path. All tile mutation during
/// play funnels through `move_player` / `advance_wardens` /
/// `force_player_position`, which keep the entity positions and the tiles
/// underneath them in sync.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entity::{AvatarStyle, Player, Warden};
use crate::domain::geom::Position;
use crate::domain::grid::Grid;
use crate::domain::path::shortest_path;
use crate::domain::tile::Tile;
use crate::sim::generator::DungeonGenerator;

/// Result of a player move request.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Step taken; tiles and position updated.
    Moved,
    /// Out of bounds or unwalkable destination. Nothing changed.
    Blocked,
    /// Destination is the exit. The player stays put; the session decides
    /// what winning looks like.
    ReachedExit,
}

/// Result of one warden advance tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PursuitOutcome {
    /// The warden stepped one cell along its path.
    Advanced,
    /// The warden is adjacent; the player is caught. No movement.
    Caught,
    /// No route to the player this tick; cached path cleared.
    NoRoute,
    /// Nothing to do: no wardens registered, or one already shares the
    /// player's cell.
    Idle,
}

pub struct World {
    grid: Grid,
    player: Player,
    wardens: Vec<Warden>,
    rng: StdRng,
    last_path: Vec<Position>,
    avatar: AvatarStyle,
}

impl World {
    /// Wrap a generated or deserialized grid. The player starts on the
    /// first floor tile in x-outer/y-inner scan order, falling back to
    /// (0, 0) on a grid with no floor at all.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        let start = Self::first_floor(&grid).unwrap_or(Position::new(0, 0));
        let mut world = World {
            grid,
            player: Player::new(start),
            wardens: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            last_path: Vec::new(),
            avatar: AvatarStyle::Classic,
        };
        world.stamp_avatar();
        world
    }

    /// Build a complete fresh game: generate the dungeon, seat the player,
    /// release one warden on a random floor tile, then stamp the single
    /// exit on another.
    pub fn new_game(width: i32, height: i32, seed: u64, style: AvatarStyle) -> Self {
        let grid = DungeonGenerator::generate(width, height, seed);
        let mut world = World::from_grid(grid, seed);
        world.set_avatar_style(style);

        let lair = world.random_floor_tile();
        world.add_warden(Warden::new(lair));

        let exit = world.random_floor_tile();
        world.set_tile(exit.x, exit.y, Tile::Exit);

        world
    }

    fn first_floor(grid: &Grid) -> Option<Position> {
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                if grid.get(x, y) == Tile::Floor {
                    return Some(Position::new(x, y));
                }
            }
        }
        None
    }

    // ── Player movement ──

    /// Try to step the player by one cell. `(dx, dy)` is a unit axis step.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        debug_assert!(dx.abs() + dy.abs() == 1, "move must be a unit axis step");

        let current = self.player.position();
        let next = current.offset(dx, dy);

        if !self.grid.in_bounds(next.x, next.y) {
            return MoveOutcome::Blocked;
        }
        let dest = self.grid.get_pos(next);
        if !dest.is_walkable() {
            return MoveOutcome::Blocked;
        }
        if dest == Tile::Exit {
            // Winning is signalled, not stepped onto: the exit tile stays
            // intact for rendering and for saves taken at the threshold.
            return MoveOutcome::ReachedExit;
        }

        self.grid.set_pos(current, Tile::Floor);
        self.grid.set_pos(next, self.avatar.tile());
        self.player.set_position(next);
        MoveOutcome::Moved
    }

    /// Relocate the player without walkability checks. Load-time only:
    /// the caller vouches that `p` is a sensible cell.
    pub fn force_player_position(&mut self, p: Position) {
        let current = self.player.position();
        if self.grid.in_bounds(current.x, current.y) {
            self.grid.set_pos(current, Tile::Floor);
        }
        if self.grid.in_bounds(p.x, p.y) {
            self.player.set_position(p);
            self.stamp_avatar();
        }
    }

    // ── Pursuit ──

    /// Advance the hunt by one tick.
    ///
    /// Only the first registered warden ever moves; any further wardens
    /// are static scenery. That mirrors the behavior this game was built
    /// around and is deliberate; see DESIGN.md.
    pub fn advance_wardens(&mut self) -> PursuitOutcome {
        if self.wardens.is_empty() {
            return PursuitOutcome::Idle;
        }

        let start = self.wardens[0].position();
        let goal = self.player.position();

        let Some(path) = shortest_path(&self.grid, start, goal) else {
            self.last_path.clear();
            return PursuitOutcome::NoRoute;
        };

        self.last_path = path.clone();
        let Some(&next) = path.first() else {
            // Sharing the player's cell already; nothing to advance.
            return PursuitOutcome::Idle;
        };

        if next == goal {
            // Adjacent: the warden reaches out instead of stepping onto
            // the player's tile.
            return PursuitOutcome::Caught;
        }

        self.grid.set_pos(start, Tile::Floor);
        self.wardens[0].set_position(next);
        self.grid.set_pos(next, Tile::Warden);
        PursuitOutcome::Advanced
    }

    /// Register a warden and stamp its tile.
    pub fn add_warden(&mut self, warden: Warden) {
        let p = warden.position();
        if self.grid.in_bounds(p.x, p.y) {
            self.grid.set_pos(p, Tile::Warden);
        }
        self.wardens.push(warden);
    }

    // ── Random sampling ──

    /// A uniformly random floor cell, never the player's own. Draws from
    /// the world-owned RNG stream by rejection; the up-front scan exists
    /// only to fail fast (instead of spinning forever) when a caller
    /// violates the at-least-one-eligible-floor precondition.
    pub fn random_floor_tile(&mut self) -> Position {
        let player = self.player.position();
        let any_eligible = (0..self.grid.width()).any(|x| {
            (0..self.grid.height()).any(|y| {
                self.grid.get(x, y) == Tile::Floor && Position::new(x, y) != player
            })
        });
        assert!(
            any_eligible,
            "random_floor_tile: no floor cell available besides the player's"
        );

        loop {
            let x = self.rng.gen_range(0..self.grid.width());
            let y = self.rng.gen_range(0..self.grid.height());
            let p = Position::new(x, y);
            if self.grid.get_pos(p) == Tile::Floor && p != player {
                return p;
            }
        }
    }

    // ── Avatar style ──

    /// Switch the avatar look and restamp the tile under the player.
    pub fn set_avatar_style(&mut self, style: AvatarStyle) {
        self.avatar = style;
        self.stamp_avatar();
    }

    #[allow(dead_code)]
    pub fn avatar_style(&self) -> AvatarStyle {
        self.avatar
    }

    fn stamp_avatar(&mut self) {
        let p = self.player.position();
        if self.grid.in_bounds(p.x, p.y) {
            self.grid.set_pos(p, self.avatar.tile());
        }
    }

    // ── Read access ──

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.grid.get(x, y)
    }

    /// Direct tile write, for session-level setup such as exit placement.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        self.grid.set(x, y, tile);
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.in_bounds(x, y)
    }

    pub fn player_position(&self) -> Position {
        self.player.position()
    }

    pub fn wardens(&self) -> &[Warden] {
        &self.wardens
    }

    /// The pursuit path computed by the most recent advance, for the
    /// renderer's overlay. Empty when there was none.
    pub fn last_path(&self) -> &[Position] {
        &self.last_path
    }
}

/// Seeded dungeon generation.
///
/// Pipeline: all-Void grid → sample non-overlapping rooms → chain rooms
/// left-to-right with L corridors → stamp floors → derive walls from floor
/// adjacency. Identical (width, height, seed) inputs always produce an
/// identical grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::geom::{Corridor, Room};
use crate::domain::grid::Grid;
use crate::domain::tile::Tile;

const MIN_ROOMS: i32 = 16;
const MAX_ROOMS: i32 = 23;
const MIN_ROOM_WIDTH: i32 = 4;
const MAX_ROOM_WIDTH: i32 = 10;
const MIN_ROOM_HEIGHT: i32 = 3;
const MAX_ROOM_HEIGHT: i32 = 8;

pub struct DungeonGenerator {
    width: i32,
    height: i32,
    rng: StdRng,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    grid: Grid,
}

impl DungeonGenerator {
    /// Generate a dungeon grid. The generator owns its RNG stream, so
    /// concurrent generations in one process never interfere.
    pub fn generate(width: i32, height: i32, seed: u64) -> Grid {
        let mut gen = DungeonGenerator {
            width,
            height,
            rng: StdRng::seed_from_u64(seed),
            rooms: Vec::new(),
            corridors: Vec::new(),
            grid: Grid::new(width, height),
        };
        gen.place_rooms();
        gen.connect_rooms();
        gen.stamp_rooms();
        gen.stamp_corridors();
        gen.derive_walls();
        gen.grid
    }

    /// Sample rooms until the target count is reached or the attempt cap
    /// runs out. Every sample burns one attempt whether or not it lands,
    /// so generation terminates even on seeds where placement keeps
    /// colliding; an under-populated dungeon is a valid outcome.
    fn place_rooms(&mut self) {
        let target = self.rng.gen_range(MIN_ROOMS..MAX_ROOMS);
        let mut attempts = 0;

        while (self.rooms.len() as i32) < target && attempts < target * MAX_ROOM_WIDTH {
            attempts += 1;

            let w = self.rng.gen_range(MIN_ROOM_WIDTH..MAX_ROOM_WIDTH);
            let h = self.rng.gen_range(MIN_ROOM_HEIGHT..MAX_ROOM_HEIGHT);

            // Corner range keeping the room inside a 1-tile border margin.
            // Too-small grids make the range empty; the attempt just fails.
            if self.width - w - 1 <= 1 || self.height - h - 1 <= 1 {
                continue;
            }
            let x = self.rng.gen_range(1..self.width - w - 1);
            let y = self.rng.gen_range(1..self.height - h - 1);

            let candidate = Room::new(x, y, w, h);
            if !self.overlaps(&candidate) {
                self.rooms.push(candidate);
            }
        }
    }

    fn overlaps(&self, candidate: &Room) -> bool {
        self.rooms.iter().any(|r| r.intersects(candidate))
    }

    /// Order rooms by ascending center-x and connect each consecutive pair
    /// with one corridor. The chain links every room transitively.
    fn connect_rooms(&mut self) {
        if self.rooms.len() < 2 {
            return;
        }

        let mut ordered = self.rooms.clone();
        ordered.sort_by_key(|r| r.center().x); // stable: ties keep insertion order

        for pair in ordered.windows(2) {
            self.corridors
                .push(Corridor::between(pair[0].center(), pair[1].center()));
        }
    }

    fn stamp_rooms(&mut self) {
        for room in &self.rooms {
            for x in room.x..room.x + room.width {
                for y in room.y..room.y + room.height {
                    self.grid.set(x, y, Tile::Floor);
                }
            }
        }
    }

    /// Corridor cells become floor only where the grid is still void, so a
    /// corridor crossing a room never disturbs what is already there.
    fn stamp_corridors(&mut self) {
        for corridor in &self.corridors {
            for &p in corridor.cells() {
                if self.grid.in_bounds(p.x, p.y) && self.grid.get_pos(p) == Tile::Void {
                    self.grid.set_pos(p, Tile::Floor);
                }
            }
        }
    }

    /// Single order-independent pass: any void cell touching floor in its
    /// 8-neighborhood becomes wall.
    fn derive_walls(&mut self) {
        for x in 0..self.width {
            for y in 0..self.height {
                if self.grid.get(x, y) != Tile::Void {
                    continue;
                }
                let mut touches_floor = false;
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        if self.grid.get(x + dx, y + dy) == Tile::Floor {
                            touches_floor = true;
                        }
                    }
                }
                if touches_floor {
                    self.grid.set(x, y, Tile::Wall);
                }
            }
        }
    }
}

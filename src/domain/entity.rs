/// Entities: the player and the wardens that hunt them.
/// Both are just positions; everything they "are" lives in the grid tiles.

use crate::domain::geom::Position;
use crate::domain::tile::Tile;

/// Which of the two avatar looks the session uses. Purely visual; both
/// variants move identically.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AvatarStyle {
    Classic,
    Alt,
}

impl AvatarStyle {
    pub fn tile(self) -> Tile {
        match self {
            AvatarStyle::Classic => Tile::Avatar,
            AvatarStyle::Alt => Tile::AvatarAlt,
        }
    }

    pub fn toggled(self) -> AvatarStyle {
        match self {
            AvatarStyle::Classic => AvatarStyle::Alt,
            AvatarStyle::Alt => AvatarStyle::Classic,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    position: Position,
}

impl Player {
    pub fn new(start: Position) -> Self {
        Player { position: start }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, p: Position) {
        self.position = p;
    }
}

/// A pursuing warden. Moves one BFS step at a time toward the player.
#[derive(Clone, Debug)]
pub struct Warden {
    position: Position,
}

impl Warden {
    pub fn new(start: Position) -> Self {
        Warden { position: start }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, p: Position) {
        self.position = p;
    }
}

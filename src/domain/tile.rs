/// Tile kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.
///
/// Every kind carries a stable numeric id used by the save format.
/// The table is frozen: saves written today must load forever:
///
///   Void=0  Floor=1  Wall=2  Avatar=3  AvatarAlt=4
///   Exit=5  Warden=6  PathMark=7

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Void,
    Floor,
    Wall,
    /// The player's cell.
    Avatar,
    /// Alternate look for the player's cell. Same behavior as Avatar.
    AvatarAlt,
    Exit,
    /// The pursuing warden's cell.
    Warden,
    /// Pursuit-path overlay glyph. Drawn by the renderer, never stored
    /// in a live grid.
    PathMark,
}

impl Tile {
    /// Stable save-format id.
    pub fn id(self) -> u8 {
        match self {
            Tile::Void => 0,
            Tile::Floor => 1,
            Tile::Wall => 2,
            Tile::Avatar => 3,
            Tile::AvatarAlt => 4,
            Tile::Exit => 5,
            Tile::Warden => 6,
            Tile::PathMark => 7,
        }
    }

    /// Reverse of `id`. Unknown ids decode as Void so stale or corrupt
    /// saves degrade instead of failing.
    pub fn from_id(id: u8) -> Tile {
        match id {
            1 => Tile::Floor,
            2 => Tile::Wall,
            3 => Tile::Avatar,
            4 => Tile::AvatarAlt,
            5 => Tile::Exit,
            6 => Tile::Warden,
            7 => Tile::PathMark,
            _ => Tile::Void,
        }
    }

    /// Can the player step onto this tile? Walls and the void never yield.
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Wall | Tile::Void)
    }

    /// Is this one of the two player-avatar variants?
    #[allow(dead_code)]
    pub fn is_avatar(self) -> bool {
        matches!(self, Tile::Avatar | Tile::AvatarAlt)
    }

    /// HUD description.
    pub fn description(self) -> &'static str {
        match self {
            Tile::Void => "nothing",
            Tile::Floor => "floor",
            Tile::Wall => "wall",
            Tile::Avatar => "you",
            Tile::AvatarAlt => "you, disguised",
            Tile::Exit => "way out",
            Tile::Warden => "the warden",
            Tile::PathMark => "scent trail",
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Void
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Tile; 8] = [
        Tile::Void,
        Tile::Floor,
        Tile::Wall,
        Tile::Avatar,
        Tile::AvatarAlt,
        Tile::Exit,
        Tile::Warden,
        Tile::PathMark,
    ];

    #[test]
    fn ids_are_frozen() {
        // The save format depends on these exact values.
        assert_eq!(Tile::Void.id(), 0);
        assert_eq!(Tile::Floor.id(), 1);
        assert_eq!(Tile::Wall.id(), 2);
        assert_eq!(Tile::Avatar.id(), 3);
        assert_eq!(Tile::AvatarAlt.id(), 4);
        assert_eq!(Tile::Exit.id(), 5);
        assert_eq!(Tile::Warden.id(), 6);
        assert_eq!(Tile::PathMark.id(), 7);
    }

    #[test]
    fn id_round_trip() {
        for t in ALL {
            assert_eq!(Tile::from_id(t.id()), t);
        }
    }

    #[test]
    fn unknown_id_decodes_as_void() {
        assert_eq!(Tile::from_id(8), Tile::Void);
        assert_eq!(Tile::from_id(255), Tile::Void);
    }

    #[test]
    fn walkability() {
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Void.is_walkable());
        assert!(Tile::Floor.is_walkable());
        assert!(Tile::Exit.is_walkable());
        assert!(Tile::Warden.is_walkable());
    }
}

/// Presentation layer: crossterm terminal drawing.
///
/// Frames are rebuilt in full each render: the world is small and the
/// game turn-based, so the diffing a real-time renderer would need buys
/// nothing here. All commands are batched with `queue!` into one buffered
/// writer and flushed once per frame.
///
/// The lamp and the pursuit-path overlay are view effects: they shade or
/// re-glyph what gets drawn without ever touching the world's grid.

use std::collections::HashSet;
use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::entity::AvatarStyle;
use crate::domain::geom::Position;
use crate::domain::tile::Tile;
use crate::sim::world::World;

/// Rows reserved above the map for the HUD.
const MAP_ROW: u16 = 2;

/// Session-level display switches, owned by the game loop.
pub struct ViewOptions {
    pub lamp_on: bool,
    pub lamp_radius: i32,
    pub show_path: bool,
    pub seed: u64,
}

fn glyph(tile: Tile) -> (char, Color) {
    match tile {
        Tile::Void => (' ', Color::Black),
        Tile::Floor => ('·', Color::DarkGrey),
        Tile::Wall => ('#', Color::Grey),
        Tile::Avatar => ('@', Color::Yellow),
        Tile::AvatarAlt => ('@', Color::Magenta),
        Tile::Exit => ('>', Color::Green),
        Tile::Warden => ('W', Color::Red),
        Tile::PathMark => ('*', Color::Blue),
    }
}

pub struct Renderer {
    writer: BufWriter<Stdout>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Wipe the screen once, e.g. when switching from a menu into play.
    /// `render_game` itself never clears, so frames don't flicker.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.writer, Clear(ClearType::All))
    }

    // ── Playing ──

    pub fn render_game(&mut self, world: &World, view: &ViewOptions) -> io::Result<()> {
        let grid = world.grid();
        let player = world.player_position();
        let r2 = view.lamp_radius * view.lamp_radius;

        let overlay: HashSet<Position> = if view.show_path {
            world
                .last_path()
                .iter()
                .copied()
                .filter(|p| world.in_bounds(p.x, p.y))
                .collect()
        } else {
            HashSet::new()
        };

        let standing = world.tile(player.x, player.y);
        let lamp = if view.lamp_on { "ON" } else { "OFF" };
        let hunt = match world.wardens().first() {
            Some(w) => format!("   Warden: {:.1} away", w.position().distance(player)),
            None => String::new(),
        };
        self.put_line(
            0,
            &format!(
                "Tile: {}   Lamp: {}   Seed: {}{}",
                standing.description(),
                lamp,
                view.seed,
                hunt
            ),
            Color::White,
        )?;
        self.put_line(
            1,
            "WASD/arrows move · P path · L lamp · :q save and quit",
            Color::DarkGrey,
        )?;

        // Clip to the terminal so an undersized window never wraps rows.
        let (term_w, term_h) = terminal::size().unwrap_or((80, 24));
        let rows = grid.height().min(term_h.saturating_sub(MAP_ROW) as i32);
        let cols = grid.width().min(term_w as i32);

        for y in 0..rows {
            queue!(self.writer, MoveTo(0, y as u16 + MAP_ROW))?;
            for x in 0..cols {
                let mut tile = grid.get(x, y);

                if view.lamp_on {
                    let (dx, dy) = (x - player.x, y - player.y);
                    if dx * dx + dy * dy > r2 {
                        tile = Tile::Void; // beyond the lamp lies darkness
                    }
                }
                if overlay.contains(&Position::new(x, y)) {
                    tile = Tile::PathMark;
                }

                let (ch, color) = glyph(tile);
                queue!(self.writer, SetForegroundColor(color), Print(ch))?;
            }
        }
        self.writer.flush()
    }

    // ── Menus and end screens ──

    pub fn render_title(
        &mut self,
        avatar: AvatarStyle,
        has_save: bool,
        notice: Option<&str>,
    ) -> io::Result<()> {
        let avatar_name = match avatar {
            AvatarStyle::Classic => "classic",
            AvatarStyle::Alt => "alt",
        };
        let load_line = if has_save {
            "Load Game (L)".to_string()
        } else {
            "Load Game (L)   (no save found)".to_string()
        };

        queue!(self.writer, Clear(ClearType::All))?;
        self.put_centered(6, "O U B L I E T T E", Color::Yellow)?;
        self.put_centered(8, "escape before the warden finds you", Color::DarkGrey)?;
        self.put_centered(11, "New Game (N)", Color::White)?;
        self.put_centered(13, &load_line, Color::White)?;
        self.put_centered(15, &format!("Avatar: {} (C to change)", avatar_name), Color::White)?;
        self.put_centered(17, "Quit (Q)", Color::White)?;
        if let Some(msg) = notice {
            self.put_centered(20, msg, Color::Red)?;
        }
        self.writer.flush()
    }

    pub fn render_seed_entry(&mut self, digits: &str) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All))?;
        self.put_centered(8, "Enter Seed (numbers only)", Color::White)?;
        let shown = if digits.is_empty() { "_" } else { digits };
        self.put_centered(11, shown, Color::Yellow)?;
        self.put_centered(14, "Press S to start, Esc to go back", Color::DarkGrey)?;
        self.writer.flush()
    }

    pub fn render_won(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All))?;
        self.put_centered(8, "YOU ESCAPED!", Color::Green)?;
        self.put_centered(11, "Press M to return to the menu", Color::White)?;
        self.put_centered(13, "Press Q to quit", Color::White)?;
        self.writer.flush()
    }

    pub fn render_lost(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All))?;
        self.put_centered(8, "THE WARDEN FOUND YOU", Color::Red)?;
        self.put_centered(11, "Press M to return to the menu", Color::White)?;
        self.put_centered(13, "Press Q to quit", Color::White)?;
        self.writer.flush()
    }

    // ── Drawing helpers ──

    /// Write one HUD/menu line, clearing whatever the previous frame left.
    fn put_line(&mut self, row: u16, text: &str, color: Color) -> io::Result<()> {
        queue!(
            self.writer,
            MoveTo(0, row),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(color),
            Print(text)
        )
    }

    fn put_centered(&mut self, row: u16, text: &str, color: Color) -> io::Result<()> {
        let (term_w, _) = terminal::size().unwrap_or((80, 24));
        let col = (term_w as usize).saturating_sub(text.chars().count()) / 2;
        queue!(
            self.writer,
            MoveTo(col as u16, row),
            SetForegroundColor(color),
            Print(text)
        )
    }
}

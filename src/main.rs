/// Entry point and session loop.
///
/// The core simulation lives under `sim/` and `domain/`; this file owns
/// the screens around it: title menu, seed entry, the playing loop with
/// its warden cadence, and the win/lose screens.

mod config;
mod domain;
mod sim;
mod ui;

use std::error::Error;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use sim::save;
use sim::world::{MoveOutcome, PursuitOutcome, World};
use ui::input::{self, QuitChord};
use ui::renderer::{Renderer, ViewOptions};

const MENU_POLL: Duration = Duration::from_millis(250);

/// Seed entry stops accepting digits here; anything longer could no
/// longer fit in a u64.
const MAX_SEED_DIGITS: usize = 18;

fn main() {
    let config = GameConfig::load();
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = run(&mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }
}

enum SessionEnd {
    ToTitle,
    Quit,
}

enum Ending {
    Escaped,
    Caught,
}

fn run(renderer: &mut Renderer, config: &GameConfig) -> Result<(), Box<dyn Error>> {
    let mut avatar = config.avatar;
    let mut notice: Option<String> = None;

    loop {
        let has_save = save::save_path().exists();
        renderer.render_title(avatar, has_save, notice.as_deref())?;

        let key = wait_for_key()?;
        if input::is_ctrl_c(&key) {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                notice = None;
                if let Some(seed) = prompt_seed(renderer)? {
                    let world =
                        World::new_game(config.grid.width, config.grid.height, seed, avatar);
                    if let SessionEnd::Quit = play(renderer, config, world, seed)? {
                        return Ok(());
                    }
                }
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                match save::load_from_file(&save::save_path()) {
                    Ok((mut world, seed)) => {
                        notice = None;
                        world.set_avatar_style(avatar);
                        if let SessionEnd::Quit = play(renderer, config, world, seed)? {
                            return Ok(());
                        }
                    }
                    Err(e) => notice = Some(format!("Load failed: {e}")),
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => avatar = avatar.toggled(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
            _ => {}
        }
    }
}

/// Digit-by-digit seed entry. S starts once at least one digit is in;
/// Esc backs out to the title.
fn prompt_seed(renderer: &mut Renderer) -> Result<Option<u64>, Box<dyn Error>> {
    let mut digits = String::new();

    loop {
        renderer.render_seed_entry(&digits)?;

        let key = wait_for_key()?;
        if input::is_ctrl_c(&key) {
            return Ok(None);
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if digits.len() < MAX_SEED_DIGITS {
                    digits.push(c);
                }
            }
            KeyCode::Backspace => {
                digits.pop();
            }
            KeyCode::Char('s') | KeyCode::Char('S') if !digits.is_empty() => {
                return Ok(Some(digits.parse().unwrap_or(0)));
            }
            KeyCode::Esc => return Ok(None),
            _ => {}
        }
    }
}

fn play(
    renderer: &mut Renderer,
    config: &GameConfig,
    mut world: World,
    seed: u64,
) -> Result<SessionEnd, Box<dyn Error>> {
    renderer.clear()?;

    let mut lamp_on = config.lamp.enabled;
    let mut show_path = false;
    let mut chord = QuitChord::new();

    let tick = Duration::from_millis(config.pace.warden_interval_ms);
    let poll = Duration::from_millis(config.pace.frame_sleep_ms.max(1));
    let mut last_advance = Instant::now();

    loop {
        let view = ViewOptions {
            lamp_on,
            lamp_radius: config.lamp.radius,
            show_path,
            seed,
        };
        renderer.render_game(&world, &view)?;

        if let Some(key) = input::poll_key(poll)? {
            if input::is_ctrl_c(&key) {
                return Ok(SessionEnd::Quit);
            }

            if chord.offer(key.code) {
                save::save_to_file(&save::save_path(), seed, &world)?;
                return Ok(SessionEnd::Quit);
            } else if let Some((dx, dy)) = input::movement(key.code) {
                if world.move_player(dx, dy) == MoveOutcome::ReachedExit {
                    return end_screen(renderer, Ending::Escaped);
                }
            } else {
                match key.code {
                    KeyCode::Char('p') | KeyCode::Char('P') => show_path = !show_path,
                    KeyCode::Char('l') | KeyCode::Char('L') => lamp_on = !lamp_on,
                    _ => {}
                }
            }
        }

        if last_advance.elapsed() >= tick {
            if world.advance_wardens() == PursuitOutcome::Caught {
                return end_screen(renderer, Ending::Caught);
            }
            last_advance = Instant::now();
        }
    }
}

fn end_screen(renderer: &mut Renderer, ending: Ending) -> Result<SessionEnd, Box<dyn Error>> {
    match ending {
        Ending::Escaped => renderer.render_won()?,
        Ending::Caught => renderer.render_lost()?,
    }

    loop {
        let key = wait_for_key()?;
        if input::is_ctrl_c(&key) {
            return Ok(SessionEnd::Quit);
        }

        match key.code {
            KeyCode::Char('m') | KeyCode::Char('M') => return Ok(SessionEnd::ToTitle),
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(SessionEnd::Quit),
            _ => {}
        }
    }
}

/// Block until a key press arrives.
fn wait_for_key() -> Result<crossterm::event::KeyEvent, Box<dyn Error>> {
    loop {
        if let Some(key) = input::poll_key(MENU_POLL)? {
            return Ok(key);
        }
    }
}

use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use pacman_sim::ghost::GhostKind;
use pacman_sim::{Maze, Mode, PelletKind, Phase, Pos, Snapshot, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Wall,
    Empty,
    Pellet,
    Power,
    Gate,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };
}

/// Redraws only the cells and status lines that changed since last frame.
pub struct Renderer {
    width: usize,
    height: usize,
    last: Vec<Cell>,
    last_hud: String,
    last_banner: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(maze: &Maze) -> Self {
        Self {
            width: maze.width(),
            height: maze.height(),
            last: vec![Cell::BLANK; maze.width() * maze.height()],
            last_hud: String::new(),
            last_banner: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn draw(&mut self, stdout: &mut Stdout, maze: &Maze, snap: &Snapshot) -> io::Result<()> {
        // HUD line above, banner line below.
        let needed_h = (self.height + 2) as u16;
        let needed_w = (self.width * CELL_W) as u16;

        stdout.queue(MoveTo(0, 0))?;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            stdout.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            stdout.queue(Print(msg))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(snap);
        if self.needs_full || hud != self.last_hud {
            self.draw_line(stdout, self.origin_y - 1, Color::White, &hud)?;
            self.last_hud = hud;
        }

        let pellets: HashMap<Pos, PelletKind> = snap.pellets.iter().copied().collect();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos::new(x, y);
                let cell = cell_for(maze, snap, &pellets, pos);
                let idx = y * self.width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }

        let banner = banner_line(snap).unwrap_or_default();
        if self.needs_full || banner != self.last_banner {
            let y = self.origin_y + self.height as u16;
            self.draw_line(stdout, y, Color::Yellow, &banner)?;
            self.last_banner = banner;
        }
        self.needs_full = false;

        stdout.flush()
    }

    fn draw_line(&self, stdout: &mut Stdout, y: u16, color: Color, text: &str) -> io::Result<()> {
        stdout.queue(MoveTo(self.origin_x, y))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(text))?;
        stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
            Glyph::Gate => "==",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            stdout.queue(Print(' '))?;
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }
}

fn hud_line(snap: &Snapshot) -> String {
    let mut hud = format!(
        "Score: {}  Lives: {}  Level: {}  Pellets: {}",
        snap.score,
        snap.lives,
        snap.level,
        snap.pellets.len()
    );
    if snap.mode == Mode::Reversed {
        hud.push_str(&format!("  Power: {:.1}s", snap.power_remaining.as_secs_f32()));
    }
    hud
}

fn banner_line(snap: &Snapshot) -> Option<String> {
    let text = match snap.phase {
        Phase::Playing => return None,
        Phase::Menu => "Enter to start, q to quit".to_string(),
        Phase::Paused => "Paused. Space to resume, Esc for menu".to_string(),
        Phase::GameOver => format!("GAME OVER - Final Score: {} (r to retry)", snap.score),
        Phase::Won => format!("CLEARED - Final Score: {} (r to play again)", snap.score),
    };
    Some(text)
}

fn ghost_color(kind: GhostKind) -> Color {
    match kind {
        GhostKind::Blinky => Color::Red,
        GhostKind::Pinky => Color::Magenta,
        GhostKind::Inky => Color::Cyan,
        GhostKind::Clyde => Color::DarkYellow,
    }
}

fn cell_for(maze: &Maze, snap: &Snapshot, pellets: &HashMap<Pos, PelletKind>, pos: Pos) -> Cell {
    if pos == snap.player {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(&(kind, _)) = snap.ghosts.iter().find(|(_, p)| *p == pos) {
        return match snap.mode {
            Mode::Reversed => Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            Mode::Pursuit => Cell {
                glyph: Glyph::Ghost,
                color: ghost_color(kind),
            },
        };
    }
    match pellets.get(&pos) {
        Some(PelletKind::Normal) => {
            return Cell {
                glyph: Glyph::Pellet,
                color: Color::White,
            }
        }
        Some(PelletKind::Power) => {
            return Cell {
                glyph: Glyph::Power,
                color: Color::Magenta,
            }
        }
        None => {}
    }
    match maze.tile(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Gate => Cell {
            glyph: Glyph::Gate,
            color: Color::Cyan,
        },
        Tile::Floor | Tile::Pellet | Tile::Power => Cell::BLANK,
    }
}

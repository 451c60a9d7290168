//! Presentation layer: line-oriented terminal output.
//!
//! Prints the board after every change and turns `GameEvent`s into short,
//! colored lines. All output is queued with crossterm and flushed once per
//! call, so the writer can be stdout or an in-memory buffer.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, PrintStyledContent, Stylize},
};
use rand::Rng;

use crate::domain::category::Category;
use crate::domain::item::Item;
use crate::domain::rules;
use crate::sim::event::GameEvent;
use crate::sim::game::Game;
use crate::sim::level;
use crate::sim::world::Phase;

/// Colors offered to the player. Any other label is accepted too; it just
/// prints in white.
pub const PALETTE: [&str; 7] = ["red", "orange", "yellow", "green", "blue", "purple", "pink"];

const HELP: &[(&str, &str)] = &[
    ("drop c3 b1", "put chocolate c3 into box b1"),
    ("add", "make a new box (not on level 1)"),
    ("clear", "take away all boxes and start packing again"),
    ("pick red", "choose a color"),
    ("color b1", "paint box b1 with your color (or: color b1 red)"),
    ("next", "go to the next level"),
    ("reset", "start again from level 1"),
    ("show", "show the table again"),
    ("quit", "stop playing"),
];

fn swatch(label: &str) -> Color {
    match label {
        "red" => Color::Red,
        "orange" => Color::Rgb { r: 255, g: 140, b: 0 },
        "yellow" => Color::Yellow,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "purple" => Color::Magenta,
        "pink" => Color::Rgb { r: 255, g: 105, b: 180 },
        _ => Color::White,
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Milk => Color::Rgb { r: 196, g: 140, b: 90 },
        Category::Dark => Color::Rgb { r: 120, g: 70, b: 40 },
        Category::White => Color::Rgb { r: 245, g: 235, b: 215 },
    }
}

pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Renderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            PrintStyledContent("🍫 Chocolate Box 🍫".bold().yellow()),
            Print("\n"),
            Print("Share the chocolates so every box gets the same number.\n"),
            Print("Type 'help' to see the commands.\n\n"),
        )?;
        self.out.flush()
    }

    pub fn help(&mut self) -> io::Result<()> {
        for (cmd, what) in HELP {
            queue!(
                self.out,
                PrintStyledContent(format!("  {cmd:<12}").cyan()),
                Print(format!("{what}\n")),
            )?;
        }
        queue!(self.out, Print(format!("  colors: {}\n", PALETTE.join(", "))))?;
        self.out.flush()
    }

    pub fn hint(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, PrintStyledContent(format!("  {text}\n").dark_grey()))?;
        self.out.flush()
    }

    pub fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        queue!(self.out, PrintStyledContent("> ".bold()))?;
        self.out.flush()
    }

    /// One line per event worth telling the player about.
    pub fn events(&mut self, events: &[GameEvent]) -> io::Result<()> {
        for event in events {
            match event {
                GameEvent::Message(text) => {
                    queue!(self.out, PrintStyledContent(format!("★ {text}\n").bold().yellow()))?;
                }
                GameEvent::BoxColored { target, color } => {
                    queue!(
                        self.out,
                        Print(format!("  {target} is now ")),
                        PrintStyledContent(color.as_str().with(swatch(color))),
                        Print("\n"),
                    )?;
                }
                GameEvent::BoardReset => {
                    queue!(self.out, Print("  The chocolates are back on the table.\n"))?;
                }
                GameEvent::RunCompleted { run_score, total_score } => {
                    queue!(
                        self.out,
                        PrintStyledContent(
                            format!("★ You scored {run_score}! All-time score: {total_score}\n")
                                .bold()
                                .green(),
                        ),
                    )?;
                }
                // Reflected in the next board print.
                GameEvent::PhaseChanged(_)
                | GameEvent::ScoreChanged { .. }
                | GameEvent::LevelChanged(_)
                | GameEvent::ItemPlaced { .. }
                | GameEvent::BoxAdded(_)
                | GameEvent::BoxesCleared => {}
            }
        }
        self.out.flush()
    }

    pub fn board<R: Rng>(&mut self, game: &Game<R>) -> io::Result<()> {
        let run = game.run();
        let score = game.score();
        if !run.is_active {
            queue!(self.out, Print("Type 'start' to play.\n"))?;
            return self.out.flush();
        }

        queue!(
            self.out,
            Print("\n"),
            PrintStyledContent(
                format!("Level {}/{}", run.level_index, level::count()).bold(),
            ),
            Print(format!(
                "  · {}  · score {} (all-time {})\n",
                run.phase, score.run, score.total,
            )),
        )?;

        let table: Vec<&Item> = game.pool().unplaced_items().collect();
        if !table.is_empty() {
            queue!(self.out, Print("  On the table: "))?;
            self.items(&table)?;
            queue!(self.out, Print("\n"))?;
        }

        if game.boxes().is_empty() {
            queue!(self.out, Print("  No boxes yet. Type 'add' to make one.\n"))?;
        }
        for b in game.boxes().iter() {
            queue!(self.out, Print(format!("  {:<4}", b.id.to_string())))?;
            match &b.color {
                Some(color) => queue!(
                    self.out,
                    PrintStyledContent(format!("[{color}] ").with(swatch(color))),
                )?,
                None => queue!(self.out, Print("[ ] "))?,
            }
            if b.is_empty() {
                queue!(self.out, PrintStyledContent("(empty)".dark_grey()))?;
            } else {
                let contents: Vec<&Item> = b.contents.iter().collect();
                self.items(&contents)?;
            }
            queue!(self.out, Print(format!("  ({})\n", b.len())))?;
        }

        match run.phase {
            Phase::Coloring => {
                let pick = game.selected_color().unwrap_or("none");
                queue!(self.out, Print(format!("  Your color: {pick}\n")))?;
            }
            Phase::Completed => {
                queue!(self.out, Print("  Type 'next' to continue.\n"))?;
            }
            Phase::Packing => {
                if let Some(hint) = packing_hint(game) {
                    queue!(self.out, PrintStyledContent(format!("  {hint}\n").dark_grey()))?;
                }
            }
        }
        self.out.flush()
    }

    fn items(&mut self, items: &[&Item]) -> io::Result<()> {
        for item in items {
            queue!(
                self.out,
                PrintStyledContent(
                    format!("{}{} ", item.id, item.category.symbol())
                        .with(category_color(item.category)),
                ),
            )?;
        }
        Ok(())
    }
}

/// Shown once every chocolate is in a box but the phase has not moved on,
/// i.e. the split is uneven.
fn packing_hint<R: Rng>(game: &Game<R>) -> Option<String> {
    let boxes = game.boxes();
    if boxes.is_empty() || game.pool().unplaced_count() > 0 {
        return None;
    }
    let def = game.level();
    let hint = match rules::even_share(def.item_count, boxes.len()) {
        Some(share) if boxes.is_preset() => {
            format!("Each box needs {share}. Type 'reset' to try again.")
        }
        Some(share) => format!("Each box needs {share}."),
        None => format!(
            "{} chocolates don't share evenly between {} boxes.",
            def.item_count,
            boxes.len(),
        ),
    };
    Some(hint)
}

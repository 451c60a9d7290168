//! Command parser for the text front end.
//!
//! Each line typed by the player becomes one `Command`. Game commands map
//! one-to-one onto core `Action`s; the rest are front end only.
//!
//! ```text
//! drop c3 b1      put chocolate c3 into box b1   (also: drop 3 1)
//! color b1 red    color box b1                   (color b1 → selected color)
//! pick red        select a palette color
//! add / clear     add a box / remove all boxes
//! next            go to the next level
//! start / reset   start / restart the run
//! show / help / quit
//! ```

use crate::domain::item::ItemId;
use crate::domain::packbox::BoxId;
use crate::error::CommandError;
use crate::sim::action::Action;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Play(Action),
    Show,
    Help,
    Quit,
}

/// Parse one input line. `selected_color` fills in `color <box>` when no
/// color is typed.
pub fn parse_command(line: &str, selected_color: Option<&str>) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Show);
    };
    let args: Vec<&str> = words.collect();

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "drop" | "d" => match args.as_slice() {
            [item, target] => Command::Play(Action::DropItem {
                item: parse_item(item)?,
                target: parse_box(target)?,
            }),
            _ => return Err(CommandError::Usage("drop <chocolate> <box>")),
        },
        "color" | "c" => match args.as_slice() {
            [target] => match selected_color {
                Some(color) => Command::Play(Action::DropColor {
                    target: parse_box(target)?,
                    color: color.to_string(),
                }),
                None => return Err(CommandError::NoColorSelected),
            },
            [target, color] => Command::Play(Action::DropColor {
                target: parse_box(target)?,
                color: color.to_ascii_lowercase(),
            }),
            _ => return Err(CommandError::Usage("color <box> [color]")),
        },
        "pick" | "p" => match args.as_slice() {
            [color] => Command::Play(Action::SelectColor(color.to_ascii_lowercase())),
            _ => return Err(CommandError::Usage("pick <color>")),
        },
        "add" | "a" => Command::Play(Action::AddBox),
        "clear" => Command::Play(Action::ClearBoxes),
        "next" | "n" => Command::Play(Action::AdvanceLevel),
        "start" => Command::Play(Action::StartRun),
        "reset" => Command::Play(Action::ResetRun),
        "show" | "s" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(cmd)
}

/// Accepts `c3`, `C3` or `3`.
fn parse_item(word: &str) -> Result<ItemId, CommandError> {
    parse_tagged(word, 'c')
        .map(ItemId)
        .ok_or_else(|| CommandError::BadItem(word.to_string()))
}

/// Accepts `b2`, `B2` or `2`.
fn parse_box(word: &str) -> Result<BoxId, CommandError> {
    parse_tagged(word, 'b')
        .map(BoxId)
        .ok_or_else(|| CommandError::BadBox(word.to_string()))
}

fn parse_tagged(word: &str, tag: char) -> Option<usize> {
    let digits = word
        .strip_prefix(tag)
        .or_else(|| word.strip_prefix(tag.to_ascii_uppercase()))
        .unwrap_or(word);
    digits.parse().ok()
}

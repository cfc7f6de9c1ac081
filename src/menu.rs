use std::io;

use clap::ValueEnum;
use crossterm::event::KeyCode;

use crate::tui::{self, Tui};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub fn rows(self) -> usize {
        match self {
            Preset::Beginner => 10,
            Preset::Intermediate => 16,
            Preset::Expert => 16,
        }
    }

    pub fn cols(self) -> usize {
        match self {
            Preset::Beginner => 10,
            Preset::Intermediate => 16,
            Preset::Expert => 40,
        }
    }

    pub fn mines(self) -> usize {
        match self {
            Preset::Beginner => 10,
            Preset::Intermediate => 40,
            Preset::Expert => 99,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Play(Preset),
    Exit,
}

pub const HELP_TEXT: &str = "\
[arrow keys] - navigate
[hjkl] - navigate (alternate method using vi keys)
[g/enter] - reveal selected
[r] - reveal random
[f] - flag selected
[v] - verify that flags present a valid arrangement
      (does not check correctness)
[c] - clear all flags
[s] - solve puzzle
      (does not guarantee a winning solution)
[?] - help menu
[q] - quit";

const ITEMS: [&str; 5] = [
    "1. Beginner      (10x10, 10 mines)",
    "2. Intermediate  (16x16, 40 mines)",
    "3. Expert        (16x40, 99 mines)",
    "4. Help",
    "5. Exit",
];

pub fn main_menu(tui: &mut Tui) -> io::Result<MenuChoice> {
    let mut highlight = 0usize;
    loop {
        tui.draw_menu(&ITEMS, highlight)?;
        match tui::read_key()? {
            KeyCode::Up | KeyCode::Char('k') => highlight = highlight.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if highlight + 1 < ITEMS.len() {
                    highlight += 1;
                }
            }
            KeyCode::Char('1') => highlight = 0,
            KeyCode::Char('2') => highlight = 1,
            KeyCode::Char('3') => highlight = 2,
            KeyCode::Char('4') => highlight = 3,
            KeyCode::Char('5') => highlight = 4,
            KeyCode::Enter | KeyCode::Char('g') => match highlight {
                0 => return Ok(MenuChoice::Play(Preset::Beginner)),
                1 => return Ok(MenuChoice::Play(Preset::Intermediate)),
                2 => return Ok(MenuChoice::Play(Preset::Expert)),
                3 => tui.show_message(HELP_TEXT)?,
                _ => return Ok(MenuChoice::Exit),
            },
            KeyCode::Char('q') | KeyCode::Esc => return Ok(MenuChoice::Exit),
            _ => {}
        }
    }
}

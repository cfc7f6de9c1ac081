use std::io;
use std::sync::{Arc, Mutex};

use clap::Parser;
use sweeper::menu::{self, MenuChoice, Preset};
use sweeper::session;
use sweeper::tui::Tui;

#[derive(Parser, Debug)]
#[command(name = "sweeper", about = "Terminal Minesweeper with a deduction solver", version)]
struct Args {
    /// Play one game at this difficulty instead of opening the menu
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// Seed for mine placement (omit for OS entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> io::Result<()> {
    let tui = Arc::new(Mutex::new(Tui::new()?));

    if let Some(preset) = args.preset {
        session::run(&tui, preset, args.seed)?;
        return Ok(());
    }

    loop {
        let choice = menu::main_menu(&mut tui.lock().unwrap())?;
        match choice {
            MenuChoice::Play(preset) => {
                session::run(&tui, preset, args.seed)?;
            }
            MenuChoice::Exit => break,
        }
    }
    Ok(())
}

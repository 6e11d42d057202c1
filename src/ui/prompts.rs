// UI prompts and user interaction module

use colored::Colorize;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal,
};
use dialoguer::Input;
use std::io::{self, Write};

/// Strip surrounding whitespace and the double quotes Windows Explorer adds
/// when a path is copied with "Copy as path".
pub fn trim_path_input(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

/// Ask for a path. The line starts empty; an empty answer is returned as an
/// empty string.
pub fn prompt_path(prompt: &str) -> anyhow::Result<String> {
    let answer = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(trim_path_input(&answer).to_string())
}

/// Text of the output folder question. The last folder used is only shown,
/// Enter always means the desktop `Music` folder.
pub fn output_folder_prompt(last_output_dir: Option<&str>) -> String {
    let base = "Folder to save the music in (Enter for the 'Music' folder on the desktop)";
    match last_output_dir {
        Some(last) if !last.trim().is_empty() => format!("{} [last used: {}]", base, last),
        _ => base.to_string(),
    }
}

/// Block until the user presses a key
pub fn wait_for_keypress(message: &str) -> io::Result<()> {
    println!();
    print!("{}", message.dimmed());
    io::stdout().flush()?;

    terminal::enable_raw_mode().map_err(|e| {
        io::Error::other(format!(
            "Failed to enable raw mode: {}. Try running in a different terminal.",
            e
        ))
    })?;

    // Always disable raw mode, even if reading the event failed
    let result = read_key_press();
    let _ = terminal::disable_raw_mode();
    println!();

    result
}

fn read_key_press() -> io::Result<()> {
    // Drop whatever is still buffered from the previous prompt
    while event::poll(std::time::Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

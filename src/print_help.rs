use crate::constants::{CMD_KEY, CMD_QUIT, CMD_REMIX, CMD_SAVE, CMD_SHOW, KEY_CONSOLE_URL};
use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " Mood Canvas ".magenta());
    println!("Type a mood or scene description and press Enter to generate");
    println!("four 9:16 mobile wallpapers. An empty line re-submits the");
    println!("current prompt field (useful after a remix).");
    println!("\nCommands:");
    println!(
        "  {}        Manage the Gemini API key (save, test, clear).",
        CMD_KEY.bold().yellow()
    );
    println!(
        "  {} {}   Inspect a generated image.",
        CMD_SHOW.bold().cyan(),
        "<n>".cyan()
    );
    println!(
        "  {} {}   Save image <n> to disk (optional target path).",
        CMD_SAVE.bold().green(),
        "<n> [path]".green()
    );
    println!(
        "  {} {}  Copy image <n>'s prompt back into the prompt field.",
        CMD_REMIX.bold().magenta(),
        "<n>".magenta()
    );
    println!("  {}       Leave the app.", CMD_QUIT.bold().red());
    println!("\nExamples:");
    println!("  {}", "misty forest at dawn, soft pastel light".italic());
    println!("  {}", ":remix 2".italic());
    println!("  {}", ":save 2 lockscreen.png".italic());
    println!("\nGet an API key at {}", KEY_CONSOLE_URL.underline());
    println!("{:━^60}", "".magenta());
}

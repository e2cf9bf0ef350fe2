use crate::wallpaper::GeneratedImage;
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
};

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

/// Prompts on stdout and reads one trimmed line. `None` on EOF.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line).ok()?;
    if read == 0 {
        return None;
    }
    Some(line.trim().to_string())
}

/// `AIza…abcd` style hint; short keys are fully masked.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Materializes the in-memory image payload as a local file. Without an
/// explicit path the file lands in the working directory under the image's
/// own name.
pub fn save_wallpaper(
    image: &GeneratedImage,
    path: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn Error>> {
    let target = path.unwrap_or_else(|| PathBuf::from(image.file_name()));
    let bytes = image.decode_bytes()?;
    std::fs::write(&target, bytes)?;
    log::info!("wrote {} to {}", image.id, target.display());
    Ok(target)
}

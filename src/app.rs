use crate::constants::{
    API_BASE_ENV, CMD_HELP, CMD_KEY, CMD_QUIT, CMD_REMIX, CMD_SAVE, CMD_SHOW, GEMINI_API_BASE,
    KEY_CONSOLE_URL,
};
use crate::generate::{generate_wallpapers, validate_api_key};
use crate::print_help::print_help;
use crate::storage::CredentialStore;
use crate::utils::{create_spinner, mask_key, read_line, save_wallpaper};
use crate::wallpaper::GeneratedImage;
use colored::Colorize;
use reqwest::Client;
use std::{env, error::Error, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Idle,
    Generating,
    Success,
    Error,
}

/// Ephemeral per-session state: the prompt field, the generation status, and
/// the result set belonging to the most recent submission. No history of
/// prior result sets is kept.
pub struct Session {
    pub prompt: String,
    pub state: AppState,
    pub images: Vec<GeneratedImage>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            state: AppState::Idle,
            images: Vec::new(),
        }
    }

    /// Discards the previous result set before any new result can arrive, so
    /// old and new results are never visible together.
    pub fn begin_generation(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.images.clear();
        self.state = AppState::Generating;
    }

    pub fn finish_generation(&mut self, urls: Vec<String>) {
        if urls.is_empty() {
            self.state = AppState::Error;
            return;
        }
        self.images = urls
            .into_iter()
            .map(|url| GeneratedImage::new(url, self.prompt.clone()))
            .collect();
        self.state = AppState::Success;
    }

    pub fn fail_generation(&mut self) {
        self.state = AppState::Error;
    }

    /// 1-based lookup into the visible result set.
    pub fn image(&self, index: usize) -> Option<&GeneratedImage> {
        if index == 0 {
            return None;
        }
        self.images.get(index - 1)
    }

    /// Copies the selected image's originating prompt back into the prompt
    /// field, exactly as generated from.
    pub fn remix(&mut self, index: usize) -> Option<String> {
        let prompt = self.image(index)?.prompt.clone();
        self.prompt = prompt.clone();
        Some(prompt)
    }
}

pub struct App {
    client: Client,
    api_base: String,
    store: CredentialStore,
    api_key: Option<String>,
    pub session: Session,
}

impl App {
    pub fn new(client: Client) -> Result<Self, Box<dyn Error>> {
        let store = CredentialStore::from_env()?;
        let api_base = env::var(API_BASE_ENV).unwrap_or_else(|_| GEMINI_API_BASE.to_string());
        let api_key = store.load().filter(|key| !key.is_empty());
        Ok(Self {
            client,
            api_base,
            store,
            api_key,
            session: Session::new(),
        })
    }

    pub async fn run(&mut self, initial_prompt: Option<String>) -> Result<(), Box<dyn Error>> {
        println!("{:━^60}", " Mood Canvas ".magenta());
        println!(
            "Describe a mood or scene and get four 9:16 wallpapers. {} for commands.",
            CMD_HELP.bold().cyan()
        );

        if self.api_key.is_none() {
            println!("\n{}", "No API key configured yet.".yellow());
            self.open_key_panel().await;
        }

        if let Some(prompt) = initial_prompt {
            self.submit(&prompt).await;
        }

        loop {
            let line = match read_line(&format!("{} ", "›".magenta().bold())) {
                Some(line) => line,
                None => break,
            };
            if line.is_empty() {
                // An empty entry re-submits whatever is in the prompt field
                // (e.g. after a remix); with an empty field it is ignored.
                let prompt = self.session.prompt.clone();
                if !prompt.is_empty() {
                    self.submit(&prompt).await;
                }
                continue;
            }

            let mut words = line.split_whitespace();
            let command = words.next().unwrap_or_default();
            match command {
                CMD_QUIT => break,
                CMD_HELP => print_help(),
                CMD_KEY => self.open_key_panel().await,
                CMD_SHOW => self.show_image(words.next()),
                CMD_SAVE => self.save_image(words.next(), words.next()),
                CMD_REMIX => self.remix_image(words.next()),
                _ if command.starts_with(':') => {
                    eprintln!("Unknown command {}. {} lists commands.", command, CMD_HELP);
                }
                _ => self.submit(&line).await,
            }
        }
        Ok(())
    }

    /// Submitting without a usable key opens the key panel instead of
    /// attempting a generation.
    async fn submit(&mut self, prompt: &str) {
        if prompt.trim().is_empty() {
            return;
        }
        let api_key = match self.api_key.clone() {
            Some(key) => key,
            None => {
                eprintln!("{}", "An API key is required before generating.".yellow());
                self.open_key_panel().await;
                return;
            }
        };

        self.session.begin_generation(prompt.trim());
        let spinner = create_spinner("magenta", "Painting your mood...".to_string());
        let result =
            generate_wallpapers(&self.client, &self.api_base, &api_key, &self.session.prompt)
                .await;
        spinner.finish_and_clear();

        match result {
            Ok(urls) => {
                self.session.finish_generation(urls);
                self.render_results();
            }
            Err(e) => {
                log::warn!("generation failed: {}", e);
                self.session.fail_generation();
                eprintln!("{}", "Something went wrong while generating images.".red());
                eprintln!("Check your API key status or try again in a moment.");
            }
        }
    }

    fn render_results(&self) {
        println!(
            "\n{} wallpapers for {}",
            self.session.images.len().to_string().bold().green(),
            format!("\"{}\"", self.session.prompt).italic()
        );
        for (i, image) in self.session.images.iter().enumerate() {
            let size_kb = image.decode_bytes().map(|b| b.len() / 1024).unwrap_or(0);
            println!(
                "  [{}] {}  ({} KB)",
                (i + 1).to_string().bold().cyan(),
                image.file_name(),
                size_kb
            );
        }
        println!(
            "{} <n> to inspect, {} <n> to download, {} <n> to reuse its prompt.\n",
            CMD_SHOW.bold(),
            CMD_SAVE.bold(),
            CMD_REMIX.bold()
        );
    }

    fn selected_image(&self, arg: Option<&str>) -> Option<&GeneratedImage> {
        let index: usize = arg?.parse().ok()?;
        let image = self.session.image(index);
        if image.is_none() {
            eprintln!(
                "No image #{}, pick 1..{}.",
                index,
                self.session.images.len()
            );
        }
        image
    }

    fn show_image(&self, arg: Option<&str>) {
        let image = match self.selected_image(arg) {
            Some(image) => image,
            None => return,
        };
        let size = image.decode_bytes().map(|b| b.len()).unwrap_or(0);
        println!("{:━^60}", format!(" {} ", image.file_name()).cyan());
        println!("  prompt:  {}", image.prompt.italic());
        println!("  id:      {}", image.id);
        println!("  size:    {} bytes", size);
        println!(
            "  {} {} [path]   {} {}",
            "download:".bold(),
            CMD_SAVE,
            "remix:".bold(),
            CMD_REMIX
        );
    }

    fn save_image(&self, arg: Option<&str>, path: Option<&str>) {
        let image = match self.selected_image(arg) {
            Some(image) => image,
            None => return,
        };
        let target = path.map(PathBuf::from);
        match save_wallpaper(image, target) {
            Ok(written) => println!("Saved {}", written.display().to_string().green()),
            Err(e) => eprintln!("{} {}", "Could not save image:".red(), e),
        }
    }

    fn remix_image(&mut self, arg: Option<&str>) {
        let index: usize = match arg.and_then(|a| a.parse().ok()) {
            Some(index) => index,
            None => {
                eprintln!("Usage: {} <n>", CMD_REMIX);
                return;
            }
        };
        match self.session.remix(index) {
            Some(prompt) => {
                println!(
                    "Prompt field set to {}. Press Enter to regenerate, or type to start over.",
                    format!("\"{}\"", prompt).italic()
                );
            }
            None => eprintln!(
                "No image #{}, pick 1..{}.",
                index,
                self.session.images.len()
            ),
        }
    }

    /// The credential panel: shows the current key masked, validates a new
    /// key before persisting it, and offers clearing the stored one. Opening
    /// and closing it never touches the generation state machine.
    async fn open_key_panel(&mut self) {
        println!("{:━^60}", " API key ".yellow());
        if self.store.exists() {
            match self.store.load().as_deref() {
                Some("") | None => {
                    println!("Stored key could not be decoded; enter it again.")
                }
                Some(key) => println!("Current key: {}", mask_key(key).bold()),
            }
        } else {
            println!("No key stored. Get one at {}", KEY_CONSOLE_URL.underline());
        }
        println!(
            "{} the key is stored obfuscated on disk. This defends only against \
casual inspection of storage content, not against a motivated reader of the \
client code, since the salt is embedded in the shipped client.",
            "Note:".bold()
        );

        loop {
            let hint = if self.store.exists() {
                "Enter a new key, 'clear' to remove the stored one, or press Enter to keep it: "
            } else {
                "Enter your Gemini API key (or press Enter to cancel): "
            };
            let line = match read_line(hint) {
                Some(line) => line,
                None => return,
            };
            if line.is_empty() {
                return;
            }
            if line == "clear" && self.store.exists() {
                if let Err(e) = self.store.clear() {
                    eprintln!("{} {}", "Could not remove the stored key:".red(), e);
                    continue;
                }
                self.api_key = None;
                println!("{}", "Stored key removed.".green());
                return;
            }

            let spinner = create_spinner("yellow", "Testing the key...".to_string());
            let valid = validate_api_key(&self.client, &self.api_base, &line).await;
            spinner.finish_and_clear();

            if valid {
                if let Err(e) = self.store.save(&line) {
                    eprintln!("{} {}", "Key validated but could not be saved:".red(), e);
                    continue;
                }
                self.api_key = Some(line);
                println!("{}", "Connected! Key saved.".green());
                return;
            }
            eprintln!(
                "{}",
                "The key is invalid or the service is unreachable. Check it and try again.".red()
            );
        }
    }
}

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const VALIDATION_MODEL: &str = "gemini-2.5-flash";
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const VALIDATION_PING: &str = "ping";
pub const WALLPAPER_PROMPT_PREFIX: &str =
    "High quality mobile wallpaper, 9:16 aspect ratio, aesthetic, detailed.";
pub const WALLPAPER_ASPECT_RATIO: &str = "9:16";
pub const WALLPAPER_COUNT: usize = 4;

pub const STORAGE_FILE_NAME: &str = ".mood_canvas_api_key";
pub const STORAGE_SALT: &str = "mood-canvas-salt-v1";

pub const API_BASE_ENV: &str = "GEMINI_API_BASE";
pub const KEY_FILE_ENV: &str = "MOOD_CANVAS_KEY_FILE";

pub const KEY_CONSOLE_URL: &str = "https://aistudio.google.com/app/apikey";

pub const CMD_HELP: &str = ":help";
pub const CMD_KEY: &str = ":key";
pub const CMD_SHOW: &str = ":show";
pub const CMD_SAVE: &str = ":save";
pub const CMD_REMIX: &str = ":remix";
pub const CMD_QUIT: &str = ":quit";

mod app;
mod constants;
mod gemini;
mod generate;
mod print_help;
mod storage;
mod utils;
mod wallpaper;

use crate::app::App;
use crate::print_help::print_help;
use std::{env, error::Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    // Image generation can take a while, but a hung remote call should fail
    // the attempt rather than hang the session.
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(120))
        .build()?;

    let initial_prompt = if args.len() > 1 {
        Some(args[1..].join(" "))
    } else {
        None
    };

    let mut app = App::new(client)?;
    app.run(initial_prompt).await
}

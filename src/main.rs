use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::path::Path;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use forkify::{
    command_channel, AppConfig, Command, CommandSender, Controller, RecipeDraft, StoreBuilder,
    Views,
};

type BoxError = Box<dyn Error + Send + Sync>;

const USAGE: &str = "commands: search <query> | open <id> | page <n> | servings <n> | bookmark | upload <file.json> | show | quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    debug!("Loaded configuration: {:?}", config);
    let store = StoreBuilder::from_config(&config).build()?;
    let mut controller = Controller::new(store);

    let (tx, rx) = command_channel();
    tokio::spawn(read_commands(tx));

    println!("{}", USAGE);
    controller.run(rx, print_views).await;
    info!("Bye");
    Ok(())
}

/// Forward stdin lines as commands until EOF or `quit`
async fn read_commands(tx: CommandSender) {
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Could not read stdin: {}", e);
                break;
            }
        };
        let command = match parse_command(line.trim()).await {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("{}", e);
                println!("{}", USAGE);
                continue;
            }
        };
        let quit = command == Command::Quit;
        if tx.send(command).is_err() || quit {
            break;
        }
    }
}

async fn parse_command(line: &str) -> Result<Option<Command>, BoxError> {
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "search" => Command::Search(arg.to_string()),
        "open" => Command::Navigate(arg.to_string()),
        "page" => Command::GoToPage(arg.parse()?),
        "servings" => Command::UpdateServings(arg.parse()?),
        "bookmark" => Command::ToggleBookmark,
        "upload" => Command::Upload(read_draft(Path::new(arg)).await?),
        "show" => Command::Show,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {}", other).into()),
    };
    Ok(Some(command))
}

/// Read a flat JSON object of form fields into a draft
async fn read_draft(path: &Path) -> Result<RecipeDraft, BoxError> {
    let contents = tokio::fs::read_to_string(path).await?;
    let fields: Map<String, Value> = serde_json::from_str(&contents)?;
    Ok(fields
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => (key, text),
            other => (key, other.to_string()),
        })
        .collect())
}

fn print_views(views: &Views) {
    let regions = [
        ("recipe", views.recipe.container().text_content()),
        ("results", views.results.container().text_content()),
        ("pagination", views.pagination.container().text_content()),
        ("bookmarks", views.bookmarks.container().text_content()),
        ("upload", views.add_recipe.container().text_content()),
    ];
    for (name, text) in regions {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            println!("[{}] {}", name, text);
        }
    }
}

use log::{error, info};
use recipe_remix::{Action, AppConfig, HtmlPageDisplay, Pipeline};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  random          show a random recipe
  open <name>     show a saved recipe
  save            save the current recipe
  delete <name>   delete a saved recipe
  favorites       list saved recipes
  themes          list remix themes
  remix <theme>   remix the current recipe (theme name or number)
  help            show this help
  quit            exit";

enum Command {
    Run(Action),
    ListFavorites,
    ListThemes,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str, themes: &[String], current: Option<&str>) -> Command {
    let (verb, argument) = match line.trim().split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim(), ""),
    };

    match (verb, argument) {
        ("random", _) => Command::Run(Action::ShowRandom),
        ("open", name) if !name.is_empty() => Command::Run(Action::ShowSaved(name.to_string())),
        ("delete", name) if !name.is_empty() => {
            Command::Run(Action::DeleteFavorite(name.to_string()))
        }
        ("save", _) => match current {
            Some(name) => Command::Run(Action::SaveRecipe(name.to_string())),
            None => Command::Invalid("No recipe to save".to_string()),
        },
        ("remix", theme) if !theme.is_empty() => {
            let theme = theme
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| themes.get(i))
                .map_or(theme, String::as_str);
            Command::Run(Action::Remix(theme.to_string()))
        }
        ("favorites", _) => Command::ListFavorites,
        ("themes", _) => Command::ListThemes,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => Command::Invalid(format!("Unknown command: {}", line.trim())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let display = HtmlPageDisplay::new(&config.output.page_path);
    let mut pipeline = Pipeline::from_config(&config, display);

    info!("Writing page to {}", config.output.page_path);
    println!("{HELP}");
    pipeline.start().await;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let current = pipeline.current_recipe().map(|recipe| recipe.name.clone());
        match parse_command(&line, &config.remix.themes, current.as_deref()) {
            Command::Run(action) => {
                pipeline.dispatch(action).await;
                if let Some(recipe) = pipeline.current_recipe() {
                    println!("Current recipe: {}", recipe.name);
                }
            }
            Command::ListFavorites => {
                pipeline.dispatch(Action::RefreshFavorites).await;
                for name in pipeline.favorites().list() {
                    println!("  {name}");
                }
            }
            Command::ListThemes => {
                for (i, theme) in config.remix.themes.iter().enumerate() {
                    println!("  {}. {}", i + 1, theme);
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Invalid(message) => error!("{}", message),
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use promptline::{
    Config, ConfigureArgs, LOG_FILE_NAME, Logging, PROJECT_VERSION, configure, show_configuration,
    tui::{SelectList, TextPrompt, engine::EngineConfig, style::set_color_enabled},
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log to stderr instead of the log file
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Ask for a line of text
    Text(TextArgs),

    /// Pick one item from a list
    Select(SelectArgs),

    /// Show Config
    #[command(visible_alias = "show-config")]
    ShowConfiguration,

    /// Change stored preferences
    Configure(ConfigureArgs),
}

#[derive(Args)]
struct TextArgs {
    /// Prompt label
    label: String,

    /// Initial, editable value
    #[arg(long)]
    default: Option<String>,

    /// Line printed once above the prompt
    #[arg(long)]
    description: Option<String>,

    /// Reject blank input
    #[arg(long)]
    required: bool,
}

#[derive(Args)]
struct SelectArgs {
    /// Prompt label
    label: String,

    /// Options to choose from
    #[arg(required = true)]
    options: Vec<String>,

    /// Initially highlighted option
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Line printed once above the list
    #[arg(long)]
    description: Option<String>,
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let logging = Logging::new().with_debug_mode(debug);
    if verbose {
        logging.start()
    } else {
        logging.with_file(LOG_FILE_NAME).start()
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("unable to load configuration, using defaults: {e:#}");
            Config::default()
        }
    }
}

fn non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

fn run_text(args: &TextArgs, engine: EngineConfig) -> Result<()> {
    let mut prompt = TextPrompt::new(&args.label)
        .with_default(args.default.as_deref().unwrap_or_default())
        .with_engine_config(engine);
    if let Some(description) = &args.description {
        prompt = prompt.with_description(description);
    }

    let result = if args.required {
        prompt.with_validator(non_blank).run()
    } else {
        prompt.run()
    };
    let result = result.context("Failed to read text")?;

    if result.cancelled {
        eprintln!("Cancelled");
    } else {
        info!("text prompt accepted {} chars", result.value.chars().count());
    }
    Ok(())
}

fn run_select(args: &SelectArgs, engine: EngineConfig) -> Result<()> {
    let mut list = SelectList::new(&args.label, args.options.iter().cloned())
        .with_starting_index(args.start)
        .with_engine_config(engine);
    if let Some(description) = &args.description {
        list = list.with_description(description);
    }

    let result = list.run().context("Failed to read selection")?;

    if result.cancelled {
        eprintln!("Cancelled");
    } else {
        info!("select picked #{}", result.selected_index);
    }
    Ok(())
}

const MENU: [&str; 4] = ["Text prompt", "Select list", "Show configuration", "Quit"];

fn menu(config: &Config) -> SelectList<'static> {
    SelectList::new("What would you like to try?", MENU).with_engine_config(config.engine_config())
}

/// Lets the user try each widget from a menu until they quit.
fn show_menu(config: &Config) -> Result<()> {
    loop {
        let picked = menu(config).run().context("Failed to read menu")?;
        if picked.cancelled {
            return Ok(());
        }

        match picked.selected_index {
            0 => run_text(
                &TextArgs {
                    label: "Your name".to_string(),
                    default: None,
                    description: Some("Enter anything but a blank line".to_string()),
                    required: true,
                },
                config.engine_config(),
            )?,
            1 => run_select(
                &SelectArgs {
                    label: "Favourite colour?".to_string(),
                    options: ["red", "green", "blue"].map(String::from).to_vec(),
                    start: 0,
                    description: None,
                },
                config.engine_config(),
            )?,
            2 => show_configuration()?,
            _ => return Ok(()),
        }
    }
}

fn main() -> Result<()> {
    let args = UserArgs::parse();

    init_logging(args.verbose, args.debug)?;

    let config = load_config();
    set_color_enabled(config.color);

    match args.command {
        None => show_menu(&config),
        Some(Command::Text(text)) => run_text(&text, config.engine_config()),
        Some(Command::Select(select)) => run_select(&select, config.engine_config()),
        Some(Command::ShowConfiguration) => show_configuration(),
        Some(Command::Configure(configure_args)) => configure(&configure_args),
    }
}

#[cfg(test)]
mod tests {
    use promptline::tui::engine::HistoryLimit;

    use super::*;

    #[test]
    fn test_menu_uses_stored_preferences() {
        let config = Config::builder()
            .mask(true)
            .history(HistoryLimit::Disabled)
            .build();

        assert_eq!(menu(&config).engine_config(), &config.engine_config());
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank("x"));
        assert!(!non_blank("  "));
    }
}

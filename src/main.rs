//! dnav - Discover navigation CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dnav::{get_config_value, get_config_values, load_featured, populate_featured, replay, set_config_value, Catalog, Paths, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dnav")]
#[command(about = "Discover navigation - replay page navigation and build featured listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a navigation script and print the breadcrumb trail after each step
    Replay {
        /// Script file, one command per line
        script: PathBuf,

        /// Resource catalogue used to resolve packages
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the featured list from the cached listing
    Featured {
        /// Resource catalogue used to resolve packages
        #[arg(long)]
        catalog: PathBuf,

        /// Listing file (defaults to the cached featured listing)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set shell settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show resolved paths (for debugging)
    Paths,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get setting value(s)
    Get {
        /// Specific key (omit for all)
        key: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a setting value
    Set {
        /// Setting key
        key: String,

        /// Setting value
        value: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let paths = Paths::resolve();

    match cli.command {
        Commands::Paths => {
            let settings = load_settings(&paths);
            let featured = paths.featured_path(settings.featured_file_name.as_deref());
            println!("Settings file:    {}", paths.settings_path().display());
            println!("Cache dir:        {}", paths.cache_dir().display());
            println!("Featured listing: {}", featured.display());
            println!("Settings exist:   {}", paths.settings_path().exists());
            println!("Listing exists:   {}", featured.exists());
        }
        Commands::Config { action } => match action {
            ConfigAction::Set { key, value } => match set_config_value(paths.settings_path(), &key, &value) {
                Ok(()) => println!("Set {} = {}", key, value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            },
            ConfigAction::Get { key: Some(k), json } => match get_config_value(paths.settings_path(), &k) {
                Ok(v) => {
                    if json {
                        println!("{}", serde_json::Value::String(v));
                    } else {
                        println!("{}", v);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            },
            ConfigAction::Get { key: None, json } => match get_config_values(paths.settings_path()) {
                Ok(values) => {
                    if json {
                        print_json(&values);
                    } else if values.is_empty() {
                        println!("No settings set.");
                    } else {
                        for (k, v) in &values {
                            let val: String = v.as_str().map(String::from).unwrap_or_else(|| v.to_string());
                            println!("{} = {}", k, val);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            },
        },
        Commands::Featured { catalog, file, json } => {
            let settings = load_settings(&paths);
            let catalog = load_catalog(Some(catalog));
            let file = file.unwrap_or_else(|| paths.featured_path(settings.featured_file_name.as_deref()));
            let listing = match load_featured(&file) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let rows = populate_featured(&listing, &catalog, &settings.default_screenshot);
            if json {
                print_json(&rows);
            } else if rows.is_empty() {
                println!("No featured applications found.");
            } else {
                print_featured_table(&rows);
            }
        }
        Commands::Replay { script, catalog, json } => {
            let settings = load_settings(&paths);
            let catalog = load_catalog(catalog);
            let content = match std::fs::read_to_string(&script) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: Failed to read {}: {}", script.display(), e);
                    std::process::exit(1);
                }
            };
            let steps = match replay(&content, &catalog, &settings) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}: {}", script.display(), e);
                    std::process::exit(1);
                }
            };

            if json {
                print_json(&steps);
            } else {
                print_steps(&steps);
            }
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(paths: &Paths) -> Settings {
    match Settings::load(paths.settings_path()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %paths.settings_path().display(), error = %e, "Using default settings");
            Settings::default()
        }
    }
}

fn load_catalog(path: Option<PathBuf>) -> Catalog {
    let Some(path) = path else {
        return Catalog::default();
    };
    match Catalog::load(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_featured_table(rows: &[dnav::FeaturedRow]) {
    const INDENT: &str = "        ";

    for r in rows {
        println!("{}", r.package_name);
        println!("{}Name:    {}", INDENT, r.text);
        if !r.comment.is_empty() {
            println!("{}Comment: {}", INDENT, r.comment.lines().next().unwrap_or("").trim());
        }
        println!("{}Icon:    {}", INDENT, r.icon);
        println!("{}Image:   {}", INDENT, r.image);
        println!();
    }
}

fn print_steps(steps: &[dnav::Step]) {
    const INDENT: &str = "        ";

    for s in steps {
        println!("{:>4}  {}", s.line, s.command);
        let trail = s
            .trail
            .iter()
            .map(|label| {
                if s.active.as_deref() == Some(label.as_str()) {
                    format!("[{}]", label)
                } else {
                    label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" > ");
        println!("{}{}", INDENT, trail);
        if let Some(ref e) = s.error {
            println!("{}error: {}", INDENT, e);
        }
    }
}

//! Headless replay of navigation scripts.
//!
//! A script is one command per line; blank lines and `#` comments are skipped.
//! Each command runs against a real [`NavigationStack`] whose pages are plain
//! descriptions, and the breadcrumb trail is captured after every step.

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info};

use crate::breadcrumb::{BreadcrumbTrail, Breadcrumbs};
use crate::catalog::Catalog;
use crate::config::Settings;
use crate::models::{DetailRequest, NavRequest};
use crate::navigate::{Navigator, PageFactories};
use crate::shell::ShellState;
use crate::stack::{FactoryError, NavError, NavigationStack};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Menu(String),
    Category(String),
    Search(String),
    Mime(String),
    Origin(String),
    Extends(String),
    App(String),
    Reviews(String),
    Addons(String),
    Back,
    Pop(usize),
    Click(usize),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse a script into `(line number, command)` pairs.
pub fn parse_script(script: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    let mut commands = Vec::new();
    for (i, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((w, a)) => (w, a.trim()),
            None => (line, ""),
        };
        let command = parse_command(word, arg).map_err(|message| ScriptError {
            line: i + 1,
            message,
        })?;
        commands.push((i + 1, command));
    }
    Ok(commands)
}

fn parse_command(word: &str, arg: &str) -> Result<Command, String> {
    let text = |make: fn(String) -> Command| {
        if arg.is_empty() {
            Err(format!("'{word}' needs an argument"))
        } else {
            Ok(make(arg.to_string()))
        }
    };
    let index = |make: fn(usize) -> Command| {
        arg.parse::<usize>()
            .map(make)
            .map_err(|_| format!("'{word}' needs a stack index, got '{arg}'"))
    };

    match word {
        "home" => Ok(Command::Home),
        "clear" => Ok(Command::Clear),
        "back" => Ok(Command::Back),
        // an empty search clears the search
        "search" => Ok(Command::Search(arg.to_string())),
        "menu" => text(Command::Menu),
        "category" => text(Command::Category),
        "mime" => text(Command::Mime),
        "origin" => text(Command::Origin),
        "extends" => text(Command::Extends),
        "app" => text(Command::App),
        "reviews" => text(Command::Reviews),
        "addons" => text(Command::Addons),
        "pop" => index(Command::Pop),
        "click" => index(Command::Click),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// Page built by the headless factories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessPage {
    pub kind: &'static str,
    pub title: String,
}

/// State after one replayed command.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub line: usize,
    pub command: String,
    pub trail: Vec<String>,
    pub active: Option<String>,
    pub top_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Factories that describe the requested page, refusing packages the
/// catalogue does not know.
pub fn headless_factories(catalog: Rc<Catalog>) -> PageFactories<HeadlessPage> {
    let build = move |request: &NavRequest| -> Result<HeadlessPage, FactoryError> {
        let package = match request {
            NavRequest::Detail(r) => Some(&r.package_name),
            NavRequest::Reviews(r) => Some(&r.package_name),
            NavRequest::Addons(r) => Some(&r.package_name),
            _ => None,
        };
        if let Some(package) = package {
            if catalog.get(package).is_none() {
                return Err(FactoryError::new(format!("unknown package {package}")));
            }
        }
        let title = match request {
            NavRequest::Category(r) => r.category.clone(),
            NavRequest::Search(r) => serde_json::to_string(r).unwrap_or_default(),
            NavRequest::Detail(r) => r.package_name.clone(),
            NavRequest::Reviews(r) => r.package_name.clone(),
            NavRequest::Addons(r) => r.package_name.clone(),
        };
        Ok(HeadlessPage {
            kind: request.kind(),
            title,
        })
    };
    PageFactories::uniform(build)
}

/// Run every command of `script`. Navigation failures are recorded in the
/// step and the run continues; only parse errors abort.
pub fn replay(script: &str, catalog: &Catalog, settings: &Settings) -> Result<Vec<Step>, ScriptError> {
    let commands = parse_script(script)?;
    let catalog = Rc::new(catalog.clone());

    let home = HeadlessPage {
        kind: "home",
        title: settings.home_label.clone(),
    };
    let mut stack = NavigationStack::new(
        &settings.home_label,
        &settings.home_icon,
        home,
        BreadcrumbTrail::new(),
    );
    let shell = ShellState::attach(&mut stack);
    let mut navigator = Navigator::new(headless_factories(Rc::clone(&catalog)));

    let mut steps = Vec::with_capacity(commands.len());
    for (line, command) in commands {
        debug!(line, ?command, "Replaying");
        let result = run_command(&mut navigator, &mut stack, &catalog, &command);
        if let (Command::Menu(name), Ok(())) = (&command, &result) {
            shell.borrow_mut().set_top_level(name);
        }

        let trail = stack.breadcrumbs();
        steps.push(Step {
            line,
            command: describe(&command),
            trail: trail.labels().into_iter().map(String::from).collect(),
            active: trail.current_label().map(String::from),
            top_level: shell.borrow().top_level().map(String::from),
            error: result.err().map(|e| e.to_string()),
        });
    }

    info!(steps = steps.len(), depth = stack.depth(), "Replay finished");
    Ok(steps)
}

fn run_command(
    navigator: &mut Navigator<HeadlessPage>,
    stack: &mut NavigationStack<HeadlessPage>,
    catalog: &Catalog,
    command: &Command,
) -> Result<(), NavError> {
    match command {
        Command::Home => navigator.go_home(stack),
        Command::Clear => stack.clear(),
        Command::Menu(name) => navigator.open_category_from_menu(stack, name, ""),
        Command::Category(name) => navigator.open_category(stack, name, ""),
        Command::Search(text) => {
            let category = current_category(stack);
            navigator.open_search(stack, text, category.as_deref())
        }
        Command::Mime(mime) => navigator.open_mime_search(stack, mime),
        Command::Origin(origin) => navigator.open_origin(stack, origin),
        Command::Extends(package) => navigator.open_extends(stack, package),
        Command::App(package) => {
            let request = match catalog.get(package) {
                Some(r) => DetailRequest {
                    package_name: r.package_name.clone(),
                    name: r.name.clone(),
                    icon: r.icon.clone(),
                },
                None => DetailRequest {
                    package_name: package.clone(),
                    name: package.clone(),
                    icon: String::new(),
                },
            };
            navigator.open_application(stack, request)
        }
        Command::Reviews(package) => navigator.open_reviews(stack, package, &display_name(catalog, package)),
        Command::Addons(package) => navigator.open_addons(stack, package, &display_name(catalog, package)),
        Command::Back => stack.pop().map(|_| ()),
        Command::Pop(index) => stack.pop_to(*index),
        Command::Click(index) => stack.activate_breadcrumb(*index),
    }
}

/// Category of the nearest category page below the top.
fn current_category(stack: &NavigationStack<HeadlessPage>) -> Option<String> {
    stack
        .entries()
        .iter()
        .rev()
        .find(|e| e.view().kind == "category")
        .map(|e| e.view().title.clone())
}

fn display_name(catalog: &Catalog, package: &str) -> String {
    catalog
        .get(package)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| package.to_string())
}

fn describe(command: &Command) -> String {
    match command {
        Command::Home => "home".to_string(),
        Command::Clear => "clear".to_string(),
        Command::Back => "back".to_string(),
        Command::Menu(a) => format!("menu {a}"),
        Command::Category(a) => format!("category {a}"),
        Command::Search(a) => format!("search {a}").trim_end().to_string(),
        Command::Mime(a) => format!("mime {a}"),
        Command::Origin(a) => format!("origin {a}"),
        Command::Extends(a) => format!("extends {a}"),
        Command::App(a) => format!("app {a}"),
        Command::Reviews(a) => format!("reviews {a}"),
        Command::Addons(a) => format!("addons {a}"),
        Command::Pop(i) => format!("pop {i}"),
        Command::Click(i) => format!("click {i}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Resource;

    fn catalog() -> Catalog {
        Catalog::from_resources([Resource {
            package_name: "org.kde.kpat".into(),
            name: "KPatience".into(),
            icon: "kpat".into(),
            comment: String::new(),
            screenshot: None,
        }])
    }

    #[test]
    fn parses_commands_and_skips_comments() {
        let commands = parse_script("# start\nmenu Games\n\nsearch\npop 0\n").unwrap();
        assert_eq!(
            commands,
            vec![
                (2, Command::Menu("Games".into())),
                (4, Command::Search(String::new())),
                (5, Command::Pop(0)),
            ]
        );
    }

    #[test]
    fn parse_errors_carry_line_numbers() {
        let err = parse_script("home\npop x").unwrap_err();
        assert_eq!(err.line, 2);
        let err = parse_script("fly away").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown command 'fly'");
        assert!(parse_script("app").is_err());
    }

    #[test]
    fn replay_tracks_trail_and_failures() {
        let script = "menu Games\napp org.kde.kpat\nreviews org.kde.kpat\napp org.kde.missing\npop 0\n";
        let steps = replay(script, &catalog(), &Settings::default()).unwrap();

        assert_eq!(steps[2].trail, vec!["Home", "Games", "KPatience", "Reviews: KPatience"]);
        assert_eq!(steps[2].top_level.as_deref(), Some("Games"));
        assert!(steps[3].error.as_deref().unwrap().contains("unknown package"));
        assert_eq!(steps[3].trail.len(), 4);
        assert_eq!(steps[4].trail, vec!["Home"]);
        assert_eq!(steps[4].active.as_deref(), Some("Home"));
    }

    #[test]
    fn search_uses_enclosing_category() {
        let script = "category Office\nsearch calc\nhome\n";
        let steps = replay(script, &catalog(), &Settings::default()).unwrap();
        assert_eq!(steps[1].trail, vec!["Home", "Office", "Search: calc"]);
        assert_eq!(steps[2].trail, vec!["Home"]);
        assert_eq!(steps[2].top_level, None);
    }
}

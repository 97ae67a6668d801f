//! Terminal front end for the widget runtime.
//!
//! Starts one of the bundled demo applications, or a static layout read from
//! JSON, and drives it from the keyboard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use widget_rts::config::Config;
use widget_rts::demo::{DemoApp, StaticLayout};
use widget_rts::logging;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Reactive widget runtime in the terminal")]
struct Cli {
    /// Demo application to start (overrides `ui.app` from the config file).
    #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(DemoApp::NAMES))]
    app: Option<String>,

    /// Mount a static widget tree from a JSON file instead of a demo.
    #[arg(long, value_name = "FILE.json", conflicts_with = "app")]
    layout: Option<PathBuf>,

    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    if let Some(path) = &cli.layout {
        let layout = StaticLayout::load(path)?;
        let title = format!("layout: {}", path.display());
        tracing::info!(path = %path.display(), "starting static layout");
        return widget_rts::ui::run(&config, &title, layout);
    }

    let name = cli.app.as_deref().unwrap_or(&config.ui.app);
    let app = DemoApp::from_name(name).with_context(|| format!("unknown app '{name}'"))?;
    tracing::info!(app = app.name(), "starting demo");
    widget_rts::ui::run(&config, app.name(), app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn layout_conflicts_with_app() {
        let parsed = Cli::try_parse_from(["widget-rts", "--app", "panel", "--layout", "x.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_app_is_rejected() {
        assert!(Cli::try_parse_from(["widget-rts", "--app", "nope"]).is_err());
        let cli = Cli::try_parse_from(["widget-rts", "--app", "converter"]).unwrap();
        assert_eq!(cli.app.as_deref(), Some("converter"));
    }
}

use clap::Parser;

/// Command line contract shared by every scrape script.
#[derive(Debug, Parser)]
#[command(
    name = "clipper-scripts",
    about = "Browser scrape scripts for the social bookmark clipper"
)]
pub struct ScriptArgs {
    /// Script to run, e.g. `scrape-x`. A leading path or file extension is
    /// tolerated.
    pub script: String,
    /// Run the browser headless ("true") or headed ("false").
    #[arg(long, action = clap::ArgAction::Set, value_parser = parse_bool_flag, default_value = "false")]
    pub headless: bool,
    /// Browser engine: chromium, firefox, webkit or brave.
    #[arg(long, default_value = "chromium")]
    pub browser: String,
    /// Semicolon-delimited `name=value` cookie string for authentication.
    #[arg(long)]
    pub cookies: Option<String>,
    /// Brave executable path, used when --browser is brave.
    #[arg(long = "bravePath")]
    pub brave_path: Option<String>,
}

impl ScriptArgs {
    /// Case-normalized browser choice.
    pub fn browser_choice(&self) -> String {
        self.browser.to_lowercase()
    }
}

fn parse_bool_flag(raw: &str) -> Result<bool, String> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(format!("expected \"true\" or \"false\", got {other:?}")),
    }
}

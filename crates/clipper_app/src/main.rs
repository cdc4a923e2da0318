mod logging;
mod persistence;
mod session;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clipper_core::{JobOutcome, Msg, Platform, ScrapeStatus};
use clipper_engine::{EngineEvent, EngineHandle, ScraperSettings};
use indicatif::{ProgressBar, ProgressStyle};

use crate::logging::LogDestination;
use crate::session::{core_item, Session};

#[derive(Parser)]
#[command(name = "clipper")]
#[command(about = "Scrape saved social media posts into Markdown notes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path
    #[arg(short, long, default_value = "clipper-settings.json")]
    settings: PathBuf,

    /// Vault directory notes and the staged review set are written to
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Mirror the log to stderr as well as clipper.log
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default settings file
    Init,
    /// Scrape a platform's saved posts and stage them for review
    Scrape {
        /// Platform to scrape
        platform: PlatformArg,
        /// Import every scraped item immediately instead of staging only
        #[arg(long)]
        import_all: bool,
    },
    /// Show the staged review items
    List,
    /// Flip the selection flag of staged items (1-based indexes)
    Toggle { indexes: Vec<usize> },
    /// Add a tag to a staged item
    Tag { index: usize, tag: String },
    /// Remove a tag from a staged item
    Untag { index: usize, tag: String },
    /// Import the selected staged items as notes
    Import,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlatformArg {
    X,
    Instagram,
    Threads,
    Youtube,
}

impl PlatformArg {
    fn core(self) -> Platform {
        match self {
            PlatformArg::X => Platform::X,
            PlatformArg::Instagram => Platform::Instagram,
            PlatformArg::Threads => Platform::Threads,
            PlatformArg::Youtube => Platform::YouTube,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::initialize(if cli.verbose {
        LogDestination::Both
    } else {
        LogDestination::File
    });

    let settings = persistence::load_settings(&cli.settings);
    let mut session = Session::new(settings, cli.vault.clone());

    match cli.command {
        Commands::Init => {
            if cli.settings.exists() {
                bail!("settings file {:?} already exists", cli.settings);
            }
            persistence::save_settings(&cli.settings, &ScraperSettings::default())?;
            println!("Wrote default settings to {:?}", cli.settings);
            println!("Fill in scriptsPath and per-platform cookies before scraping.");
        }
        Commands::Scrape {
            platform,
            import_all,
        } => run_scrape(&mut session, platform.core(), import_all)?,
        Commands::List => {
            restore_review(&mut session, &cli.vault)?;
            print_review(&session);
        }
        Commands::Toggle { indexes } => {
            restore_review(&mut session, &cli.vault)?;
            for index in indexes {
                if index == 0 {
                    bail!("indexes are 1-based");
                }
                session.dispatch(Msg::SelectionToggled { index: index - 1 });
            }
            print_review(&session);
        }
        Commands::Tag { index, tag } => {
            restore_review(&mut session, &cli.vault)?;
            if index == 0 {
                bail!("indexes are 1-based");
            }
            session.dispatch(Msg::TagAdded {
                index: index - 1,
                tag,
            });
            print_review(&session);
        }
        Commands::Untag { index, tag } => {
            restore_review(&mut session, &cli.vault)?;
            if index == 0 {
                bail!("indexes are 1-based");
            }
            session.dispatch(Msg::TagRemoved {
                index: index - 1,
                tag,
            });
            print_review(&session);
        }
        Commands::Import => {
            restore_review(&mut session, &cli.vault)?;
            session.dispatch(Msg::ImportRequested);
            report_import(&session)?;
        }
    }

    Ok(())
}

/// Drives one scrape job to its terminal state, rendering progress live.
fn run_scrape(session: &mut Session, platform: Platform, import_all: bool) -> Result<()> {
    let engine = EngineHandle::new(session.settings().clone());
    session.attach_engine(engine.clone());
    session.dispatch(Msg::ScrapeRequested { platform });
    if session.view().job.is_none() {
        bail!("could not start a scrape job");
    }

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40}] {pos:>3}% {msg}")
            .expect("progress template")
            .progress_chars("=> "),
    );
    bar.set_message(format!("Scraping {}", platform.label()));

    loop {
        while let Some(event) = engine.try_recv() {
            match event {
                EngineEvent::Progress {
                    job_id,
                    percent,
                    step,
                } => {
                    bar.set_position(u64::from(percent));
                    bar.set_message(step.clone());
                    session.dispatch(Msg::JobProgress {
                        job_id,
                        percent,
                        step: Some(step),
                    });
                }
                EngineEvent::JobCompleted { job_id, result } => {
                    let outcome = match result {
                        Ok(items) => {
                            JobOutcome::Success(items.into_iter().map(core_item).collect())
                        }
                        Err(err) => JobOutcome::Failed(err.to_string()),
                    };
                    session.dispatch(Msg::JobDone { job_id, outcome });
                }
            }
        }

        let view = session.view();
        match view.job.as_ref().map(|job| job.status) {
            Some(ScrapeStatus::Completed) => {
                bar.finish_and_clear();
                break;
            }
            Some(ScrapeStatus::Failed) => {
                bar.finish_and_clear();
                let message = view
                    .job
                    .and_then(|job| job.error)
                    .unwrap_or_else(|| "scrape failed".to_string());
                bail!("{} scrape failed: {message}", platform.label());
            }
            _ => thread::sleep(Duration::from_millis(20)),
        }
    }

    let staged = session.view().review.map(|review| review.total).unwrap_or(0);
    println!("Scraped {staged} item(s) from {}", platform.label());
    print_review(session);

    if import_all {
        session.dispatch(Msg::ImportRequested);
        report_import(session)?;
    } else if staged > 0 {
        println!("Edit the staged set with `clipper list|toggle|tag`, then run `clipper import`.");
    }
    Ok(())
}

fn restore_review(session: &mut Session, vault: &Path) -> Result<()> {
    match persistence::load_review(vault) {
        Some(set) => {
            session.dispatch(Msg::RestoreReview(set));
            Ok(())
        }
        None => bail!("no staged review found; run `clipper scrape <platform>` first"),
    }
}

fn print_review(session: &Session) {
    let Some(set) = session.review() else {
        println!("No items staged for review.");
        return;
    };
    if set.items.is_empty() {
        println!("No items staged for review.");
        return;
    }
    println!("Staged items from {}:", set.platform.label());
    for (index, entry) in set.items.iter().enumerate() {
        let mark = if entry.selected { "x" } else { " " };
        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!("  #{}", entry.tags.join(" #"))
        };
        println!("{:>3} [{mark}] {}{tags}", index + 1, short_title(&entry.item.title));
        println!("        {}", entry.item.url);
    }
}

fn report_import(session: &Session) -> Result<()> {
    let view = session.view();
    if let Some(message) = view.import_error {
        bail!("import failed: {message}");
    }
    match view.last_import {
        Some(stats) if stats.imported > 0 && stats.skipped == 0 => {
            println!("Successfully imported {} item(s)", stats.imported);
        }
        Some(stats) if stats.imported > 0 => {
            println!(
                "Imported {} item(s), skipped {} duplicate(s)",
                stats.imported, stats.skipped
            );
        }
        Some(stats) if stats.skipped > 0 => {
            println!(
                "All {} item(s) were skipped (notes already exist)",
                stats.skipped
            );
        }
        _ => println!("Nothing was selected to import"),
    }
    Ok(())
}

fn short_title(title: &str) -> String {
    const MAX: usize = 60;
    if title.chars().count() <= MAX {
        title.to_string()
    } else {
        let mut short: String = title.chars().take(MAX - 1).collect();
        short.push('…');
        short
    }
}

//! Command-line front end: run the content-script pipeline over saved pages

pub mod interactive;

use crate::config::ToolsConfig;
use crate::content::ContentSession;
use crate::models::{CardSet, DisplaySettings, Rarity};
use crate::report::{collection_summary, generate_report};
use crate::status::{check_setup_status, BadgeState};
use crate::storage::{FileStorage, StoredState};
use crate::utils::validate_profile_url;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ptcgp-trade-tools")]
#[command(about = "Find and highlight card trades on ptcgp-tracker.com profiles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON5 config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where the extension state is kept
    #[arg(short, long, global = true, default_value = "ptcgp-trade-state.json")]
    pub state: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the collection from a saved profile page
    Extract {
        /// Saved HTML of a tracker profile page
        #[arg(short, long)]
        input: PathBuf,

        /// URL the page was saved from
        #[arg(short, long)]
        url: Option<String>,

        /// Store the result as your own collection
        #[arg(long)]
        save: bool,
    },

    /// Match a saved profile page against your stored collection
    Analyze {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        url: Option<String>,

        /// Print card annotations and page style as JSON
        #[arg(long)]
        json: bool,

        /// Write a markdown report next to the input
        #[arg(short, long)]
        report: bool,
    },

    /// Show whether your profile and collection are set up
    Status,

    /// Show or change display settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Set your own tracker profile URL
    SetProfile { url: String },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Restore the default filters
    Reset,
    /// Flip one rarity filter (code or symbol, e.g. diamond1 or ♢)
    ToggleRarity { rarity: String },
    /// Flip one set filter (e.g. A1a)
    ToggleSet { set: String },
    /// Only show matched cards on other profiles
    MatchedOnly {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Turn the trade overlay on or off
    Overlay {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Edit settings with interactive prompts
    Edit,
}

pub fn load_config(path: Option<&Path>) -> Result<ToolsConfig> {
    match path {
        Some(path) => ToolsConfig::load(path).with_context(|| format!("loading config {}", path.display())),
        None => Ok(ToolsConfig::default()),
    }
}

pub fn run(cli: Cli, config: ToolsConfig) -> Result<()> {
    let storage = FileStorage::new(&cli.state);

    match cli.command {
        Commands::Extract { input, url, save } => {
            let html = read_page(&input)?;
            let session = ContentSession::new(&html, url.as_deref(), config.clone());
            let scraped = session.scrape();
            let Some(collection) = scraped.collection else {
                bail!(scraped.error.unwrap_or_else(|| "no collection data".to_string()));
            };

            println!("{}", "📋 Extracted collection".bold().blue());
            println!("{}", "=".repeat(50).blue());
            print!("{}", collection_summary(&collection, None));

            if save {
                StoredState::save_collection(&storage, &collection)?;
                if let Some(url) = &url {
                    if validate_profile_url(url, &config.profile_url_prefix).is_ok() {
                        StoredState::save_profile_url(&storage, url)?;
                    }
                }
                println!();
                println!("{} {}", "✅ Saved to".green(), storage.path().display());
            }
        }

        Commands::Analyze { input, url, json, report } => {
            let html = read_page(&input)?;
            let stored = StoredState::load(&storage)?;
            let mut session = ContentSession::new(&html, url.as_deref(), config);
            let summary = session.run_analysis(&stored, Utc::now());

            if json {
                let output = serde_json::json!({
                    "summary": summary,
                    "opportunities": session.opportunities(),
                    "pageStyle": session.page_style(),
                    "annotations": session.annotations(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_badge(summary.badge);
                if let Some(setup) = &summary.setup {
                    if let Some(reason) = &setup.reason {
                        println!("{} {}", "⚠️ ".yellow(), reason.yellow());
                    }
                }
                println!(
                    "They have, you want: {}",
                    summary.counts.cards_they_have_that_i_want.to_string().bold()
                );
                for card in session.opportunities().their_tradable_i_want.cards() {
                    println!("  {} {}", "★".yellow(), card);
                }
                println!(
                    "You have, they want: {}",
                    summary.counts.cards_i_have_that_they_want.to_string().bold()
                );
                for card in session.opportunities().my_tradable_they_want.cards() {
                    println!("  {} {}", "✓".green(), card);
                }
                println!(
                    "Cards: {} visible, {} hidden",
                    summary.filters.visible, summary.filters.hidden
                );
            }

            if report {
                let theirs = session.snapshot().viewed.as_ref().map(|profile| &profile.collection);
                let content = generate_report(session.opportunities(), stored.collection.as_ref(), theirs);
                let report_path = input.with_extension("md");
                std::fs::write(&report_path, content)
                    .with_context(|| format!("writing report {}", report_path.display()))?;
                eprintln!("  - Report: {}", report_path.display());
            }
        }

        Commands::Status => {
            let stored = StoredState::load(&storage)?;
            let status = check_setup_status(
                stored.profile_url.as_deref(),
                stored.collection.as_ref(),
                Utc::now(),
                config.stale_after_hours,
            );

            println!("{}", "📊 Setup Status".bold().blue());
            println!("{}", "=".repeat(50).blue());
            println!("Profile: {}", stored.profile_url.as_deref().unwrap_or("(not set)"));
            match &stored.collection {
                Some(collection) => print!("{}", collection_summary(collection, Some(&status))),
                None => println!("Collection: (none)"),
            }
            println!();
            if status.needs_attention {
                println!(
                    "{} {}",
                    "⚠️  Needs attention:".yellow().bold(),
                    status.reason.as_deref().unwrap_or_default()
                );
            } else {
                println!("{}", "✅ Ready to trade".green().bold());
            }
        }

        Commands::Settings { action } => {
            let stored = StoredState::load(&storage)?;
            let mut settings = stored.trading_settings;

            match action {
                None => {}
                Some(SettingsAction::Reset) => settings = StoredState::reset_settings(&storage)?,
                Some(SettingsAction::ToggleRarity { rarity }) => {
                    let Some(rarity) = Rarity::parse(&rarity) else {
                        bail!("unknown rarity '{rarity}'");
                    };
                    settings.toggle_rarity(rarity);
                }
                Some(SettingsAction::ToggleSet { set }) => {
                    let Some(set) = CardSet::from_code(&set) else {
                        bail!("unknown set '{set}'");
                    };
                    settings.toggle_collection(set);
                }
                Some(SettingsAction::MatchedOnly { enabled }) => settings.show_matched_only = enabled,
                Some(SettingsAction::Overlay { enabled }) => settings.show_trade_overlay = enabled,
                Some(SettingsAction::Edit) => settings = interactive::edit_settings(settings)?,
            }

            StoredState::save_settings(&storage, &settings)?;
            print_settings(&settings);
        }

        Commands::SetProfile { url } => {
            validate_profile_url(&url, &config.profile_url_prefix)?;
            StoredState::save_profile_url(&storage, &url)?;
            println!("{} {}", "✅ Profile set to".green(), url);
        }
    }

    Ok(())
}

fn read_page(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading page {}", path.display()))
}

fn print_badge(badge: BadgeState) {
    let label = match badge {
        BadgeState::None => "not a tracker page".dimmed(),
        BadgeState::Gray => "nothing to compare".white(),
        BadgeState::Yellow => "setup needs attention".yellow(),
        BadgeState::Green => "trades analyzed".green(),
    };
    println!("{} {}", "Badge:".bold(), label);
}

pub fn print_settings(settings: &DisplaySettings) {
    let on_off = |enabled: bool| if enabled { "on".green() } else { "off".red() };

    println!("{}", "⚙️  Trading Settings".bold().blue());
    println!("  Trade overlay:     {}", on_off(settings.show_trade_overlay));
    println!("  Matched only:      {}", on_off(settings.show_matched_only));
    println!("  Rarities:");
    for rarity in Rarity::ALL {
        println!(
            "    {:<5} {:<11} {}",
            rarity.symbol(),
            rarity.label(),
            on_off(settings.is_rarity_visible(rarity))
        );
    }
    println!("  Sets:");
    for set in CardSet::ALL {
        println!(
            "    {:<4} {:<21} {}",
            set.code(),
            set.name(),
            on_off(settings.is_collection_visible(set))
        );
    }
}

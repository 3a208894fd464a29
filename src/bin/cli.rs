//! jamfeed CLI
//!
//! Offline tools for roster snapshots:
//! - Render a snapshot the way the dashboard shows it
//! - Print summary stats
//! - Inspect the timezone layout
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use jamfeed::config::Config;
use jamfeed::render::render_dashboard;
use jamfeed::roster::layout::bucket_label;
use jamfeed::roster::{Dashboard, Roster, RosterStats};

#[derive(Parser)]
#[command(name = "jamfeed-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect code-jam roster snapshots")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file for layout settings (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a snapshot as the dashboard would
    Render {
        /// Snapshot JSON file ("-" for stdin)
        snapshot: PathBuf,
    },

    /// Show participant counts
    Stats {
        /// Snapshot JSON file ("-" for stdin)
        snapshot: PathBuf,
    },

    /// Show timezone columns and positions for members looking for a group
    Layout {
        /// Snapshot JSON file ("-" for stdin)
        snapshot: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    let metrics = config.layout.metrics();

    match cli.command {
        Commands::Render { snapshot } => {
            let roster = read_snapshot(&snapshot)?;
            let dashboard = Dashboard::build(&roster, &metrics)?;
            print!("{}", render_dashboard(&dashboard));
        }

        Commands::Stats { snapshot } => {
            let roster = read_snapshot(&snapshot)?;
            let stats = RosterStats::collect(&roster);

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
                _ => print_stats(&stats),
            }
        }

        Commands::Layout { snapshot } => {
            let roster = read_snapshot(&snapshot)?;
            let dashboard = Dashboard::build(&roster, &metrics)?;
            let layout = &dashboard.layout;

            if cli.format == "json" {
                let placed: Vec<_> = layout
                    .placed()
                    .iter()
                    .map(|p| {
                        serde_json::json!({
                            "name": p.member.name,
                            "timezone": p.member.timezone,
                            "bucket": p.bucket,
                            "rank": p.rank,
                            "left_percent": p.left_percent,
                            "top_px": p.top_px,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&placed)?);
            } else if layout.is_empty() {
                println!("No members looking for a group");
            } else {
                println!("{:<8} | {:<6} | {:<6} | {}", "Column", "Offset", "Count", "Members");
                println!("{}", "-".repeat(50));
                for bucket in layout.occupied() {
                    let names: Vec<&str> =
                        layout.bucket(bucket).iter().map(|m| m.name.as_str()).collect();
                    println!(
                        "{:<8} | {:<6} | {:<6} | {}",
                        bucket_label(bucket),
                        layout.offset(bucket),
                        names.len(),
                        names.join(", ")
                    );
                }
                println!();
                println!("Content height: {:.0}px", layout.content_height(&metrics));
            }
        }

        Commands::Config { output } => {
            let config = jamfeed::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn read_snapshot(path: &Path) -> anyhow::Result<Roster> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {:?}", path))?
    };

    Roster::parse(&content).with_context(|| format!("Invalid snapshot {:?}", path))
}

fn print_stats(stats: &RosterStats) {
    println!("{:<20} {:>6}", "Total participants", stats.total_count());
    println!("{}", "-".repeat(27));
    println!("{:<20} {:>6}", "Team members", stats.team_member_count);
    println!("{:<20} {:>6}", "Teams", stats.team_count);
    println!("{:<20} {:>6}", "Looking for group", stats.lfg_count);
    println!("{:<20} {:>6}", "Solo", stats.solo_count);
    println!("{:<20} {:>6}", "Managers", stats.manager_count);
}

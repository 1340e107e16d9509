// src/cli.rs
use std::{fs, path::{Path, PathBuf}};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::STORE_DIR;
use crate::config::{Settings, Timings};
use crate::dom::Tree;
use crate::engine::{apply_pass, debug_report};
use crate::specs::labels::classify;
use crate::store::SettingsStore;
use crate::supervisor::redirect::{location_redirect, with_location};
use crate::supervisor::replay::{Script, run_script};

#[derive(Parser, Debug)]
#[command(author, version, about = "Nellis Auction listing filter: hide by condition/location, add search links")]
pub struct Cli {
    /// Settings store directory.
    #[arg(long, global = true, default_value = STORE_DIR)]
    pub store: PathBuf,

    /// Debug logging to stderr (otherwise info to <store>/debug.log).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one apply pass over a saved page.
    Apply {
        page: PathBuf,
        /// Settings JSON to use instead of the store.
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Page address; checked against the saved location first.
        #[arg(long)]
        url: Option<String>,
        /// Write the filtered page here.
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Print the pass summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show the labels, condition map and first listings the engine sees.
    Debug {
        page: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Classify one label text.
    Classify { text: String },
    /// Print the address with the location parameter set or removed.
    Redirect {
        #[arg(long)]
        url: String,
        /// Location to set; omit to use the saved filter.
        #[arg(long, conflicts_with = "clear")]
        location: Option<String>,
        /// Remove the location parameter.
        #[arg(long)]
        clear: bool,
    },
    /// Replay a scripted session (mutations, navigations, messages) on virtual time.
    Replay { page: PathBuf, script: PathBuf },
    /// Show or reset the stored settings.
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum SettingsAction {
    Show,
    Reset,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_dir = if cli.verbose { None } else { Some(cli.store.as_path()) };
    crate::log::init(log_dir, cli.verbose);
    execute(cli)
}

pub fn execute(cli: Cli) -> Result<()> {
    let store = SettingsStore::new(&cli.store);

    match cli.command {
        Command::Apply { page, settings, url, out, json } => {
            let settings = match settings {
                Some(p) => read_settings(&p)?,
                None => store.load()?,
            };
            if let Some(to) = url.as_deref().and_then(|u| location_redirect(&settings, u)) {
                if json {
                    println!("{}", serde_json::json!({ "redirect": to }));
                } else {
                    println!("redirect: {to}");
                }
                return Ok(());
            }
            let mut tree = Tree::parse(&read(&page)?);
            let summary = apply_pass(&mut tree, &settings);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                println!("hidden: {}", summary.hidden_ids.join(","));
                println!("shown: {}", summary.shown_ids.join(","));
            }
            if let Some(out) = out {
                fs::write(&out, tree.to_html()).wrap_err_with(|| format!("writing {}", out.display()))?;
            }
        }
        Command::Debug { page, json } => {
            let tree = Tree::parse(&read(&page)?);
            let report = debug_report(&tree, &store.load()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Classify { text } => {
            let label = classify(&text);
            println!("condition: {}", label.condition);
            println!("location: {}", label.location.unwrap_or("-"));
        }
        Command::Redirect { url, location, clear } => {
            let to = if clear {
                Some(with_location(&url, None)?)
            } else if let Some(loc) = location {
                Some(with_location(&url, Some(&loc))?)
            } else {
                location_redirect(&store.load()?, &url)
            };
            match to {
                Some(to) => println!("{to}"),
                None => println!("no redirect"),
            }
        }
        Command::Replay { page, script } => {
            let script = Script::from_json(&read(&script)?)?;
            let mut source = store.clone();
            let (_, report) = run_script(&read(&page)?, script, &mut source, Timings::default());
            print!("{report}");
        }
        Command::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => println!("{}", serde_json::to_string_pretty(&store.load()?)?),
            SettingsAction::Reset => {
                store.reset()?;
                println!("settings reset: {}", store.path().display());
            }
        },
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))
}

fn read_settings(path: &Path) -> Result<Settings> {
    Ok(serde_json::from_str(&read(path)?)?)
}

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ini::{Ini, LookupError};

/// Inspect and edit INI files.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Log file access at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the file in canonical form.
    Fmt {
        path: PathBuf,
        /// Rewrite the file in place instead of printing it.
        #[arg(short, long)]
        write: bool,
    },
    /// Print the value of a key.
    Get {
        path: PathBuf,
        section: String,
        key: String,
    },
    /// Set the value of a key and save the file in canonical form.
    Set {
        path: PathBuf,
        section: String,
        key: String,
        value: String,
    },
    /// List section names, sorted.
    Sections { path: PathBuf },
    /// Print the file as JSON.
    Json { path: PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run(cli.command)
}

fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Fmt { path, write } => {
            let ini = load(&path)?;
            if write {
                save(&ini, &path)?;
            } else {
                ini.write_to(&mut io::stdout().lock())?;
            }
        }
        Command::Get { path, section, key } => {
            let ini = load(&path)?;
            match ini.try_get(&section, &key) {
                Ok(value) => println!("{value}"),
                Err(LookupError::SectionNotFound) => {
                    eprintln!("no section named {section:?}");
                    return Ok(ExitCode::FAILURE);
                }
                Err(LookupError::KeyNotFound) => {
                    eprintln!("no key named {key:?} in section {section:?}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Set {
            path,
            section,
            key,
            value,
        } => {
            let mut ini = load(&path)?;
            ini.set(section, key, value);
            save(&ini, &path)?;
        }
        Command::Sections { path } => {
            let ini = load(&path)?;
            let mut names = ini.section_names().collect::<Vec<&str>>();
            names.sort_unstable();

            for name in names {
                println!("{name}");
            }
        }
        Command::Json { path } => {
            let ini = load(&path)?;
            let json = serde_json::to_string_pretty(&ini).context("failed to encode JSON")?;
            println!("{json}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load(path: &Path) -> anyhow::Result<Ini> {
    Ini::load_file(path).with_context(|| format!("failed to load {}", path.display()))
}

fn save(ini: &Ini, path: &Path) -> anyhow::Result<()> {
    ini.save_file(path)
        .with_context(|| format!("failed to save {}", path.display()))
}

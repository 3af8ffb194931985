use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use icon_forge::{FsAssetSink, IconError, IconGenerator, IconResult, ProfileSet};
use tracing_subscriber::EnvFilter;

/// Regenerate the app icons, backing up any existing files.
#[derive(Parser, Debug)]
#[command(name = "icon-forge", version)]
struct Cli {
    /// Directory the icons are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Profile set JSON to use instead of the built-in color and outline profiles.
    #[arg(long)]
    profiles: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match load_profiles(cli.profiles.as_deref()) {
        Ok(set) => set,
        Err(err) => {
            eprintln!("icon-forge: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut sink = FsAssetSink::new(&cli.out_dir);
    let outcomes = IconGenerator::new(profiles.profiles).generate_all(&mut sink);

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(persisted) => {
                if let Some(record) = &persisted.backup {
                    println!("backup: {} -> {}", record.original.display(), record.backup.display());
                }
                println!("{}: {}", outcome.profile, persisted.destination.display());
            }
            Err(err) => {
                failed += 1;
                eprintln!("icon-forge: {}: {err}", outcome.profile);
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_profiles(path: Option<&Path>) -> IconResult<ProfileSet> {
    let Some(path) = path else {
        return Ok(ProfileSet::default());
    };
    let json = std::fs::read_to_string(path).map_err(|err| IconError::io(path, err))?;
    Ok(ProfileSet::from_json(&json)?)
}

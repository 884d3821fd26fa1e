use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::core::companion::UpdaterInstaller;
use crate::core::downloader::Downloader;
use crate::core::error::{InstallerError, InstallerResult};
use crate::core::http::build_http_client;
use crate::core::install::{
    FlagSelector, InstallEvent, InstallOrchestrator, InstallOutcome, InstallRequest,
    ProfilePolicy, ProgressSink, PromptSelector, VariantSelector,
};
use crate::core::launcher::LauncherVariant;
use crate::core::loaders::{Installer, LoaderKind};
use crate::core::settings::InstallerSettings;

/// Install a mod loader into a game launcher directory and register a launch profile for it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Launcher directory (the one holding launcher_profiles.json)
    #[arg(long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Game version, defaults to the latest stable release
    #[arg(long = "mcversion", value_name = "VERSION")]
    pub game_version: Option<String>,

    /// Loader version, defaults to the latest stable loader
    #[arg(long = "loader", value_name = "VERSION")]
    pub loader_version: Option<String>,

    #[arg(long = "loader-kind", value_enum, default_value_t = CliLoaderKind::Fabric)]
    pub loader_kind: CliLoaderKind,

    /// Only install the loader, don't touch the launcher profiles
    #[arg(long)]
    pub noprofile: bool,

    /// Launcher to register the profile with when several are installed
    #[arg(long, value_enum, ignore_case = true)]
    pub launcher: Option<CliLauncher>,

    /// Ask which launcher to use instead of failing when several are found
    #[arg(long)]
    pub interactive: bool,

    /// Settings file (JSON)
    #[arg(long, env = "MODLOADER_INSTALLER_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliLauncher {
    Win32,
    #[value(name = "microsoft_store", alias = "microsoft-store")]
    MicrosoftStore,
}

impl From<CliLauncher> for LauncherVariant {
    fn from(l: CliLauncher) -> Self {
        match l {
            CliLauncher::Win32 => LauncherVariant::Standard,
            CliLauncher::MicrosoftStore => LauncherVariant::MicrosoftStore,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliLoaderKind {
    Fabric,
    Quilt,
}

impl From<CliLoaderKind> for LoaderKind {
    fn from(k: CliLoaderKind) -> Self {
        match k {
            CliLoaderKind::Fabric => LoaderKind::Fabric,
            CliLoaderKind::Quilt => LoaderKind::Quilt,
        }
    }
}

/// Run an install from parsed arguments and map the outcome to an exit code.
pub async fn execute(cli: Cli) -> ExitCode {
    match install(cli).await {
        Ok(outcome) => report(&outcome),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn install(cli: Cli) -> InstallerResult<InstallOutcome> {
    let settings = InstallerSettings::load(cli.config.as_deref())?;

    // Fail fast, before any network lookups
    if !cli.dir.is_dir() {
        return Err(InstallerError::DirectoryNotFound(cli.dir));
    }

    let client = build_http_client()?;
    let loader_kind = LoaderKind::from(cli.loader_kind);
    let installer = Installer::new(loader_kind, client.clone(), &settings);

    let game_version = match cli.game_version {
        Some(version) => version,
        None => installer.meta().latest_game_version().await?,
    };
    let loader_version = match cli.loader_version {
        Some(version) => version,
        None => installer.meta().latest_loader_version().await?,
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let progress = ProgressSink::new(tx);
    let renderer = tokio::spawn(render_events(rx));

    let launcher = cli.launcher.map(LauncherVariant::from);
    let selector: Box<dyn VariantSelector> = if cli.interactive {
        Box::new(PromptSelector::stdin(launcher))
    } else {
        Box::new(FlagSelector::new(launcher))
    };

    let companion = UpdaterInstaller::new(
        Downloader::new(client, progress.clone()).with_concurrency(settings.download_concurrency),
        settings.companion.clone(),
    );

    let policy = ProfilePolicy {
        name_prefix: settings.profile_prefix_for(loader_kind),
        template: settings.profile_template(),
        install_companion: settings.companion.enabled,
    };

    let request = InstallRequest {
        base_dir: cli.dir,
        game_version,
        loader_version,
        create_profile: !cli.noprofile,
    };

    let outcome = InstallOrchestrator::new(&installer, &companion, selector.as_ref(), policy, progress)
        .run(&request)
        .await;

    // Every sender has to be gone before the renderer can finish
    drop(companion);
    let _ = renderer.await;

    Ok(outcome)
}

async fn render_events(mut rx: UnboundedReceiver<InstallEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            InstallEvent::Stage(stage) => println!("==> {}", stage),
            InstallEvent::Message(message) => println!("    {}", message),
            InstallEvent::Download {
                file_name, bytes, ..
            } => println!("    downloaded {} ({} bytes)", file_name, bytes),
            InstallEvent::Warning(warning) => eprintln!("warning: {}", warning),
        }
    }
}

fn report(outcome: &InstallOutcome) -> ExitCode {
    match outcome {
        InstallOutcome::Success(report) => {
            match &report.profile {
                Some(profile) => println!(
                    "Installed {} and registered profile '{}' in the {} launcher.",
                    report.loader_version_id,
                    profile.name,
                    profile.variant.cli_name()
                ),
                None => println!("Installed {}.", report.loader_version_id),
            }
            if !report.warnings.is_empty() {
                println!("Completed with {} warning(s).", report.warnings.len());
            }
            ExitCode::SUCCESS
        }
        InstallOutcome::Failed { stage, error, .. } => {
            eprintln!("error: {} failed: {}", stage, error);
            ExitCode::FAILURE
        }
    }
}

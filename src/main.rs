use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use skillsync::commands::list::OutputFormat;
use skillsync::commands::{install, list};
use skillsync::config::Config;
use skillsync::github::GitHubRepo;
use skillsync::install::fetcher::DEFAULT_FETCH_PROGRAM;
use skillsync::install::paths::default_install_root;
use skillsync::process::SystemLauncher;
use skillsync::runtime::RealRuntime;

const DEFAULT_REPO: &str = "DuffyCoder/awesome-sophnet-skills";
const DEFAULT_PATH: &str = "skills";
const DEFAULT_REF: &str = "main";

/// skillsync - Skill catalog synchronizer
///
/// Compare a remote skill catalog against the local installation and
/// install whatever is missing or stale.
///
/// If the GITHUB_TOKEN (or GH_TOKEN) environment variable is set, it will
/// be used for authentication. This is useful for private catalogs or for
/// avoiding rate limits.
#[derive(Parser, Debug)]
#[command(author, version = env!("SKILLSYNC_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog repository in the format "owner/repo"
    #[arg(
        long,
        value_name = "OWNER/REPO",
        default_value = DEFAULT_REPO,
        global = true
    )]
    repo: String,

    /// Repository path holding the skills
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PATH, global = true)]
    path: String,

    /// Git ref (branch, tag or commit) to read from
    #[arg(
        long = "ref",
        value_name = "REF",
        default_value = DEFAULT_REF,
        global = true
    )]
    reference: String,

    /// Install root directory (overrides default; also via SKILLSYNC_ROOT)
    #[arg(
        long = "root",
        short = 'r',
        env = "SKILLSYNC_ROOT",
        value_name = "PATH",
        global = true
    )]
    install_root: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List remote skills and their status against the local installation
    List(ListArgs),

    /// Install or update every pending skill
    Install(InstallArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(clap::Args, Debug)]
struct InstallArgs {
    /// Replace already-installed skill contents during the bulk fetch (default)
    #[arg(long, overrides_with = "no_replace")]
    replace: bool,

    /// Keep already-installed skill contents in place
    #[arg(long, overrides_with = "replace")]
    no_replace: bool,

    /// External program used for bulk content transfer
    #[arg(
        long = "fetch-command",
        value_name = "PROGRAM",
        default_value = DEFAULT_FETCH_PROGRAM
    )]
    fetch_command: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    // Resolve the credential once, up front; the core never reads the
    // environment itself.
    let token = std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .ok();
    let config = Config::new(token, cli.api_url)?;

    let repo: GitHubRepo = cli.repo.parse()?;
    let install_root = match cli.install_root {
        Some(path) => path,
        None => default_install_root(&runtime)?,
    };

    match cli.command {
        Commands::List(args) => {
            list::list(
                &runtime,
                &config,
                &repo,
                &cli.path,
                &cli.reference,
                install_root,
                args.format,
            )
            .await
        }
        Commands::Install(args) => {
            let launcher = SystemLauncher;
            let replace = args.replace || !args.no_replace;
            install::install(
                &runtime,
                &launcher,
                &config,
                &repo,
                &cli.path,
                &cli.reference,
                install_root,
                replace,
                args.fetch_command,
            )
            .await
        }
    }
}

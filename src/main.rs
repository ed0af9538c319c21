use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use git_bump::boundary::BoundaryWarning;
use git_bump::config::{self, Config};
use git_bump::git::{Git2Repository, Repository};
use git_bump::remote::{owner_and_repo, GitHubTagSource};
use git_bump::{ui, ReleaseOptions, Releaser, TagResolver, Version, VersionBump};

#[derive(Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Find the latest release tag and compute the next one"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Path inside the repository"
    )]
    path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the highest version tag in the repository
    Latest,

    /// Print the highest version tag pointing at HEAD
    Current,

    /// Compute the next version, optionally tagging and pushing it
    Next {
        #[arg(value_enum)]
        bump: BumpArg,

        #[arg(long, help = "Create the tag on HEAD")]
        tag: bool,

        #[arg(long, help = "Push the created tag (implies --tag)")]
        push: bool,

        #[arg(long, help = "Show the tag that would be created without creating it")]
        dry_run: bool,

        #[arg(short, long, help = "Skip confirmation prompts")]
        yes: bool,
    },

    /// Print the highest version tag on GitHub pointing at a commit
    RemoteLatest {
        #[arg(long, help = "Commit id; defaults to HEAD")]
        sha: Option<String>,

        #[arg(long, requires = "repo", help = "Repository owner; defaults to the remote url's")]
        owner: Option<String>,

        #[arg(long, requires = "owner", help = "Repository name; defaults to the remote url's")]
        repo: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BumpArg {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

impl From<BumpArg> for VersionBump {
    fn from(arg: BumpArg) -> Self {
        match arg {
            BumpArg::Major => VersionBump::Major,
            BumpArg::Minor => VersionBump::Minor,
            BumpArg::Patch => VersionBump::Patch,
            BumpArg::Prerelease => VersionBump::Prerelease,
            BumpArg::Build => VersionBump::Build,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = config::load_config(cli.config.as_deref()).context("Error loading config")?;
    let repo = Git2Repository::open(&cli.path).context("Not in a git repository")?;
    let resolver = TagResolver::with_pattern(config.tag.tag_pattern()?);
    let releaser = Releaser::new(repo, resolver);

    match cli.command {
        Command::Latest => match releaser.latest_tag()? {
            Some(tag) => {
                ui::display_value(&tag);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                ui::display_boundary_warning(&BoundaryWarning::NoReleaseTags {
                    initial: Version::initial().to_string(),
                });
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Current => match releaser.current_tag()? {
            Some(tag) => {
                ui::display_value(&tag);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                ui::display_boundary_warning(&BoundaryWarning::NoTagAtCommit {
                    commit: releaser.repository().head_sha()?,
                });
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Next {
            bump,
            tag,
            push,
            dry_run,
            yes,
        } => {
            let mode = NextMode {
                tag: tag || push,
                push,
                dry_run,
                yes,
            };
            next(&releaser, &config, bump.into(), mode)
        }
        Command::RemoteLatest { sha, owner, repo } => {
            remote_latest(&releaser, &config, sha, owner.zip(repo))
        }
    }
}

struct NextMode {
    tag: bool,
    push: bool,
    dry_run: bool,
    yes: bool,
}

fn next<R: Repository>(
    releaser: &Releaser<R>,
    config: &Config,
    bump: VersionBump,
    mode: NextMode,
) -> Result<ExitCode> {
    let previous = releaser.latest_tag()?;
    let next_tag = releaser.pattern().format(&releaser.next_version(bump)?);

    if !mode.tag {
        ui::display_value(&next_tag);
        return Ok(ExitCode::SUCCESS);
    }

    ui::display_proposed_tag(previous.as_deref(), &next_tag);
    if mode.dry_run {
        ui::display_status("Dry run, no tag created.");
        ui::display_value(&next_tag);
        return Ok(ExitCode::SUCCESS);
    }

    if !mode.yes && !ui::confirm_action(&format!("Create tag {}?", next_tag))? {
        ui::display_status("Tag creation cancelled by user.");
        return Ok(ExitCode::SUCCESS);
    }

    let remote = mode.push.then(|| config.remote.name.clone());
    let options = ReleaseOptions {
        tag: true,
        push: remote.clone(),
        message: config.tag.message.clone(),
    };

    let outcome = releaser
        .release(bump, &options)
        .with_context(|| format!("Failed to release '{}'", next_tag))?;

    ui::display_release_outcome(&outcome, remote.as_deref());
    ui::display_value(&outcome.tag);
    Ok(ExitCode::SUCCESS)
}

fn remote_latest<R: Repository>(
    releaser: &Releaser<R>,
    config: &Config,
    sha: Option<String>,
    owner_and_name: Option<(String, String)>,
) -> Result<ExitCode> {
    let repository = releaser.repository();

    let sha = match sha {
        Some(sha) => sha,
        None => repository.head_sha()?,
    };

    let (owner, name) = match owner_and_name {
        Some(pair) => pair,
        None => {
            let url = repository
                .remote_url(&config.remote.name)?
                .with_context(|| format!("No remote named '{}'", config.remote.name))?;
            owner_and_repo(&url)
                .with_context(|| format!("Cannot tell owner and repository from '{}'", url))?
        }
    };

    let token = config.github.token();
    if token.is_none() {
        ui::display_boundary_warning(&BoundaryWarning::MissingToken {
            env: config.github.token_env.clone(),
        });
    }

    let source = GitHubTagSource::new(&config.github.api_url, owner, name, token.as_deref())?;
    let resolver = TagResolver::with_pattern(releaser.pattern().clone());

    match resolver.latest_remote(&source, &sha)? {
        Some(tag) => {
            ui::display_value(&tag);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            ui::display_boundary_warning(&BoundaryWarning::NoTagAtCommit { commit: sha });
            Ok(ExitCode::FAILURE)
        }
    }
}

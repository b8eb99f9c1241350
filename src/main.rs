use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use git_autotag::config::{self, Config};
use git_autotag::git::Git2Repository;
use git_autotag::{ui, Autotag};

#[derive(clap::Parser)]
#[command(
    name = "autotag",
    version,
    about = "Compute the next semantic version from commit messages and tag it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path to the repository")]
    repo: String,

    #[arg(short, long, help = "Branch to tag (defaults to main, then master)")]
    branch: Option<String>,

    #[arg(
        short = 'n',
        long,
        help = "Just print the next version, don't create a tag"
    )]
    dry_run: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(short, long, help = "Commit message scheme: autotag or conventional")]
    scheme: Option<String>,

    #[arg(short, long, help = "Pre-release name, e.g. dev or rc.1")]
    pre_release_name: Option<String>,

    #[arg(
        short = 'T',
        long,
        help = "Append a pre-release timestamp: epoch or datetime"
    )]
    pre_release_timestamp: Option<String>,

    #[arg(short = 'm', long, help = "Build metadata appended after '+'")]
    build_metadata: Option<String>,

    #[arg(short, long, help = "Do not prepend 'v' to the written tag")]
    empty_version_prefix: bool,

    #[arg(long, help = "Only consider and write tags under <subdirectory>/")]
    subdirectory: Option<String>,
}

impl Args {
    /// Command-line values win over the configuration file
    fn apply(&self, config: &mut Config) {
        if let Some(branch) = &self.branch {
            config.branch = Some(branch.clone());
        }
        if let Some(scheme) = &self.scheme {
            config.scheme = scheme.clone();
        }
        if let Some(name) = &self.pre_release_name {
            config.pre_release_name = Some(name.clone());
        }
        if let Some(layout) = &self.pre_release_timestamp {
            config.pre_release_timestamp = Some(layout.clone());
        }
        if let Some(metadata) = &self.build_metadata {
            config.build_metadata = Some(metadata.clone());
        }
        if self.empty_version_prefix {
            config.prefix = false;
        }
        if let Some(subdirectory) = &self.subdirectory {
            config.subdirectory = Some(subdirectory.clone());
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    args.apply(&mut config);
    let settings = config.validate()?;

    let repo_path = std::fs::canonicalize(&args.repo)
        .with_context(|| format!("Error initializing: cannot resolve path '{}'", args.repo))?;
    let repo = Git2Repository::open(&repo_path)?;

    let autotag = Autotag::new(repo, settings).context("Error initializing")?;

    if args.dry_run {
        ui::display_status(&format!("Dry run: would create tag {}", autotag.tag_name()));
    } else {
        let tag = autotag
            .auto_tag()
            .context("Error auto updating version")?;
        ui::display_success(&format!("Created tag: {}", tag));
    }

    ui::display_version(&autotag.latest_version().to_string());
    Ok(())
}

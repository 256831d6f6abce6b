use anyhow::{Context as _, Result};
use imerge_core::{Config, Namespace, Session};
use imerge_git::Repository;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "IMERGE_LOG";

/// An opened repository and the session namespace configured for it.
pub struct RepoContext {
    pub repo: Repository,
    pub namespace: Namespace,
}

impl RepoContext {
    /// Session controller over this repository.
    pub fn session(&self) -> Session<'_, Repository> {
        Session::new(&self.repo, self.namespace.clone())
    }
}

/// Open the current repository, load its config and start logging.
pub fn open(verbose: bool) -> Result<RepoContext> {
    let repo = Repository::open_current().context("Not inside a git repository")?;

    let config_path = Config::path_in(repo.git_dir());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    init_logging(verbose, &config.general.log_level);

    let namespace = config.namespace()?;
    Ok(RepoContext { repo, namespace })
}

/// Install the stderr log subscriber.
///
/// `IMERGE_LOG` wins, then `--verbose`, then the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    // Ignore a second install; only the first subscriber is kept
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

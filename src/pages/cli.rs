//! Command-line surface shared by `relsite set-pages` and `set-github-pages`.

use clap::Args;

use super::{DEFAULT_API_URL, GitHubPagesClient, PagesError, PagesOutcome, PagesSource};

#[derive(Args, Debug, Clone)]
pub struct SetPagesArgs {
    /// Token allowed to administer the repository's Pages settings
    #[arg(value_name = "GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Repository owner (user or organization)
    #[arg(value_name = "OWNER")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(value_name = "REPO")]
    pub repo: Option<String>,

    /// Anything past the three positionals; any value here means usage
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Branch GitHub Pages should serve
    #[arg(long, default_value = "gh-pages")]
    pub branch: String,

    /// Folder within the branch
    #[arg(long, default_value = "/")]
    pub path: String,
}

impl SetPagesArgs {
    pub fn source(&self) -> PagesSource {
        PagesSource {
            branch: self.branch.clone(),
            path: self.path.clone(),
        }
    }
}

/// Result of a `set-pages` run that exits normally
#[derive(Debug)]
pub enum RunOutcome {
    /// Positional arguments missing, nothing was sent
    Usage,
    Configured(PagesOutcome),
    /// Both attempts failed; carries the rendered error of each
    Failed { primary: String, fallback: String },
}

impl RunOutcome {
    /// Console text for this outcome. `program` is the command the user typed.
    pub fn report(&self, program: &str, source: &PagesSource) -> String {
        match self {
            Self::Usage => format!(
                "Usage: {program} <GITHUB_TOKEN> <OWNER> <REPO>\n\
                 Points GitHub Pages at {source}. The token needs administration \
                 write access to the repository."
            ),
            Self::Configured(PagesOutcome::Primary) => {
                format!("Pages source set to {source}.")
            }
            Self::Configured(PagesOutcome::Fallback) => "Pages source set (fallback).".to_string(),
            Self::Failed { primary, fallback } => format!(
                "Failed to set GitHub Pages source via API:\n  primary: {primary}\n  fallback: {fallback}"
            ),
        }
    }
}

/// Run the configuration described by `args`.
///
/// Anything but exactly three positionals prints usage. Failure of both API
/// calls is an outcome, not an error: the operator can still switch the
/// source by hand. Errors are reserved for a bad API URL, owner or repository
/// names that cannot form a path, and an HTTP client that cannot be built.
pub async fn run(args: &SetPagesArgs) -> Result<RunOutcome, PagesError> {
    let (Some(token), Some(owner), Some(repo)) = (&args.token, &args.owner, &args.repo) else {
        return Ok(RunOutcome::Usage);
    };
    if !args.extra.is_empty() {
        return Ok(RunOutcome::Usage);
    }

    let client = GitHubPagesClient::new(&args.api_url, token.as_str())?;
    match client.configure(owner, repo, &args.source()).await {
        Ok(outcome) => Ok(RunOutcome::Configured(outcome)),
        Err(PagesError::BothFailed { primary, fallback }) => Ok(RunOutcome::Failed {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
        }),
        Err(e) => Err(e),
    }
}

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Context, IntoDiagnostic, Result};

use glint_core::{GithubConfig, GlintConfig, ReviewSubmissionResult};
use glint_review::github::GitHubClient;
use glint_review::llm::LlmClient;
use glint_review::pipeline::ReviewPipeline;
use glint_review::standards::load_standards;

#[derive(Parser)]
#[command(
    name = "glint",
    version,
    about = "AI pull request reviewer",
    long_about = "glint reviews a GitHub pull request with an LLM and posts the findings\n\
                   back as a single batched inline review.\n\n\
                   The pull request is identified by GITHUB_TOKEN, GITHUB_REPO, and\n\
                   PR_NUMBER (from the environment or a .env file), overridable per run\n\
                   with --github-token, --repo, and --pr.\n\n\
                   Examples:\n  \
                     glint review                       Review the PR from the environment\n  \
                     glint review --dry-run             Generate the review without posting\n  \
                     glint review --repo o/r --pr 42    Review a specific pull request\n  \
                     glint doctor                       Check setup and environment"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: .glint.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Review a pull request and post the findings as one batched review
    #[command(long_about = "Review a pull request and post the findings as one batched review.\n\n\
        Fetches the PR's changed files, sends their diffs and the configured\n\
        coding standards to the LLM, and posts the resulting inline comments\n\
        as a single non-blocking COMMENT review.\n\n\
        Examples:\n  glint review\n  glint review --dry-run\n  glint review --standards docs/standards.md")]
    Review {
        /// Repository slug (owner/name); defaults to $GITHUB_REPO
        #[arg(long)]
        repo: Option<String>,

        /// Pull request number; defaults to $PR_NUMBER
        #[arg(long)]
        pr: Option<String>,

        /// GitHub access token; defaults to $GITHUB_TOKEN
        #[arg(long)]
        github_token: Option<String>,

        /// Coding-standard documents fed to the reviewer (overrides config)
        #[arg(long)]
        standards: Vec<PathBuf>,

        /// Generate the review but do not post it
        #[arg(long)]
        dry_run: bool,
    },
    /// Check environment variables, configuration, and standards files
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => GlintConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = std::path::Path::new(".glint.toml");
            if default_path.exists() {
                GlintConfig::from_file(default_path).into_diagnostic()?
            } else {
                GlintConfig::default()
            }
        }
    };

    match cli.command {
        Command::Review {
            repo,
            pr,
            github_token,
            standards,
            dry_run,
        } => run_review(&config, repo, pr, github_token, standards, dry_run).await,
        Command::Doctor => run_doctor(&config),
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("glint=debug,glint_core=debug,glint_review=debug")
        } else {
            tracing_subscriber::EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn env_or(flag: Option<String>, var: &str) -> String {
    flag.or_else(|| std::env::var(var).ok()).unwrap_or_default()
}

async fn run_review(
    config: &GlintConfig,
    repo: Option<String>,
    pr: Option<String>,
    github_token: Option<String>,
    standards_override: Vec<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let github_config = GithubConfig::new(
        env_or(github_token, "GITHUB_TOKEN"),
        env_or(repo, "GITHUB_REPO"),
        env_or(pr, "PR_NUMBER"),
    )
    .into_diagnostic()
    .wrap_err("set GITHUB_TOKEN, GITHUB_REPO, and PR_NUMBER, or pass --github-token/--repo/--pr")?;

    let github = GitHubClient::new(github_config).into_diagnostic()?;

    let files = github.fetch_changed_files().await;
    if files.is_empty() {
        println!("No reviewable changes found.");
        return Ok(());
    }

    let standards_paths = if standards_override.is_empty() {
        config.review.standards_paths.clone()
    } else {
        standards_override
    };
    let standards = load_standards(&standards_paths);

    let mut llm_config = config.llm.clone();
    if llm_config.api_key.is_none() {
        llm_config.api_key = std::env::var("OPENAI_API_KEY").ok();
    }
    let llm = LlmClient::new(&llm_config).into_diagnostic()?;
    let pipeline = ReviewPipeline::new(llm, config.review.clone());

    let spinner = if std::io::stderr().is_terminal() {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})").unwrap(),
        );
        pb.set_message(format!("Reviewing {} changed files...", files.len()));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let result = pipeline
        .review(&files, &standards)
        .await
        .inspect_err(|_e| {
            if let Some(pb) = &spinner {
                pb.finish_with_message("Failed");
            }
        })
        .into_diagnostic()?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    println!("{result}");

    if dry_run {
        println!("Dry run: review not posted.");
        return Ok(());
    }

    match github.submit_review(&result.comments).await {
        ReviewSubmissionResult::Posted => {
            println!("Posted {} comments as one review.", result.comments.len());
        }
        ReviewSubmissionResult::NoComments => {
            println!("No comments to post.");
        }
        ReviewSubmissionResult::Failed(reason) => {
            println!("Review submission failed: {reason}");
        }
    }

    Ok(())
}

struct CheckResult {
    name: &'static str,
    status: &'static str,
    detail: String,
    hint: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "pass",
            detail: detail.into(),
            hint: None,
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name,
            status: "fail",
            detail: detail.into(),
            hint: Some(hint.into()),
        }
    }

    fn info(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            status: "info",
            detail: detail.into(),
            hint: None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.status {
            "pass" => "\u{2713}",
            "fail" => "\u{2717}",
            _ => "~",
        }
    }
}

fn run_doctor(config: &GlintConfig) -> Result<()> {
    let mut checks: Vec<CheckResult> = Vec::new();

    for var in ["GITHUB_TOKEN", "GITHUB_REPO", "PR_NUMBER"] {
        if std::env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false) {
            checks.push(CheckResult::pass(var, format!("{var} set")));
        } else {
            checks.push(CheckResult::fail(
                var,
                format!("{var} not set"),
                format!("export {var}=... or add it to .env"),
            ));
        }
    }

    let config_path = std::path::Path::new(".glint.toml");
    if config_path.exists() {
        checks.push(CheckResult::pass("config_file", ".glint.toml found"));
    } else {
        checks.push(CheckResult::info(
            "config_file",
            ".glint.toml not found (defaults in use)",
        ));
    }

    if config.llm.api_key.is_some() || std::env::var("OPENAI_API_KEY").is_ok() {
        checks.push(CheckResult::pass("llm_api_key", "OPENAI_API_KEY set"));
    } else {
        checks.push(CheckResult::fail(
            "llm_api_key",
            "OPENAI_API_KEY not set",
            "export OPENAI_API_KEY=... or set api_key in .glint.toml [llm]",
        ));
    }

    let found = config
        .review
        .standards_paths
        .iter()
        .filter(|p| p.exists())
        .count();
    let total = config.review.standards_paths.len();
    if found == total && total > 0 {
        checks.push(CheckResult::pass(
            "standards",
            format!("{found} of {total} standards files found"),
        ));
    } else {
        checks.push(CheckResult::info(
            "standards",
            format!("{found} of {total} standards files found (missing ones are skipped)"),
        ));
    }

    let version = env!("CARGO_PKG_VERSION");
    println!("glint v{version} — Environment Check\n");
    for check in &checks {
        print!("{} {}: {}", check.symbol(), check.name, check.detail);
        if let Some(hint) = &check.hint {
            print!("  ({hint})");
        }
        println!();
    }

    let failed = checks.iter().filter(|c| c.status == "fail").count();
    println!();
    if failed > 0 {
        println!("{failed} problems found.");
        std::process::exit(1);
    }
    println!("All checks passed.");
    Ok(())
}

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use aas_example::auth::{AuthState, BearerToken, EnvTokenProvider, StaticTokenProvider, TokenError, TokenProvider};
use aas_example::backend::{self, BackendError};
use aas_example::components::action_panel::{ActionPanel, Notifier, Outcome, PanelAction, PanelStatus};
use aas_example::components::nav::NavigationBar;
use aas_example::config::{BackendConfig, ClientConfig, ConfigError, DEFAULT_ACTION_DELAY_MS, DEFAULT_BASE_URL};
use aas_example::net::api::ApiError;
use aas_example::view::Component;
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid --token: {0}")]
    Token(#[from] TokenError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Api(#[from] ApiError),
    #[error("person service failed: {0}")]
    Backend(#[from] BackendError),
}

#[derive(Parser, Debug)]
#[command(name = "aas-example", about = "Auth-aware navigation and person actions against a protected service")]
struct Cli {
    #[arg(long, env = "AAS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Fixed bearer token. Takes precedence over --token-env.
    #[arg(long)]
    token: Option<String>,

    /// Environment variable read for the bearer token on every request.
    #[arg(long, default_value = "AAS_TOKEN")]
    token_env: String,

    /// Wait before each request is sent.
    #[arg(long, env = "AAS_ACTION_DELAY_MS", default_value_t = DEFAULT_ACTION_DELAY_MS)]
    delay_ms: u64,

    /// Per-request timeout; unset or 0 means none.
    #[arg(long, env = "AAS_REQUEST_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the navigation bar as HTML.
    Nav {
        /// Render the logged-in variant (`--authenticated=false` forces
        /// Login). Defaults to whether a token is configured.
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        authenticated: Option<bool>,
    },
    /// Print the action panel as HTML.
    Panel,
    /// POST /person
    Create,
    /// PUT /person
    Update,
    /// PATCH /person
    Patch,
    /// Run the demo person service.
    Serve,
}

/// Prints outcomes to stdout, one per line.
struct PrintNotifier;

impl Notifier for PrintNotifier {
    fn notify(&self, outcome: Outcome) {
        println!("{}", outcome.message());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Nav { authenticated } => {
            let is_authenticated = authenticated.unwrap_or_else(|| token_configured(cli));
            let nav = NavigationBar::new(Arc::new(AuthState { is_authenticated }));
            println!("{}", nav.render().to_html());
            Ok(ExitCode::SUCCESS)
        }
        Command::Panel => {
            let panel = ActionPanel::new(&client_config(cli), token_provider(cli)?, Arc::new(PrintNotifier))?;
            println!("{}", panel.render().to_html());
            Ok(ExitCode::SUCCESS)
        }
        Command::Create => run_action(cli, PanelAction::Create).await,
        Command::Update => run_action(cli, PanelAction::Update).await,
        Command::Patch => run_action(cli, PanelAction::NotPermitted).await,
        Command::Serve => {
            backend::serve(BackendConfig::from_env()?).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_action(cli: &Cli, action: PanelAction) -> Result<ExitCode, CliError> {
    let config = client_config(cli);
    let mut panel = ActionPanel::new(&config, token_provider(cli)?, Arc::new(PrintNotifier))?;

    tracing::info!(url = %config.person_url(), method = %action.method(), delay_ms = cli.delay_ms, "sending action");
    panel.trigger(action);
    panel.wait_idle().await;

    Ok(match panel.current_status() {
        PanelStatus::Succeeded => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn client_config(cli: &Cli) -> ClientConfig {
    ClientConfig::new(cli.base_url.as_str())
        .with_action_delay(Duration::from_millis(cli.delay_ms))
        .with_request_timeout(cli.timeout_secs.map(Duration::from_secs))
}

fn token_provider(cli: &Cli) -> Result<Arc<dyn TokenProvider>, CliError> {
    let provider: Arc<dyn TokenProvider> = match &cli.token {
        Some(raw) => Arc::new(StaticTokenProvider::new(BearerToken::new(raw.as_str())?)),
        None => Arc::new(EnvTokenProvider::new(cli.token_env.as_str())),
    };
    Ok(provider)
}

fn token_configured(cli: &Cli) -> bool {
    cli.token.is_some() || std::env::var(&cli.token_env).is_ok_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

use anyhow::{Context, Result, bail};
use atlas_search::{
    ApiClient, ApiError, AuthApi, Config, GlobalSearchFilters, SearchResultKind, SessionStore,
    api::auth::password_strength,
    format_grouped,
    interactive::InteractiveSearch,
    logging,
    schemas::{LoginCredentials, SignupCredentials},
    session::Preferences,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "Search repos, issues, notes, events, transactions and agents across your Atlas workspace",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (an empty query lists everything)
    query: Option<String>,

    /// Only return results of this kind (repeatable)
    #[arg(short = 'k', long = "kind")]
    kinds: Vec<SearchResultKind>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Maximum number of results to return
    #[arg(short = 'n', long)]
    max_results: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Open the dashboard shell with the search overlay
    #[arg(short = 'i', long)]
    interactive: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(clap::Args)]
struct GlobalArgs {
    /// Base URL of the Atlas API; empty runs offline
    #[arg(long, env = "ATLAS_API_URL", global = true)]
    api_url: Option<String>,

    /// Where the session and preferences are stored
    #[arg(long, env = "ATLAS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Delay between the last keystroke and the search, in milliseconds
    #[arg(long, default_value_t = atlas_search::config::DEFAULT_DEBOUNCE_MS, global = true)]
    debounce_ms: u64,

    /// Fail instead of searching the built-in dataset when the API errors
    #[arg(long, global = true)]
    no_fallback: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = atlas_search::config::DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and workspace
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Name of the workspace to create
        #[arg(long)]
        workspace: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user and workspace
    Whoami,
    /// Switch the active workspace, or list them when no id is given
    Workspace {
        /// Workspace id or slug
        id: Option<String>,
    },
    /// Send a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from a reset email
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
    },
    /// Send the account verification email again
    ResendVerification {
        #[arg(long)]
        email: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    JsonL,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// API errors carry a message meant for people; everything else prints its
/// context chain.
fn user_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) => api_error.user_message(),
        None => format!("{error:#}"),
    }
}

fn config_from(global: &GlobalArgs, max_results: Option<usize>) -> Config {
    let mut config = Config::default().with_api_url(global.api_url.clone());
    if let Some(dir) = &global.data_dir {
        config.data_dir = dir.clone();
    }
    config.debounce = Duration::from_millis(global.debounce_ms);
    config.timeout = Duration::from_secs(global.timeout_secs);
    config.fallback = !global.no_fallback;
    config.max_results = max_results;
    config.verbose = global.verbose;
    config
}

fn run(mut cli: Cli) -> Result<()> {
    let config = config_from(&cli.global, cli.max_results);

    if cli.interactive {
        logging::init_file_tracing(&config.data_dir, config.verbose);
    } else {
        logging::init_tracing(config.verbose);
    }
    debug!(api_url = ?config.api_url, data_dir = %config.data_dir.display(), "resolved config");

    let mut sessions = SessionStore::load(config.store());
    if let Some(session) = sessions.session()
        && session.is_expired()
    {
        info!("stored session has expired");
        sessions.set_session(None);
    }

    let result = run_command(&mut cli, &config, &mut sessions);
    if let Err(e) = &result
        && let Some(api_error) = e.downcast_ref::<ApiError>()
        && sessions.clear_if_unauthorized(api_error)
    {
        eprintln!("Your session has expired; run `atlas login` to sign in again.");
    }
    result
}

fn run_command(cli: &mut Cli, config: &Config, sessions: &mut SessionStore) -> Result<()> {
    match cli.command.take() {
        Some(Commands::Login { email, password }) => {
            let client = require_client(config, None)?;
            let credentials = LoginCredentials { email, password };
            let session = sessions.login(&AuthApi::new(&client), &credentials)?;
            println!("Signed in as {}", session.user.display_name());
            if let Some(workspace) = &session.workspace {
                println!("Workspace: {}", workspace.name);
            }
            Ok(())
        }
        Some(Commands::Signup {
            email,
            password,
            workspace,
            name,
        }) => {
            let client = require_client(config, None)?;
            let (strength, _) = password_strength(&password);
            let credentials = SignupCredentials {
                email,
                password,
                workspace,
                name,
            };
            let session = sessions.signup(&AuthApi::new(&client), &credentials)?;
            println!("Account created for {}", session.user.display_name());
            if !strength.is_empty() {
                println!("Password strength: {strength}");
            }
            Ok(())
        }
        Some(Commands::Logout) => {
            if !sessions.is_authenticated() {
                println!("Not signed in");
                return Ok(());
            }
            let client = config.api_client(sessions.access_token())?;
            sessions.logout(client.as_ref().map(AuthApi::new).as_ref());
            println!("Signed out");
            Ok(())
        }
        Some(Commands::Whoami) => {
            match sessions.session() {
                Some(session) => {
                    println!("{} <{}>", session.user.display_name(), session.user.email);
                    match &session.workspace {
                        Some(workspace) => {
                            println!("Workspace: {} ({})", workspace.name, workspace.id)
                        }
                        None => println!("Workspace: none"),
                    }
                }
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Some(Commands::Workspace { id }) => run_workspace(config, sessions, id),
        Some(Commands::ForgotPassword { email }) => {
            let client = require_client(config, None)?;
            let message = AuthApi::new(&client).forgot_password(&email)?;
            print_message(&message, "Check your inbox for a reset link");
            Ok(())
        }
        Some(Commands::ResetPassword { token, password }) => {
            let client = require_client(config, None)?;
            let message = AuthApi::new(&client).reset_password(&token, &password)?;
            print_message(&message, "Password updated; sign in with `atlas login`");
            Ok(())
        }
        Some(Commands::ResendVerification { email }) => {
            let client = require_client(config, None)?;
            let message = AuthApi::new(&client).resend_verification(&email)?;
            print_message(&message, "Verification email sent");
            Ok(())
        }
        None if cli.interactive => {
            let client = config.api_client(sessions.access_token())?;
            let service = config.search_service(client);
            let preferences = Preferences::load(config.store());
            let user_label = sessions.session().map(|session| match &session.workspace {
                Some(workspace) => format!("{} · {}", session.user.display_name(), workspace.name),
                None => session.user.display_name().to_string(),
            });
            let debounce_ms = u64::try_from(config.debounce.as_millis()).unwrap_or(u64::MAX);
            let mut interactive =
                InteractiveSearch::new(service, preferences, debounce_ms, user_label);
            interactive.run(cli.query.as_deref().unwrap_or_default())
        }
        None => run_search(config, sessions, cli),
    }
}

/// Prints the server's message, or `fallback` when it sent none.
fn print_message(message: &str, fallback: &str) {
    if message.is_empty() {
        println!("{fallback}");
    } else {
        println!("{message}");
    }
}

fn require_client(config: &Config, access_token: Option<String>) -> Result<ApiClient> {
    match config.api_client(access_token)? {
        Some(client) => Ok(client),
        None => Err(ApiError::NotConfigured.into()),
    }
}

fn run_workspace(config: &Config, sessions: &mut SessionStore, id: Option<String>) -> Result<()> {
    let Some(session) = sessions.session().cloned() else {
        bail!("Not signed in (run `atlas login` first)");
    };

    let Some(id) = id else {
        let active = session.workspace.as_ref().map(|w| w.id.as_str());
        for workspace in session.workspaces() {
            let marker = if Some(workspace.id.as_str()) == active { "*" } else { " " };
            println!("{marker} {} ({})", workspace.name, workspace.id);
        }
        return Ok(());
    };

    let workspace = match session.find_workspace(&id) {
        Some(workspace) => workspace.clone(),
        None => {
            let client = require_client(config, sessions.access_token())?;
            AuthApi::new(&client)
                .workspaces()?
                .into_iter()
                .find(|w| w.id == id || w.slug.as_deref() == Some(id.as_str()))
                .with_context(|| format!("No workspace matches '{id}'"))?
        }
    };

    sessions.select_workspace(workspace.clone());
    println!("Switched to {}", workspace.name);
    Ok(())
}

fn run_search(config: &Config, sessions: &SessionStore, cli: &Cli) -> Result<()> {
    let client = config.api_client(sessions.access_token())?;
    let service = config.search_service(client);
    let query = cli.query.as_deref().unwrap_or_default();
    let filters = GlobalSearchFilters::new(cli.kinds.clone());

    if config.verbose {
        eprintln!("Query: {query:?}");
        eprintln!("Kinds: {:?}", filters.cache_key());
    }

    let response = service.search(query, &filters)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match cli.format {
        OutputFormat::Text => {
            if response.results.is_empty() {
                writeln!(handle, "No results found.")?;
            } else {
                writeln!(handle, "Found {} results:\n", response.results.len())?;
                write!(handle, "{}", format_grouped(&response, !cli.no_color))?;
                if response.total > response.results.len() {
                    eprintln!(
                        "(Showing {} of {} total results)",
                        response.results.len(),
                        response.total
                    );
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &response)?;
            writeln!(handle)?;
        }
        OutputFormat::JsonL => {
            for result in &response.results {
                serde_json::to_writer(&mut handle, result)?;
                writeln!(handle)?;
            }
            let metadata = serde_json::json!({
                "_metadata": {
                    "total": response.total,
                    "returned_count": response.results.len()
                }
            });
            serde_json::to_writer(&mut handle, &metadata)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

//! `school-graphql`: command-line front end for the Tomorrow School GraphQL API.
//!
//! Credentials come from `TOMORROW_SCHOOL_JWT`, the `GRAPHQL_TOKEN` entry of
//! the token file, or `TOMORROW_SCHOOL_USERNAME` / `TOMORROW_SCHOOL_PASSWORD`.
//! Log output goes to stderr and honours `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use school_graphql::auth::credentials::{self, Credential, DEFAULT_TOKEN_FILE};
use school_graphql::introspection::{self, COMMON_TYPES};
use school_graphql::{
    output, ClientConfig, ConfigError, EndpointUrl, GraphqlClient, GraphqlRequest, Token,
    Variables,
};
use tracing_subscriber::EnvFilter;

/// Query the Tomorrow School GraphQL API.
#[derive(Parser, Debug)]
#[command(name = "school-graphql", version, about)]
struct Cli {
    /// Sign-in endpoint (overrides TOMORROW_SCHOOL_AUTH_URL).
    #[arg(long, global = true, value_name = "URL", value_parser = parse_endpoint)]
    auth_url: Option<EndpointUrl>,

    /// GraphQL endpoint (overrides TOMORROW_SCHOOL_API_URL).
    #[arg(long, global = true, value_name = "URL", value_parser = parse_endpoint)]
    api_url: Option<EndpointUrl>,

    /// Token file holding GRAPHQL_TOKEN=<token>.
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable debug logging for this tool, on top of any RUST_LOG filter.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and show who the token belongs to.
    Token {
        /// Store the token in the token file.
        #[arg(long)]
        save: bool,
    },
    /// Run a GraphQL document and print its data.
    Query(QueryArgs),
    /// List schema types, or describe the fields of named types.
    Introspect {
        /// Type to describe; repeat for several.
        #[arg(long = "type", value_name = "NAME")]
        types: Vec<String>,

        /// Describe the audit, group, user, result, progress and object types.
        #[arg(long, conflicts_with = "types")]
        common: bool,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// GraphQL document text.
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    query: Option<String>,

    /// Read the GraphQL document from a file.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Variables as a JSON object.
    #[arg(long, value_name = "JSON")]
    vars: Option<String>,

    /// Also save the data as a timestamped JSON file in this directory.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// File name prefix used with --out-dir.
    #[arg(long, default_value = "query")]
    prefix: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_endpoint(url: &str) -> Result<EndpointUrl, ConfigError> {
    EndpointUrl::new(url)
}

fn init_tracing(verbose: bool) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(from_env.as_deref(), verbose)))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the filter directives; `--verbose` is appended last so it wins
/// over any level RUST_LOG sets for this crate.
fn log_filter(from_env: Option<&str>, verbose: bool) -> String {
    let base = from_env
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .unwrap_or("school_graphql=info");
    if verbose {
        format!("{base},school_graphql=debug")
    } else {
        base.to_string()
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Pull TOMORROW_SCHOOL_* variables from the token file without overriding the environment.
    if dotenv::from_path(&cli.token_file).is_ok() {
        tracing::debug!(path = %cli.token_file.display(), "Loaded environment from token file");
    }

    let config = build_config(&cli)?;

    match cli.command {
        Command::Token { save } => token(config, &cli.token_file, save).await,
        Command::Query(args) => query(config, &cli.token_file, args).await,
        Command::Introspect { types, common } => {
            let types = if common {
                COMMON_TYPES.iter().map(ToString::to_string).collect()
            } else {
                types
            };
            introspect(config, &cli.token_file, &types).await
        }
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let from_env = ClientConfig::from_env().context("Invalid endpoint configuration")?;

    let mut builder = ClientConfig::builder()
        .auth_url(cli.auth_url.clone().unwrap_or_else(|| from_env.auth_url().clone()))
        .api_url(cli.api_url.clone().unwrap_or_else(|| from_env.api_url().clone()))
        .user_agent_prefix(format!("school-graphql-cli/{}", env!("CARGO_PKG_VERSION")));
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build())
}

async fn connect(config: ClientConfig, token_file: &Path) -> Result<GraphqlClient> {
    let credential = credentials::resolve(Some(token_file))?;
    if matches!(credential, Credential::Basic { .. }) {
        tracing::info!(url = %config.auth_url(), "Signing in");
    }
    GraphqlClient::from_credential(config, credential)
        .await
        .context("Authentication failed")
}

async fn token(config: ClientConfig, token_file: &Path, save: bool) -> Result<()> {
    let client = connect(config, token_file).await?;
    let Some(token) = client.token() else {
        bail!("Client holds no token after authentication");
    };

    describe_token(token);

    if save {
        credentials::write_token_file(token_file, token)?;
        println!("Token saved to {}", token_file.display());
    }
    Ok(())
}

fn describe_token(token: &Token) {
    println!("Token: {}", token.preview());
    match token.claims() {
        Ok(claims) => {
            if let Some(user_id) = claims.user_id() {
                println!("User ID: {user_id}");
            }
            match claims.expires_at() {
                Some(expires) if claims.is_expired() => println!("Expired: {expires}"),
                Some(expires) => println!("Expires: {expires}"),
                None => println!("Expires: never"),
            }
        }
        Err(e) => tracing::warn!(error = %e, "Token claims are not readable"),
    }
}

async fn query(config: ClientConfig, token_file: &Path, args: QueryArgs) -> Result<()> {
    let document = match (&args.query, &args.file) {
        (Some(query), _) => query.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Could not read query file '{}'", path.display()))?,
        (None, None) => bail!("Provide a query or --file"),
    };

    let mut request = GraphqlRequest::new(document);
    if let Some(vars) = &args.vars {
        request = request.variables(parse_variables(vars)?);
    }

    let client = connect(config, token_file).await?;
    let data = serde_json::Value::Object(client.execute(&request).await?);

    println!("{}", serde_json::to_string_pretty(&data)?);

    if let Some(dir) = &args.out_dir {
        let path = output::save_json(dir, &args.prefix, &data)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn parse_variables(text: &str) -> Result<Variables> {
    match serde_json::from_str::<serde_json::Value>(text).context("--vars is not valid JSON")? {
        serde_json::Value::Object(variables) => Ok(variables),
        _ => bail!("--vars must be a JSON object"),
    }
}

async fn introspect(config: ClientConfig, token_file: &Path, types: &[String]) -> Result<()> {
    let client = connect(config, token_file).await?;

    if types.is_empty() {
        for ty in introspection::list_types(&client).await? {
            println!("{:<40} {}", ty.name, ty.kind);
        }
        return Ok(());
    }

    for name in types {
        match introspection::describe_type(&client, name).await? {
            Some(ty) => {
                println!("{} ({})", ty.name, ty.kind);
                for field in &ty.fields {
                    println!("  {:<32} {}", field.name, field.ty.display_name());
                }
            }
            None => tracing::warn!(name = %name, "Type not found in schema"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_applies_on_top_of_env_filter() {
        assert_eq!(log_filter(None, false), "school_graphql=info");
        assert_eq!(log_filter(Some("  "), true), "school_graphql=info,school_graphql=debug");
        assert_eq!(log_filter(Some("warn"), false), "warn");
        assert_eq!(
            log_filter(Some("warn,reqwest=info"), true),
            "warn,reqwest=info,school_graphql=debug"
        );
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_requires_text_or_file() {
        assert!(Cli::try_parse_from(["school-graphql", "query"]).is_err());
        assert!(Cli::try_parse_from(["school-graphql", "query", "{ user { id } }"]).is_ok());
        assert!(Cli::try_parse_from(["school-graphql", "query", "--file", "q.graphql"]).is_ok());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["school-graphql", "--api-url", "ftp://x", "token"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_variables_requires_object() {
        assert_eq!(parse_variables(r#"{"limit": 5}"#).unwrap()["limit"], 5);
        assert!(parse_variables("[1, 2]").is_err());
        assert!(parse_variables("{not json").is_err());
    }
}

use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for linkup-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub allow_signup: Option<bool>,
    pub jwt_secret: Option<String>,
    pub jwt_expiration_hours: Option<u64>,
    pub config_file: Option<PathBuf>,
    pub max_request_size: Option<usize>,
    pub cors_origins: Option<Vec<String>>,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self::from_matches(&matches)
    }

    fn command() -> Command {
        Command::new("linkup-server")
            .version(linkup::VERSION)
            .author("Linkup Contributors")
            .about("HTTP API server for the Linkup professional network")
            .long_about(
                r#"Linkup Server exposes profiles, connection requests, posts, job
listings and direct messages as a JSON API under /api.

The server can be configured through command line arguments or environment
variables. Command line arguments take precedence over environment variables.

Examples:
  linkup-server --port 8080
  linkup-server --config linkup.toml --allow-signup=false
  linkup-server --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: LINKUP_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Library configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON file with storage, logging and
relationship settings. LINKUP_* variables are applied on top of it.
Environment variable: LINKUP_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("allow_signup")
                    .long("allow-signup")
                    .value_name("BOOL")
                    .help("Allow user registration")
                    .long_help(
                        "Allow new users to register accounts via the signup API.
Environment variable: LINKUP_ALLOW_SIGNUP",
                    )
                    .value_parser(clap::value_parser!(bool)),
            )
            .arg(
                Arg::new("jwt_secret")
                    .long("jwt-secret")
                    .value_name("SECRET")
                    .help("JWT signing secret")
                    .long_help(
                        "Secret key used for signing JWT tokens. If not provided, one
will be generated on startup and tokens will not survive a restart.
Environment variable: LINKUP_JWT_SECRET",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("jwt_expiration")
                    .long("jwt-expiration")
                    .value_name("HOURS")
                    .help("JWT token expiration time in hours")
                    .long_help(
                        "How long JWT tokens remain valid before expiring.
Default is 720 hours (30 days).
Environment variable: LINKUP_JWT_EXPIRATION_HOURS",
                    )
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies.
Environment variable: LINKUP_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("cors_origin")
                    .long("cors-origin")
                    .value_name("ORIGIN")
                    .help("Allowed CORS origin (repeatable)")
                    .long_help(
                        "Browser origin allowed to call the API. Repeat the flag for
several origins. Without any, every origin is allowed.
Environment variable: LINKUP_CORS_ORIGINS (comma separated)",
                    )
                    .action(ArgAction::Append),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: RUST_LOG",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .action(ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            port: matches.get_one::<u16>("port").copied(),
            allow_signup: matches.get_one::<bool>("allow_signup").copied(),
            jwt_secret: matches.get_one::<String>("jwt_secret").cloned(),
            jwt_expiration_hours: matches.get_one::<u64>("jwt_expiration").copied(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
            cors_origins: matches
                .get_many::<String>("cors_origin")
                .map(|origins| origins.cloned().collect()),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("Linkup Server Environment Variables");
        println!("===================================");
        println!();
        println!("Server Configuration:");
        println!("  LINKUP_PORT                   - Server port (default: 5000)");
        println!("  LINKUP_MAX_REQUEST_SIZE       - Max request body size in bytes (default: 2MB)");
        println!("  LINKUP_CONFIG_FILE            - Library configuration file");
        println!("  LINKUP_CORS_ORIGINS           - Comma separated allowed origins (default: any)");
        println!();
        println!("Authentication:");
        println!("  LINKUP_JWT_SECRET             - JWT signing secret (auto-generated if not set)");
        println!("  LINKUP_JWT_EXPIRATION_HOURS   - JWT expiration in hours (default: 720)");
        println!("  LINKUP_ALLOW_SIGNUP           - Allow user registration (default: true)");
        println!();
        println!("Library Configuration (nested keys use a double underscore):");
        println!("  LINKUP_STORAGE__BACKEND                    - surrealdb or memory");
        println!("  LINKUP_RELATIONSHIPS__ACCEPT_MODE          - sequential or transactional");
        println!("  LINKUP_RELATIONSHIPS__REPAIR_ON_READ       - true or false");
        println!("  LINKUP_RELATIONSHIPS__SUGGESTION_LIMIT     - suggestions per request");
        println!();
        println!("SurrealDB Configuration:");
        println!("  SURREALDB_URL                 - Remote SurrealDB endpoint URL");
        println!("  SURREALDB_NAMESPACE           - SurrealDB namespace (default: linkup)");
        println!("  SURREALDB_DATABASE            - SurrealDB database (default: network)");
        println!("  SURREALDB_USERNAME            - SurrealDB username");
        println!("  SURREALDB_PASSWORD            - SurrealDB password");
        println!();
        println!("Logging:");
        println!("  RUST_LOG                      - Logging level (error, warn, info, debug, trace)");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
    }
}

use clap::Parser;

use super::parsers::{
    parse_bool_env, parse_header_json, parse_methods_json, parse_positive_u64,
    parse_positive_usize,
};
use super::types::{HeaderSet, MethodSet, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Ping every endpoint of an OpenAPI/Swagger description concurrently and report per-path latency."
)]
pub struct PingArgs {
    /// The path or URL of the Swagger 2.0 / OpenAPI 3.x input source
    #[arg(long, short)]
    pub input: Option<String>,

    /// The base URL to query (prompts for a server from the description when omitted)
    #[arg(long, short)]
    pub base: Option<String>,

    /// The output format
    #[arg(long = "out", short = 'o', default_value = "console", ignore_case = true)]
    pub output: OutputFormat,

    /// Directory to write csv/html/md/json reports to
    #[arg(long = "out-dir", default_value = ".")]
    pub out_dir: String,

    /// Custom headers as a JSON object, e.g. '{"Authorization": "Bearer TOKEN"}'
    #[arg(long = "header", default_value = "{}", value_parser = parse_header_json)]
    pub headers: HeaderSet,

    /// The amount of parallel workers to use
    #[arg(long = "worker", short = 'w', default_value = "1", value_parser = parse_positive_usize)]
    pub workers: PositiveUsize,

    /// The timeout in seconds per request
    #[arg(long = "timeout", short = 't', default_value = "5", value_parser = parse_positive_u64)]
    pub timeout_secs: PositiveU64,

    /// How often to loop through all calls
    #[arg(long = "loop", short = 'l', default_value = "1", value_parser = parse_positive_usize)]
    pub rounds: PositiveUsize,

    /// Include the response body in the output
    #[arg(long = "response", short = 'r')]
    pub capture_response: bool,

    /// A JSON array of methods to include, e.g. '["GET", "POST"]'
    #[arg(
        long = "methods",
        short = 'm',
        default_value = r#"["GET","POST"]"#,
        value_parser = parse_methods_json
    )]
    pub methods: MethodSet,

    /// A regular expression over path templates; only matching paths are pinged
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Only sample URLs/responses of calls slower than this many milliseconds
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Enable verbose logging (sets log level to debug unless overridden by APIPING_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Disable the per-round progress line
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Path to config file (TOML/JSON). Defaults to ./apiping.toml or ./apiping.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

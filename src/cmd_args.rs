//! Command-line argument handling.

pub use clap::Parser;

/// Command-line arguments.
///
/// A request comes from exactly one of two places: a raw HTTP/1.x text
/// block (`--file`) or the form-style flags.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct CommandLineArgs {
    /// Read a raw HTTP request from this file, `-` for stdin
    #[clap(short = 'f', long, conflicts_with_all = ["url", "host"])]
    pub file: Option<String>,

    /// Target URL, absolute or relative
    #[clap(short = 'u', long)]
    pub url: Option<String>,

    /// Host used to resolve a relative target
    #[clap(long)]
    pub host: Option<String>,

    /// Request method
    #[clap(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// User-Agent header value
    #[clap(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Accept header value
    #[clap(long)]
    pub accept: Option<String>,

    /// Accept-Encoding header value
    #[clap(long)]
    pub accept_encoding: Option<String>,

    /// Accept-Language header value
    #[clap(long)]
    pub accept_language: Option<String>,

    /// Profile name
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    pub profile: String,

    /// Print request timing alongside the response
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

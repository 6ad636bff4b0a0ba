//! # ReqForge Main Entry Point
//!
//! Thin presentation layer: read the request from the command line, drive
//! the composer, print the response.

use std::io::Read;

use anyhow::{bail, Context, Result};
use reqforge::cmd_args::{CommandLineArgs, Parser};
use reqforge::{config, HttpService, RequestComposer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CommandLineArgs::parse();
    let profile = config::load_profile(&args.profile)?;
    let service = HttpService::new(&profile)?;
    let mut composer = RequestComposer::new(service);

    let ready = match &args.file {
        Some(file) => {
            let raw = read_raw_request(file)?;
            composer.parse_raw_request(&raw)
        }
        None => {
            let url = args.url.as_deref().unwrap_or("");
            let host = args.host.as_deref().unwrap_or("");
            composer.validate_form(url, host, &args.method) && {
                composer.initialize_from_form(
                    url,
                    host,
                    &args.method,
                    args.user_agent.as_deref().unwrap_or(""),
                    args.accept.as_deref().unwrap_or(""),
                    args.accept_encoding.as_deref().unwrap_or(""),
                    args.accept_language.as_deref().unwrap_or(""),
                );
                composer.error_message().is_empty()
            }
        }
    };
    if !ready {
        bail!("invalid request: {}", composer.error_message());
    }

    if !composer.send().await {
        bail!("request failed: {}", composer.error_message());
    }

    let response = composer
        .response()
        .context("request completed without a response")?;

    println!(
        "Status Code: {} - {}",
        response.status_code(),
        response.status_text()
    );
    println!("Method: {}", response.method());
    println!("Response Url: {}", response.url());
    if let Some(server) = response.server() {
        println!("Server: {server}");
    }
    if let Some(charset) = response.charset() {
        println!("Character Set: {charset}");
    }
    if args.verbose {
        println!("Duration: {}ms", response.duration_ms());
    }

    println!();
    for (name, value) in response.headers() {
        println!("{name}: {value}");
    }

    println!();
    println!("{}", response.body());

    Ok(())
}

fn read_raw_request(file: &str) -> Result<String> {
    if file == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read request from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read request file {file}"))
    }
}

//! `labs-portal` - command-line client for the AI Labs portal API.
//!
//! # Usage
//!
//! ```text
//! labs-portal [-f <config>] [-v…] <command> [args]
//!
//! Commands:
//!   vacancies                 list open vacancies
//!   projects [id-or-slug]     list projects, or show one
//!   events [id-or-slug]       list events, or show one
//!   contact <json|->          submit the contact form
//!   partnership <json|->      submit an academy partnership request
//!   apply <json|->            submit a job application
//!   add-project <json|->      create a project
//!   add-event <json|->        create an event
//!   image-url [path]          resolve an image path against the base URL
//! ```
//!
//! `-` reads the JSON payload from stdin. Ctrl-C cancels the in-flight call.

use std::io::Read;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::info;

use labs_portal::client::{ApiResult, HttpClient};
use labs_portal::portal::{CareerApplication, ContactForm, Notice, PartnershipForm, PortalApi};
use labs_portal::{config, error::AppError, logger};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    let command = parse_command(args.command.as_deref(), &args.rest)?;

    info!(
        base_url = %config.client.base_url,
        api_prefix = %config.client.api_prefix,
        timeout_ms = config.client.timeout.as_millis() as u64,
        "config loaded"
    );

    // Ctrl-C cancels the token, which aborts whatever call is in flight.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, cancelling request");
            ctrlc_token.cancel();
        }
    });

    let http = HttpClient::with_cancellation(config.client, shutdown)?;
    execute(&PortalApi::new(http), command).await
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Command {
    Vacancies,
    Projects(Option<String>),
    Events(Option<String>),
    Contact(ContactForm),
    Partnership(PartnershipForm),
    Apply(CareerApplication),
    AddProject(Value),
    AddEvent(Value),
    ImageUrl(Option<String>),
}

async fn execute(api: &PortalApi, command: Command) -> Result<(), AppError> {
    match command {
        Command::Vacancies => print_json(api.fetch_vacancies().await),
        Command::Projects(None) => print_json(api.fetch_projects().await),
        Command::Projects(Some(id)) => print_json(api.fetch_project(&id).await),
        Command::Events(None) => print_json(api.fetch_events().await),
        Command::Events(Some(id)) => print_json(api.fetch_event(&id).await),
        Command::Contact(form) => report(api.submit_contact(&form).await),
        Command::Partnership(form) => report(api.submit_partnership(&form).await),
        Command::Apply(form) => report(api.submit_career_application(&form).await),
        Command::AddProject(v) => report(api.add_project(&v).await),
        Command::AddEvent(v) => report(api.add_event(&v).await),
        Command::ImageUrl(path) => {
            println!("{}", api.image_url(path.as_deref()));
            Ok(())
        }
    }
}

fn print_json(result: ApiResult) -> Result<(), AppError> {
    let data = result?;
    let text = serde_json::to_string_pretty(&data).map_err(std::io::Error::from)?;
    println!("{text}");
    Ok(())
}

/// Print the success notice; errors propagate to `main`, which prints them.
fn report(result: ApiResult) -> Result<(), AppError> {
    let data = result?;
    println!("{}", Notice::from_submission(&Ok(data)));
    Ok(())
}

fn parse_command(name: Option<&str>, rest: &[String]) -> Result<Command, AppError> {
    let Some(name) = name else {
        return Err(AppError::Usage("no command given (try --help)".into()));
    };
    let first = rest.first().cloned();

    let command = match name {
        "vacancies" => Command::Vacancies,
        "projects" => Command::Projects(first),
        "events" => Command::Events(first),
        "contact" => Command::Contact(payload(name, first)?),
        "partnership" => Command::Partnership(payload(name, first)?),
        "apply" => Command::Apply(payload(name, first)?),
        "add-project" => Command::AddProject(payload(name, first)?),
        "add-event" => Command::AddEvent(payload(name, first)?),
        "image-url" => Command::ImageUrl(first),
        other => return Err(AppError::Usage(format!("unknown command: {other}"))),
    };
    Ok(command)
}

/// Deserialize a command's JSON argument; `-` reads it from stdin.
fn payload<T: DeserializeOwned>(command: &str, arg: Option<String>) -> Result<T, AppError> {
    let raw = match arg.as_deref() {
        None => return Err(AppError::Usage(format!("{command} requires a JSON payload"))),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(s) => s.to_string(),
    };
    serde_json::from_str(&raw)
        .map_err(|e| AppError::Usage(format!("invalid {command} payload: {e}")))
}

// ── CLI arg parsing ───────────────────────────────────────────────────────────

struct CliArgs {
    config_path: Option<String>,
    log_level: Option<&'static str>,
    command: Option<String>,
    rest: Vec<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;
    let mut command = None;
    let mut rest = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if command.is_some() {
            rest.push(arg);
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => command = Some(arg.clone()),
        }
    }

    CliArgs {
        config_path,
        log_level: logger::level_for_verbosity(verbosity),
        command,
        rest,
    }
}

fn print_help() {
    println!("Usage: labs-portal [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("Commands:");
    println!("  vacancies                 List open vacancies");
    println!("  projects [id-or-slug]     List projects, or show one");
    println!("  events [id-or-slug]       List events, or show one");
    println!("  contact <json|->          Submit the contact form");
    println!("  partnership <json|->      Submit an academy partnership request");
    println!("  apply <json|->            Submit a job application");
    println!("  add-project <json|->      Create a project");
    println!("  add-event <json|->        Create an event");
    println!("  image-url [path]          Resolve an image path against the base URL");
    println!();
    println!("Options:");
    println!("  -h, --help                Print help");
    println!("  -f, --config <PATH>       Configuration file (default: config/default.toml)");
    println!("  -v, -vv, -vvv             Increase logging verbosity");
}

//! dupedesk - exports duplicate helpdesk users to a spreadsheet

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use base64::Engine;
use clap::Parser;
use dupedesk_client::{fetch_all_users, RestClient, RetryPolicy};
use dupedesk_xlsx::XlsxDocument;

mod dedupe;
mod report;

#[derive(Parser)]
#[command(name = "dupedesk")]
#[command(
    author,
    version,
    about = "Fetches all users from a helpdesk instance and exports duplicate names to a spreadsheet"
)]
struct Cli {
    /// Base URL of the helpdesk instance (e.g. https://company.zendesk.com)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Email address of the account used for API access
    #[arg(short, long)]
    email: Option<String>,

    /// API token paired with the email address
    #[arg(short = 't', long)]
    api_token: Option<String>,

    /// Output spreadsheet file
    #[arg(short, long, default_value = "duplicates.xlsx")]
    output: PathBuf,

    /// Name of the worksheet the report is written to
    #[arg(short, long, default_value = "Duplicates")]
    sheet_name: String,

    /// Give up after this many failed attempts per request (default: retry forever)
    #[arg(long)]
    max_attempts: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_url = prompt_if_missing(cli.base_url, "Helpdesk base URL")?;
    let email = prompt_if_missing(cli.email, "Email address")?;
    let api_token = prompt_if_missing(cli.api_token, "API token")?;

    let started = Instant::now();

    let credentials =
        base64::engine::general_purpose::STANDARD.encode(format!("{}/token:{}", email, api_token));
    let policy = match cli.max_attempts {
        Some(attempts) => RetryPolicy::with_max_attempts(attempts),
        None => RetryPolicy::unbounded(),
    };
    let client = RestClient::with_policy(base_url, credentials, policy)
        .context("Failed to build the API client")?;

    println!("Fetching users from {} ...", client.base_url());
    let users = fetch_all_users(&client).context("Failed to fetch users")?;

    let groups = dedupe::duplicates_by_name(&users);
    if groups.is_empty() {
        println!("Fetched {} user records, no duplicate names found", users.len());
        return Ok(());
    }

    report::print_duplicates(&users, &groups);

    let mut doc = XlsxDocument::create(&cli.output, &cli.sheet_name)
        .with_context(|| format!("Failed to create '{}'", cli.output.display()))?;
    report::write_duplicates(&mut doc, &cli.sheet_name, &groups)
        .with_context(|| format!("Failed to write '{}'", cli.output.display()))?;

    println!();
    println!(
        "Wrote {} duplicate users ({} names) to '{}'",
        dedupe::member_count(&groups),
        groups.len(),
        cli.output.display()
    );
    println!("Elapsed: {}", format_elapsed(started));

    Ok(())
}

/// Use the flag value when given, otherwise ask on stdin.
fn prompt_if_missing(value: Option<String>, label: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    print!("{}: ", label);
    io::stdout().flush().context("Failed to write to stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", label))?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{} must not be empty", label);
    }
    Ok(trimmed.to_string())
}

fn format_elapsed(started: Instant) -> String {
    let elapsed = started.elapsed();
    let millis = elapsed.as_millis();
    let hours = millis / 3_600_000;
    let minutes = millis % 3_600_000 / 60_000;
    let seconds = millis % 60_000 / 1_000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        hours,
        minutes,
        seconds,
        millis % 1_000
    )
}

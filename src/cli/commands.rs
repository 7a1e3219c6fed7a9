use crate::asset::normalize::normalize_search_results;
use crate::asset::report::{write_csv_report, write_details_file};
use crate::cli::args::{instance_rql, Cli, Commands};
use crate::prisma::auth::{Credentials, PrismaAuth, Session};
use crate::prisma::client::PrismaClient;
use crate::utils::errors::{PrismaCliError, Result};
use std::io;
use std::path::Path;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "prisma_rs=warn",  // Default: warnings only
            1 => "prisma_rs=info",  // -v: info level
            2 => "prisma_rs=debug", // -vv: debug level
            _ => "prisma_rs=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    // Placeholder credentials fail here, before any network call
    let credentials = Credentials::from_env();
    credentials.validate()?;

    let auth = PrismaAuth::new(cli.api_url.clone());
    let session = auth.login(&credentials).await?;

    let client = PrismaClient::new(cli.api_url.clone());

    match cli.command {
        Commands::Search {
            instance_id,
            query,
            limit,
            output,
        } => handle_search(&client, &session, instance_id, query, limit, &output).await,
        Commands::Asset { asset_id } => handle_asset(&client, &session, &asset_id).await,
    }
}

async fn handle_search(
    client: &PrismaClient,
    session: &Session,
    instance_id: Option<String>,
    query: Option<String>,
    limit: u32,
    output: &Path,
) -> Result<()> {
    let rql = match (query, instance_id) {
        (Some(query), _) => query,
        (None, Some(instance_id)) => instance_rql(&instance_id),
        (None, None) => {
            return Err(PrismaCliError::InvalidInput(
                "either --query or --instance-id is required".to_string(),
            ))
        }
    };

    let response = match client.search_config(session, &rql, limit).await? {
        Some(response) => response,
        None => {
            println!("Search failed - no results retrieved");
            return Ok(());
        }
    };

    match normalize_search_results(&response) {
        Some(rows) if !rows.is_empty() => {
            println!("Found {} asset(s)", rows.len());
            write_csv_report(&rows, output)?;
            println!("Successfully wrote asset report to {}", output.display());
            Ok(())
        }
        _ => {
            println!("No assets found matching the query");
            Ok(())
        }
    }
}

async fn handle_asset(client: &PrismaClient, session: &Session, asset_id: &str) -> Result<()> {
    match client.asset_details(session, asset_id).await? {
        Some(details) => {
            let path = write_details_file(&details, asset_id, Path::new("."))?;
            println!("Successfully wrote asset details to {}", path.display());
            Ok(())
        }
        None => {
            println!("Failed to retrieve details for asset: {asset_id}");
            Ok(())
        }
    }
}

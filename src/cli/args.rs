use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prisma-rs")]
#[command(version = "1.0.0")]
#[command(about = "A Prisma Cloud asset inventory and lookup tool for cloud security teams")]
#[command(long_about = None)]
pub struct Cli {
    /// Prisma Cloud API URL
    #[arg(long, env = "PRISMA_API_URL", default_value = "https://api.prismacloud.io")]
    pub api_url: String,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search assets with an RQL config query and write a CSV report
    Search {
        /// EC2 instance id to search for (expands to the matching RQL config query)
        #[arg(long, required_unless_present = "query")]
        instance_id: Option<String>,

        /// Raw RQL config query (takes precedence over --instance-id)
        #[arg(long)]
        query: Option<String>,

        /// Maximum number of results to request
        #[arg(long, default_value_t = 10)]
        limit: u32,

        /// Output CSV path
        #[arg(long, default_value = "asset_report.csv")]
        output: PathBuf,
    },
    /// Fetch raw details for one asset by RRN or UAI and write them to a text file
    Asset {
        /// Asset identifier (RRN or UAI)
        asset_id: String,
    },
}

/// Expand an EC2 instance id into the config query the search API expects
pub fn instance_rql(instance_id: &str) -> String {
    format!(
        "config from cloud.resource where api.name = 'aws-ec2-describe-instances' AND json.rule = instanceId equals \"{instance_id}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_rql_embeds_the_id() {
        assert_eq!(
            instance_rql("i-03a2bae0e2e2f1c13"),
            "config from cloud.resource where api.name = 'aws-ec2-describe-instances' AND json.rule = instanceId equals \"i-03a2bae0e2e2f1c13\""
        );
    }
}

//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::ModuleConfig;
use crate::error::{Error, Result};
use crate::http::HttpGateway;
use crate::members::{MemberAttributes, MembersClient};
use crate::output::{write_records, OutputFormat};
use crate::record::{Record, RecordCollection};
use serde_json::json;
use std::io::Write;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    config: Option<ModuleConfig>,
}

impl Runner {
    /// Create a runner that reads its configuration from the environment
    pub fn new(cli: Cli) -> Self {
        Self { cli, config: None }
    }

    /// Use an already-resolved configuration instead of the environment
    #[must_use]
    pub fn with_config(mut self, config: ModuleConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Run the command and print the result to stdout
    pub async fn run(&self) -> Result<()> {
        let mut buffer = Vec::new();
        self.run_to(&mut buffer).await?;
        std::io::stdout().write_all(&buffer)?;
        Ok(())
    }

    /// Run the command and write the result to `out`
    pub async fn run_to<W: Write + Send>(&self, out: &mut W) -> Result<()> {
        if self.cli.format == OutputFormat::Parquet && self.cli.output.is_none() {
            return Err(Error::invalid_argument(
                "output",
                "--output is required with --format parquet",
            ));
        }

        let client = self.client()?;
        let records = self.execute(&client).await?;

        let summary = write_records(
            &records,
            self.cli.format,
            self.cli.output.as_deref(),
            out,
        )?;
        if let Some(path) = &summary.path {
            info!("Wrote {} rows to {}", summary.rows, path.display());
        }
        Ok(())
    }

    fn client(&self) -> Result<MembersClient<HttpGateway>> {
        let config = match &self.config {
            Some(config) => config.clone(),
            None => ModuleConfig::from_env(&self.cli.module)?,
        };
        debug!("Using module {} against {}", config.module, config.api_base_url);
        MembersClient::from_config(config)
    }

    async fn execute(&self, client: &MembersClient<HttpGateway>) -> Result<RecordCollection> {
        let command = &self.cli.command;
        match command {
            Commands::List { group_key, .. } => {
                let options = command.list_options().unwrap_or_default();
                client.list_members(group_key, &options).await
            }
            Commands::Get {
                group_key,
                member_key,
            } => single(client.get_member(group_key, member_key).await?),
            Commands::HasMember {
                group_key,
                member_key,
            } => {
                let is_member = client.has_member(group_key, member_key).await?;
                single(record(json!({
                    "group_key": group_key,
                    "member_key": member_key,
                    "isMember": is_member,
                }))?)
            }
            Commands::Insert {
                group_key,
                attributes,
            } => {
                let attributes = MemberAttributes::from(attributes);
                single(client.insert_member(group_key, &attributes).await?)
            }
            Commands::Update {
                group_key,
                member_key,
                attributes,
            } => {
                let attributes = MemberAttributes::from(attributes);
                single(
                    client
                        .update_member(group_key, member_key, &attributes)
                        .await?,
                )
            }
            Commands::Delete {
                group_key,
                member_key,
            } => {
                let message = client.delete_member(group_key, member_key).await?;
                single(record(json!({ "message": message }))?)
            }
        }
    }
}

fn record(value: serde_json::Value) -> Result<Record> {
    Record::from_value(value, "$")
}

fn single(record: Record) -> Result<RecordCollection> {
    Ok(RecordCollection::from(vec![record]))
}

pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::DeleteBehavior;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "search-package-assoc")]
#[command(about = "Associate packages with managed search service domains")]
pub struct CliConfig {
    #[arg(long, env = "SEARCH_PACKAGE_ASSOC_CONFIG", help = "Provider TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "./package-association.json")]
    pub state: String,

    #[arg(long, help = "Override provider.region")]
    pub region: Option<String>,

    #[arg(long, help = "Override provider.endpoint_url")]
    pub endpoint_url: Option<String>,

    #[arg(long, help = "Dissociate instead of deleting the package on delete")]
    pub dissociate_on_delete: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Associate a package with a domain and record it in the state file
    Create {
        #[arg(long)]
        domain_name: String,
        #[arg(long)]
        package_id: String,
    },
    /// Refresh the recorded association from the package catalog
    Read,
    /// Destroy the recorded association
    Delete,
    /// Print the recorded state
    Show,
    /// Print the resource attribute schema
    Schema,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 讀取設定檔並套用命令列覆寫
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(region) = &self.region {
            config.provider.region = Some(region.clone());
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.provider.endpoint_url = Some(endpoint_url.clone());
        }
        if self.dissociate_on_delete {
            config.resource.delete_behavior = DeleteBehavior::Dissociate;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("state", &self.state)?;
        if let Command::Create {
            domain_name,
            package_id,
        } = &self.command
        {
            crate::domain::schema::validate(&crate::core::PackageAssociation::new(
                domain_name.as_str(),
                package_id.as_str(),
            ))?;
        }
        Ok(())
    }
}

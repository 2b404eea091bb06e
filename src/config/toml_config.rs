use crate::core::DeleteBehavior;
use crate::utils::error::{AssociationError, Result};
use crate::utils::validation::{
    validate_aws_region, validate_non_empty_string, validate_required_field, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderSection,
    #[serde(default)]
    pub resource: ResourceSection,
}

/// Where and as whom to talk to the search service. Unset fields fall back to
/// the SDK's default chain (environment, shared config files, instance role).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSection {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSection {
    #[serde(default)]
    pub delete_behavior: DeleteBehavior,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssociationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AssociationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AWS_PROFILE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AssociationError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(region) = &self.provider.region {
            validate_aws_region("provider.region", region)?;
        }
        if let Some(profile) = &self.provider.profile {
            validate_non_empty_string("provider.profile", profile)?;
        }
        if let Some(endpoint_url) = &self.provider.endpoint_url {
            validate_url("provider.endpoint_url", endpoint_url)?;
            // 自訂 endpoint 時無法從預設鏈推斷區域，必須明確指定
            validate_required_field("provider.region", &self.provider.region)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

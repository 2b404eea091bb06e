use anyhow::Context;
use clap::Parser;
use search_package_assoc::core::StateStore;
use search_package_assoc::domain::model::AssociationPhase;
use search_package_assoc::domain::schema;
use search_package_assoc::utils::error::{AssociationError, ErrorSeverity};
use search_package_assoc::utils::{logger, validation::Validate};
use search_package_assoc::{
    CliConfig, Command, JsonFileStateStore, OpenSearchPackageApi, PackageAssociation,
    PackageAssociationResource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 驗證配置
    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let store = JsonFileStateStore::new(&cli.state);

    match &cli.command {
        Command::Schema => {
            let rendered = serde_json::to_string_pretty(schema::schema())
                .context("failed to render schema")?;
            println!("{}", rendered);
            return Ok(());
        }
        Command::Show => {
            match store.load().await.context("failed to load state")? {
                Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
                None => println!("No association recorded in {}", store.path().display()),
            }
            return Ok(());
        }
        _ => {}
    }

    if let Err(e) = run(&cli, &store).await {
        tracing::error!(
            "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig, store: &JsonFileStateStore) -> Result<(), AssociationError> {
    let config = cli.resolve()?;
    let client = OpenSearchPackageApi::from_provider_config(&config.provider).await;
    let resource = PackageAssociationResource::new(config.resource.delete_behavior);

    match &cli.command {
        Command::Create {
            domain_name,
            package_id,
        } => {
            let mut state = PackageAssociation::new(domain_name.as_str(), package_id.as_str());

            if let Some(existing) = store.load().await? {
                if existing.phase() == AssociationPhase::Associated {
                    if schema::requires_replacement(&existing, &state) {
                        return Err(AssociationError::ConfigError {
                            message: format!(
                                "state already tracks package ({}) on domain ({}); delete it before associating a different pair",
                                existing.package_id, existing.domain_name
                            ),
                        });
                    }
                    tracing::info!("Association already recorded, refreshing instead");
                    state = existing;
                    resource.read(&client, &mut state).await?;
                    return persist(store, &state).await;
                }
            }

            resource.create(&client, &mut state).await?;
            persist(store, &state).await?;
            tracing::info!("✅ Package ({}) associated with domain ({})", package_id, domain_name);
        }
        Command::Read => {
            let mut state = store
                .load()
                .await?
                .ok_or(AssociationError::MissingIdentity)?;
            resource.read(&client, &mut state).await?;
            persist(store, &state).await?;
        }
        Command::Delete => {
            let mut state = store
                .load()
                .await?
                .ok_or(AssociationError::MissingIdentity)?;
            if state.has_legacy_id() {
                tracing::info!("Re-keying legacy identity before delete");
                resource.read(&client, &mut state).await?;
                if state.phase() == AssociationPhase::Absent {
                    return persist(store, &state).await;
                }
            }
            tracing::debug!("Delete behavior: {:?}", resource.delete_behavior());
            resource.delete(&client, &mut state).await?;
            store.clear().await?;
            tracing::info!("✅ Association for package ({}) destroyed", state.package_id);
        }
        Command::Show | Command::Schema => {}
    }

    Ok(())
}

/// Writes the record back, or drops the state file once the association is gone.
async fn persist(
    store: &JsonFileStateStore,
    state: &PackageAssociation,
) -> Result<(), AssociationError> {
    if state.phase() == AssociationPhase::Associated {
        store.save(state).await?;
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        tracing::warn!(
            "Package ({}) no longer exists remotely, removing it from {}",
            state.package_id,
            store.path().display()
        );
        store.clear().await?;
    }
    Ok(())
}

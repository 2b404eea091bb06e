mod common;

use anyhow::Result;
use common::FakePackageApi;
use search_package_assoc::core::StateStore;
use search_package_assoc::{
    AssociationError, JsonFileStateStore, PackageAssociation, PackageAssociationResource,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_state_file_loads_as_none() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonFileStateStore::new(temp_dir.path().join("absent.json"));

    assert!(store.load().await?.is_none());
    // Clearing a file that was never written is fine.
    store.clear().await?;
    Ok(())
}

#[tokio::test]
async fn test_created_association_survives_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = JsonFileStateStore::new(temp_dir.path().join("nested/dir/state.json"));

    let client = FakePackageApi::new().with_package("pkg-123", "synonyms", "TXT-DICTIONARY");
    let resource = PackageAssociationResource::default();
    let mut state = PackageAssociation::new("es-logs", "pkg-123");
    resource.create(&client, &mut state).await?;

    store.save(&state).await?;
    let loaded = store.load().await?.expect("state should be recorded");
    assert_eq!(loaded, state);

    // A reloaded record can be refreshed and destroyed like the original.
    let mut reloaded = loaded;
    resource.read(&client, &mut reloaded).await?;
    assert_eq!(reloaded.id.as_deref(), Some("pkg-123"));

    resource.delete(&client, &mut reloaded).await?;
    store.clear().await?;
    assert!(store.load().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_state_file_is_a_serialization_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("state.json");
    tokio::fs::write(&path, "{ not json").await?;

    let store = JsonFileStateStore::new(&path);
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, AssociationError::SerializationError(_)));
    Ok(())
}

#[tokio::test]
async fn test_legacy_state_record_is_readable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("state.json");
    tokio::fs::write(
        &path,
        r#"{
  "id": "association-es-logs-pkg-123",
  "domain_name": "es-logs",
  "package_id": "pkg-123"
}"#,
    )
    .await?;

    let store = JsonFileStateStore::new(&path);
    let mut state = store.load().await?.expect("state should be recorded");
    assert!(state.package_name.is_none());

    let client = FakePackageApi::new().with_package("pkg-123", "synonyms", "TXT-DICTIONARY");
    PackageAssociationResource::default()
        .read(&client, &mut state)
        .await?;
    assert_eq!(state.id.as_deref(), Some("pkg-123"));
    Ok(())
}

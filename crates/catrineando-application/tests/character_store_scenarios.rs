use std::sync::Arc;

use catrineando_application::{CharacterCreator, CharacterStore};
use catrineando_core::assets;
use catrineando_core::character::{CharacterDraft, Gender};
use catrineando_infrastructure::FileKeyValueStorage;
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> CharacterStore {
    CharacterStore::new(Arc::new(FileKeyValueStorage::new(dir.path().join("storage"))))
}

#[tokio::test]
async fn test_two_adds_append_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.load().await;

    let ana = store
        .add(CharacterDraft::new("Ana", Gender::Catrina, 0))
        .await
        .unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.characters()[0].name, "Ana");
    assert_eq!(store.characters()[0].gender, Gender::Catrina);

    let luis = store
        .add(CharacterDraft::new("Luis", Gender::Catrin, 1))
        .await
        .unwrap();

    let characters = store.characters();
    assert_eq!(characters.len(), 2);
    assert_eq!(characters[0], ana);
    assert_eq!(characters[1], luis);
}

#[tokio::test]
async fn test_removing_first_keeps_second() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.load().await;

    let ana = store
        .add(CharacterDraft::new("Ana", Gender::Catrina, 0))
        .await
        .unwrap();
    let luis = store
        .add(CharacterDraft::new("Luis", Gender::Catrin, 1))
        .await
        .unwrap();

    store.remove(&ana.id).await.unwrap();

    assert_eq!(store.characters(), vec![luis]);
}

#[tokio::test]
async fn test_collection_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let written = {
        let store = file_store(&temp_dir);
        store.load().await;
        let creator = CharacterCreator::new(Arc::new(store));
        for (name, gender) in [
            ("Ana", Gender::Catrina),
            ("Luis", Gender::Catrin),
            ("Frida", Gender::Catrina),
        ] {
            creator.create(name, Some(gender)).await.unwrap();
        }
        // The creator owns the only handle; reopen storage to compare.
        let reader = file_store(&temp_dir);
        reader.load().await;
        reader.characters()
    };

    let restarted = file_store(&temp_dir);
    assert_eq!(restarted.load().await, 3);
    assert_eq!(restarted.characters(), written);

    let names: Vec<_> = written.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Luis", "Frida"]);
    for character in &written {
        assert!(character.image_index < assets::image_count(character.gender));
    }
}

#[tokio::test]
async fn test_remove_all_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let store = file_store(&temp_dir);
    store.load().await;
    store
        .add(CharacterDraft::new("Ana", Gender::Catrina, 0))
        .await
        .unwrap();

    store.remove_all().await.unwrap();
    assert!(store.is_empty());

    let restarted = file_store(&temp_dir);
    assert_eq!(restarted.load().await, 0);
    assert!(!temp_dir.path().join("storage/characters.json").exists());
}

#[tokio::test]
async fn test_reads_collection_written_by_earlier_versions() {
    let temp_dir = TempDir::new().unwrap();
    let storage_dir = temp_dir.path().join("storage");
    std::fs::create_dir_all(&storage_dir).unwrap();
    std::fs::write(
        storage_dir.join("characters.json"),
        r#"[{"id":"1730462400000","name":"Ana","gender":"catrina","createdAt":"2024-11-01T12:00:00.000Z"},
            {"id":"1730462500000","name":"Luis","gender":"catrin","imageIndex":1,"createdAt":"2024-11-01T12:01:40.000Z"}]"#,
    )
    .unwrap();

    let store = file_store(&temp_dir);
    assert_eq!(store.load().await, 2);

    let ana = store.find_by_id("1730462400000").unwrap();
    assert_eq!(ana.image_index, 0);
    assert_eq!(
        ana.image().asset_path,
        "assets/images/catrinas/catrina-1.jpg"
    );
    assert!(store.find_by_id("0").is_none());
}

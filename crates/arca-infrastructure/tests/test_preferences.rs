use arca_core::preference::{PreferenceKey, PreferenceStore};
use arca_infrastructure::{ArcaPaths, FilePreferenceStore};
use tempfile::TempDir;

#[test]
fn test_preferences_survive_reopening() {
    let temp_dir = TempDir::new().unwrap();
    let path = ArcaPaths::new(Some(temp_dir.path().to_path_buf()))
        .preferences_file()
        .unwrap();

    {
        let store = FilePreferenceStore::with_path(path.clone());
        store.set(PreferenceKey::ApiKey, "AIza-persisted").unwrap();
        store.set(PreferenceKey::DisplayName, "Ana").unwrap();
    }

    let reopened = FilePreferenceStore::with_path(path);
    assert_eq!(
        reopened.get(PreferenceKey::ApiKey).unwrap().as_deref(),
        Some("AIza-persisted")
    );
    assert_eq!(
        reopened.get(PreferenceKey::DisplayName).unwrap().as_deref(),
        Some("Ana")
    );
}

#[test]
fn test_writes_from_two_handles_do_not_clobber_each_other() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.toml");

    let first = FilePreferenceStore::with_path(path.clone());
    let second = FilePreferenceStore::with_path(path);

    first.set(PreferenceKey::Theme, "dark").unwrap();
    second.set(PreferenceKey::ApiKey, "key-2").unwrap();

    assert_eq!(first.get(PreferenceKey::ApiKey).unwrap().as_deref(), Some("key-2"));
    assert_eq!(second.get(PreferenceKey::Theme).unwrap().as_deref(), Some("dark"));
}

#[test]
fn test_concurrent_writers_on_one_file_all_succeed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.toml");
    let keys = [PreferenceKey::ApiKey, PreferenceKey::Theme, PreferenceKey::DisplayName];

    for round in 0..10 {
        let handles: Vec<_> = keys
            .iter()
            .map(|&key| {
                let store = FilePreferenceStore::with_path(path.clone());
                std::thread::spawn(move || {
                    for i in 0..20 {
                        store.set(key, &format!("{round}-{i}")).unwrap();
                        store.remove(key).unwrap();
                    }
                    store.set(key, &format!("final-{round}")).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let reader = FilePreferenceStore::with_path(path.clone());
        for key in keys {
            assert_eq!(
                reader.get(key).unwrap().as_deref(),
                Some(format!("final-{round}").as_str()),
                "lost update for {key} in round {round}"
            );
        }
    }
}

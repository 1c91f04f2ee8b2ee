use super::store::UserStore;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Load the user store from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, or holds duplicate
/// ids or emails, returns an error.
pub fn load_user_store(path: &Path) -> Result<UserStore> {
    if !path.exists() {
        debug!("no user store at {}, starting empty", path.display());
        return Ok(UserStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open user store at {}", path.display()))?;

    let mut store: UserStore =
        serde_json::from_reader(file).context("Failed to load user store")?;

    if store.version != 1 {
        anyhow::bail!("Unsupported user store version: {}", store.version);
    }

    if let Err(errors) = store.check_integrity() {
        anyhow::bail!(
            "Corrupt user store at {}: {}",
            path.display(),
            errors.join("; ")
        );
    }

    Ok(store)
}

/// Save the user store to a JSON file atomically
///
/// Creates the parent directory if it doesn't exist.
pub fn save_user_store(path: &Path, store: &UserStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize user store")?;

    file.commit().context("Failed to save user store")?;

    debug!("saved {} users to {}", store.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::UserRepository;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("ship_fee_test_users_missing.json");
        let _ = fs::remove_file(&temp_path);

        let store = load_user_store(&temp_path).unwrap();
        assert_eq!(store.version, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_load_keeps_ids() {
        let temp_path = env::temp_dir().join("ship_fee_test_users_roundtrip.json");
        let _ = fs::remove_file(&temp_path);

        let mut store = UserStore::new();
        store.create("alice@example.com", "Alice Smith").unwrap();
        let bob = store.create("bob@example.com", "Bob Johnson").unwrap();
        store.delete(bob.id).unwrap();

        save_user_store(&temp_path, &store).unwrap();
        let mut loaded = load_user_store(&temp_path).unwrap();

        assert_eq!(loaded.list(), store.list());
        // next id survives the roundtrip
        let carol = loaded.create("carol@example.com", "Carol").unwrap();
        assert_eq!(carol.id, 3);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version() {
        let temp_path = env::temp_dir().join("ship_fee_test_users_version.json");
        fs::write(&temp_path, r#"{"version": 2, "next_id": 1, "users": []}"#).unwrap();

        let err = load_user_store(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported user store version"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_duplicate_records_rejected() {
        let temp_path = env::temp_dir().join("ship_fee_test_users_duplicates.json");
        fs::write(
            &temp_path,
            r#"{"version": 1, "next_id": 1, "users": [
                {"id": 1, "email": "a@x", "name": "A", "created_at": "2024-01-01T00:00:00Z"},
                {"id": 1, "email": "a@x", "name": "A", "created_at": "2024-01-01T00:00:00Z"}
            ]}"#,
        )
        .unwrap();

        let err = load_user_store(&temp_path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("duplicate id 1"));
        assert!(message.contains("duplicate email a@x"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_stale_next_id_is_raised() {
        let temp_path = env::temp_dir().join("ship_fee_test_users_stale_next_id.json");
        fs::write(
            &temp_path,
            r#"{"version": 1, "next_id": 1, "users": [
                {"id": 1, "email": "a@x", "name": "A", "created_at": "2024-01-01T00:00:00Z"},
                {"id": 4, "email": "d@x", "name": "D", "created_at": "2024-01-02T00:00:00Z"}
            ]}"#,
        )
        .unwrap();

        let mut store = load_user_store(&temp_path).unwrap();
        let created = store.create("b@x", "B").unwrap();
        assert_eq!(created.id, 5);
        let ids: Vec<_> = store.list().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 4, 5]);
        assert_eq!(store.get_by_id(1).unwrap().name, "A");

        let _ = fs::remove_file(&temp_path);
    }
}

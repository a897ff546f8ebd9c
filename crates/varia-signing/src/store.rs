//! Credential store backed by an optional property file

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::credentials::CredentialSet;
use crate::error::{CredentialError, Result};
use crate::properties::PropertyMap;

/// Property key holding the key alias
pub const KEY_ALIAS: &str = "keyAlias";
/// Property key holding the key password
pub const KEY_PASSWORD: &str = "keyPassword";
/// Property key holding the keystore path
pub const STORE_FILE: &str = "storeFile";
/// Property key holding the keystore password
pub const STORE_PASSWORD: &str = "storePassword";

/// Keys that must be present in a non-empty credential file
pub const REQUIRED_KEYS: [&str; 3] = [KEY_ALIAS, KEY_PASSWORD, STORE_PASSWORD];

/// Keys understood by [`CredentialStore::resolve`]
pub const RECOGNIZED_KEYS: [&str; 4] = [KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD];

/// Loads signing credentials from a fixed, project-relative property file.
///
/// The file is optional. The store only reads it and never writes.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    project_root: PathBuf,
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store for `relative_path` under `project_root`.
    /// An absolute `relative_path` is used as-is.
    pub fn new(project_root: impl Into<PathBuf>, relative_path: impl AsRef<Path>) -> Self {
        let project_root = project_root.into();
        let path = project_root.join(relative_path);
        Self { project_root, path }
    }

    /// Full path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project root used to resolve relative keystore paths
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Whether the credential file exists. Does not read it.
    pub fn locate(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the credential file.
    ///
    /// An absent file yields an empty map; only malformed content is an error.
    pub fn load(&self) -> Result<PropertyMap> {
        if !self.locate() {
            debug!(path = %self.path.display(), "credential file not present");
            return Ok(PropertyMap::new());
        }

        let bytes = std::fs::read(&self.path)?;
        let map = PropertyMap::from_bytes(&bytes, &self.path)?;
        debug!(path = %self.path.display(), entries = map.len(), "credential file parsed");
        Ok(map)
    }

    /// Turn a property map into a credential set.
    ///
    /// An empty map means no credentials. A non-empty map must carry every key in
    /// [`REQUIRED_KEYS`] with a non-blank value. `storeFile` may be omitted, in
    /// which case the signing backend's default keystore applies.
    pub fn resolve(&self, map: &PropertyMap) -> Result<Option<CredentialSet>> {
        if map.is_empty() {
            return Ok(None);
        }

        for key in map.keys().filter(|k| !RECOGNIZED_KEYS.iter().any(|r| r == k)) {
            debug!(path = %self.path.display(), key, "ignoring unrecognized credential property");
        }

        let value = |key: &str| map.get(key).filter(|v| !v.trim().is_empty());

        let (Some(alias), Some(key_password), Some(store_password)) =
            (value(KEY_ALIAS), value(KEY_PASSWORD), value(STORE_PASSWORD))
        else {
            let missing = REQUIRED_KEYS
                .into_iter()
                .filter(|key| value(*key).is_none())
                .collect();
            return Err(CredentialError::Incomplete {
                path: self.path.clone(),
                missing,
            });
        };

        let store_file = value(STORE_FILE).map(|file| self.project_root.join(file));
        if store_file.is_none() {
            debug!("no storeFile given, signing backend default keystore applies");
        }

        Ok(Some(CredentialSet::new(
            alias,
            key_password,
            store_file,
            store_password,
        )))
    }

    /// Locate, load and resolve in one step
    pub fn open(&self) -> Result<Option<CredentialSet>> {
        let map = self.load()?;
        let credentials = self.resolve(&map)?;

        match credentials {
            Some(ref creds) => info!(
                path = %self.path.display(),
                alias = %creds.key_alias,
                default_keystore = creds.uses_default_keystore(),
                "signing credentials loaded"
            ),
            None => info!(path = %self.path.display(), "no signing credentials present"),
        }

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(content: Option<&str>) -> (TempDir, CredentialStore) {
        let temp = TempDir::new().unwrap();
        if let Some(content) = content {
            std::fs::write(temp.path().join("key.properties"), content).unwrap();
        }
        let store = CredentialStore::new(temp.path(), "key.properties");
        (temp, store)
    }

    #[test]
    fn test_locate() {
        let (_temp, store) = store_with(None);
        assert!(!store.locate());

        let (_temp, store) = store_with(Some("keyAlias=a\n"));
        assert!(store.locate());
    }

    #[test]
    fn test_absent_file_yields_no_credentials() {
        let (_temp, store) = store_with(None);
        assert!(store.load().unwrap().is_empty());
        assert!(store.open().unwrap().is_none());
    }

    #[test]
    fn test_complete_file() {
        let (temp, store) =
            store_with(Some("keyAlias=a\nkeyPassword=p1\nstoreFile=s.jks\nstorePassword=p2\n"));

        let creds = store.open().unwrap().unwrap();
        assert_eq!(creds.key_alias, "a");
        assert_eq!(creds.key_password.expose(), "p1");
        assert_eq!(creds.store_file(), Some(temp.path().join("s.jks").as_path()));
        assert_eq!(creds.store_password.expose(), "p2");
    }

    #[test]
    fn test_absolute_store_file_is_kept() {
        let (temp, _) = store_with(None);
        let keystore = temp.path().join("keys").join("upload.jks");
        let content = format!(
            "keyAlias=a\nkeyPassword=p1\nstoreFile={}\nstorePassword=p2\n",
            keystore.display()
        );
        std::fs::write(temp.path().join("key.properties"), content).unwrap();
        let store = CredentialStore::new(
            temp.path().join("android"),
            temp.path().join("key.properties"),
        );

        let creds = store.open().unwrap().unwrap();
        assert_eq!(creds.store_file(), Some(keystore.as_path()));
    }

    #[test]
    fn test_missing_store_file_uses_default_keystore() {
        let (_temp, store) = store_with(Some("keyAlias=a\nkeyPassword=p1\nstorePassword=p2\n"));
        let creds = store.open().unwrap().unwrap();
        assert!(creds.uses_default_keystore());
    }

    #[test]
    fn test_only_alias_is_incomplete() {
        let (_temp, store) = store_with(Some("keyAlias=a\n"));
        match store.open().unwrap_err() {
            CredentialError::Incomplete { missing, .. } => {
                assert_eq!(missing, vec![KEY_PASSWORD, STORE_PASSWORD]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_required_value_is_incomplete() {
        let (_temp, store) = store_with(Some("keyAlias=a\nkeyPassword=\nstorePassword=p2\n"));
        assert!(matches!(
            store.open(),
            Err(CredentialError::Incomplete { ref missing, .. }) if missing == &vec![KEY_PASSWORD]
        ));
    }

    #[test]
    fn test_unrecognized_keys_only_is_incomplete() {
        let (_temp, store) = store_with(Some("flutter.sdk=/opt/flutter\n"));
        assert!(matches!(store.open(), Err(CredentialError::Incomplete { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let (_temp, store) = store_with(Some("keyAlias=a\nkeyPassword=\\uzz12\n"));
        assert!(matches!(
            store.open(),
            Err(CredentialError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_comment_only_file_yields_no_credentials() {
        let (_temp, store) = store_with(Some("# fill in before releasing\n"));
        assert!(store.open().unwrap().is_none());
    }

    #[test]
    fn test_properties_syntax_is_honored() {
        let (temp, store) = store_with(Some(
            "keyAlias upload\nkeyPassword=p1  \nstoreFile=keys\\\\upload.jks\nstorePassword: p2\n",
        ));

        let creds = store.open().unwrap().unwrap();
        assert_eq!(creds.key_alias, "upload");
        assert_eq!(creds.key_password.expose(), "p1  ");
        assert_eq!(
            creds.store_file(),
            Some(temp.path().join("keys\\upload.jks").as_path())
        );
        assert_eq!(creds.store_password.expose(), "p2");
    }
}

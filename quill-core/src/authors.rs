//! Author records and the frontmatter author -> record mapping.

use crate::config::MissingAuthorPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Display name substituted under the lenient missing-author policy.
pub const PLACEHOLDER_AUTHOR: &str = "Unknown author";

#[derive(Error, Debug)]
pub enum AuthorError {
    #[error("Failed to read authors file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse authors YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Duplicate author key '{0}'")]
    DuplicateKey(String),

    #[error("Unknown author key '{key}' referenced by {source_path}")]
    UnknownKey { key: String, source_path: String },
}

/// One YAML author entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub key: String,
    pub name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// All author records for a build, loaded once and read-only thereafter.
#[derive(Debug, Clone, Default)]
pub struct AuthorDirectory {
    records: HashMap<String, AuthorRecord>,
}

impl AuthorDirectory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load records from a YAML list. Duplicate keys are fatal.
    pub fn load(path: &Path) -> Result<Self, AuthorError> {
        let contents = std::fs::read_to_string(path)?;
        let list: Vec<AuthorRecord> = serde_yaml::from_str(&contents)?;

        let mut records = HashMap::new();
        for record in list {
            if records.contains_key(&record.key) {
                return Err(AuthorError::DuplicateKey(record.key));
            }
            records.insert(record.key.clone(), record);
        }

        tracing::debug!("Loaded {} author records", records.len());
        Ok(Self { records })
    }

    pub fn get(&self, key: &str) -> Option<&AuthorRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolves frontmatter author keys against the directory with a fixed
/// missing-key policy, applied identically to every document.
#[derive(Debug, Clone)]
pub struct AuthorResolver {
    directory: AuthorDirectory,
    policy: MissingAuthorPolicy,
}

impl AuthorResolver {
    pub fn new(directory: AuthorDirectory, policy: MissingAuthorPolicy) -> Self {
        Self { directory, policy }
    }

    /// Map an optional frontmatter key to a display name.
    ///
    /// Documents without an author stay authorless. A key with no matching
    /// record either fails the build or yields the placeholder, depending on
    /// the configured policy.
    pub fn resolve(
        &self,
        key: Option<&str>,
        source_path: &str,
    ) -> Result<Option<String>, AuthorError> {
        let Some(key) = key else {
            return Ok(None);
        };

        if let Some(record) = self.directory.get(key) {
            return Ok(Some(record.name.clone()));
        }

        match self.policy {
            MissingAuthorPolicy::Error => Err(AuthorError::UnknownKey {
                key: key.to_string(),
                source_path: source_path.to_string(),
            }),
            MissingAuthorPolicy::Placeholder => {
                tracing::warn!(
                    "Unknown author key '{}' in {}; substituting placeholder",
                    key,
                    source_path
                );
                Ok(Some(PLACEHOLDER_AUTHOR.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AuthorDirectory {
        let mut records = HashMap::new();
        records.insert(
            "jane".to_string(),
            AuthorRecord {
                key: "jane".to_string(),
                name: "Jane Doe".to_string(),
                bio: None,
                url: None,
            },
        );
        AuthorDirectory { records }
    }

    #[test]
    fn test_resolve_known_key() {
        let resolver = AuthorResolver::new(directory(), MissingAuthorPolicy::Error);
        let name = resolver.resolve(Some("jane"), "blog/a.md").unwrap();
        assert_eq!(name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_resolve_no_key() {
        let resolver = AuthorResolver::new(directory(), MissingAuthorPolicy::Error);
        assert_eq!(resolver.resolve(None, "about.md").unwrap(), None);
    }

    #[test]
    fn test_missing_key_strict_fails() {
        let resolver = AuthorResolver::new(directory(), MissingAuthorPolicy::Error);
        let err = resolver.resolve(Some("ghost"), "blog/a.md").unwrap_err();
        match err {
            AuthorError::UnknownKey { key, source_path } => {
                assert_eq!(key, "ghost");
                assert_eq!(source_path, "blog/a.md");
            }
            other => panic!("expected UnknownKey, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_lenient_substitutes_placeholder() {
        let resolver = AuthorResolver::new(directory(), MissingAuthorPolicy::Placeholder);
        let name = resolver.resolve(Some("ghost"), "blog/a.md").unwrap();
        assert_eq!(name.as_deref(), Some(PLACEHOLDER_AUTHOR));

        // Same fallback for a second document: the policy is uniform.
        let again = resolver.resolve(Some("other-ghost"), "blog/b.md").unwrap();
        assert_eq!(again.as_deref(), Some(PLACEHOLDER_AUTHOR));
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.yml");
        std::fs::write(
            &path,
            r#"
- key: jane
  name: Jane Doe
  url: https://example.com/jane
- key: sam
  name: Sam Mwangi
"#,
        )
        .unwrap();

        let directory = AuthorDirectory::load(&path).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("sam").unwrap().name, "Sam Mwangi");
    }

    #[test]
    fn test_duplicate_key_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("authors.yml");
        std::fs::write(
            &path,
            "- key: jane\n  name: Jane Doe\n- key: jane\n  name: Jane Again\n",
        )
        .unwrap();

        let err = AuthorDirectory::load(&path).unwrap_err();
        assert!(matches!(err, AuthorError::DuplicateKey(ref k) if k == "jane"));
    }
}

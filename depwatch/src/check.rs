use crate::npm::{FetchError, NpmClient};
use depwatch_core::types::NO_VERSION;
use depwatch_core::{Changeset, VersionMap, diff};
use tracing::{error, info};

/// Result of checking tracked packages against the registry
#[derive(Debug)]
pub struct CheckOutcome {
    /// Stored versions with every successful fetch merged in
    pub updated: VersionMap,
    /// What changed relative to the stored versions
    pub changes: Changeset,
    /// Packages whose fetch failed, with the reason
    pub failures: Vec<(String, FetchError)>,
}

impl CheckOutcome {
    /// Whether the version map file should be (re)written
    pub fn needs_write(&self, file_exists: bool) -> bool {
        !file_exists || !self.changes.is_empty()
    }

    /// Names of packages whose fetch failed
    pub fn failed_names(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|(name, _)| name.as_str())
    }

    /// One-line summary of the changes for the log
    pub fn summary(&self) -> String {
        self.changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Merge fetched versions into the stored map.
///
/// Failed fetches are logged and leave the stored value untouched.
pub fn merge_results(
    stored: &VersionMap,
    results: Vec<(String, Result<String, FetchError>)>,
) -> CheckOutcome {
    let mut updated = stored.clone();
    let mut failures = Vec::new();

    for (name, result) in results {
        match result {
            Ok(latest) => {
                match stored.get(&name) {
                    Some(prev) if prev == latest => info!("{name} is up-to-date at {latest}"),
                    prev => info!("{name}: {} -> {latest}", prev.unwrap_or(NO_VERSION)),
                }
                updated.insert(name, latest);
            }
            Err(e) => {
                error!("Failed to fetch latest for {name}: {e}");
                failures.push((name, e));
            }
        }
    }

    let changes = diff(stored, &updated);
    CheckOutcome {
        updated,
        changes,
        failures,
    }
}

/// Fetch every tracked package and compare against the stored map
pub async fn check_packages(
    client: &NpmClient,
    packages: &[String],
    stored: &VersionMap,
    progress: impl Fn(usize, usize),
) -> CheckOutcome {
    let results = client.fetch_all(packages, progress).await;
    merge_results(stored, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::npm::FETCH_TIMEOUT;
    use depwatch_core::ChangeEntry;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn malformed(name: &str) -> FetchError {
        FetchError::Malformed {
            name: name.to_string(),
            reason: "latest tag missing".to_string(),
        }
    }

    #[test]
    fn test_failed_fetch_keeps_stored_version() {
        let stored: VersionMap = [("java", "21.0.1"), ("node-gyp", "10.0.0")]
            .into_iter()
            .collect();
        let results = vec![
            ("java".to_string(), Err(malformed("java"))),
            ("node-gyp".to_string(), Ok("11.0.0".to_string())),
        ];

        let outcome = merge_results(&stored, results);

        assert_eq!(outcome.updated.get("java"), Some("21.0.1"));
        assert_eq!(outcome.updated.get("node-gyp"), Some("11.0.0"));
        assert_eq!(
            outcome.changes.entries(),
            &[ChangeEntry::new("node-gyp", Some("10.0.0".to_string()), "11.0.0")]
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, "java");
    }

    #[test]
    fn test_failed_fetch_of_untracked_package_adds_nothing() {
        let outcome = merge_results(
            &VersionMap::new(),
            vec![("java".to_string(), Err(malformed("java")))],
        );

        assert!(outcome.updated.is_empty());
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_first_run_with_every_fetch_failing_initializes_empty_file() {
        let outcome = merge_results(
            &VersionMap::new(),
            vec![
                ("java".to_string(), Err(malformed("java"))),
                ("node-gyp".to_string(), Err(malformed("node-gyp"))),
            ],
        );

        assert!(outcome.needs_write(false));
        assert!(outcome.updated.is_empty());
        assert!(outcome.changes.is_empty());
        assert_eq!(
            outcome.failed_names().collect::<Vec<_>>(),
            vec!["java", "node-gyp"]
        );
    }

    #[test]
    fn test_needs_write() {
        let stored: VersionMap = [("java", "21.0.1")].into_iter().collect();

        let unchanged = merge_results(&stored, vec![("java".to_string(), Ok("21.0.1".to_string()))]);
        assert!(!unchanged.needs_write(true));
        assert!(unchanged.needs_write(false));

        let changed = merge_results(&stored, vec![("java".to_string(), Ok("21.0.2".to_string()))]);
        assert!(changed.needs_write(true));
        assert_eq!(changed.summary(), "java 21.0.1 -> 21.0.2");
    }

    #[test]
    fn test_packages_removed_from_tracking_stay_in_map() {
        let stored: VersionMap = [("java", "21.0.1"), ("left-pad", "1.3.0")]
            .into_iter()
            .collect();

        let outcome = merge_results(&stored, vec![("java".to_string(), Ok("21.0.1".to_string()))]);

        assert_eq!(outcome.updated.get("left-pad"), Some("1.3.0"));
        assert!(outcome.changes.is_empty());
    }

    #[tokio::test]
    async fn test_check_packages_against_registry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/-/package/java/dist-tags"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/-/package/node-gyp/dist-tags"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"latest": "11.2.0"})),
            )
            .mount(&server)
            .await;

        let client = NpmClient::new(&server.uri(), FETCH_TIMEOUT);
        let packages = vec!["java".to_string(), "node-gyp".to_string()];
        let stored: VersionMap = [("java", "21.0.1")].into_iter().collect();

        let outcome = check_packages(&client, &packages, &stored, |_, _| {}).await;

        assert_eq!(outcome.updated.get("java"), Some("21.0.1"));
        assert_eq!(
            outcome.changes.entries(),
            &[ChangeEntry::new("node-gyp", None, "11.2.0")]
        );
        assert_eq!(outcome.failures.len(), 1);
    }
}

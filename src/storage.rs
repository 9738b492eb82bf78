pub mod compact;
pub mod record;

use std::{
    ffi::OsStr,
    fs,
    io,
    path::{Path, PathBuf},
};

use itertools::Itertools;

use crate::{
    core::{consumer::Consumer, registry::Registry},
    prelude::*,
};

/// Directory with one labeled-line file per consumer.
#[must_use]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    const EXTENSION: &'static str = "txt";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File of the consumer with the specified full name.
    pub fn path_of(&self, full_name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", sanitize(full_name), Self::EXTENSION))
    }

    /// Load every consumer file, skipping the ones that fail to load.
    ///
    /// A missing directory means an empty registry.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn load(&self) -> Result<Registry> {
        if !self.root.is_dir() {
            warn!("no consumer data directory found, starting with empty data");
            return Ok(Registry::default());
        }
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to list `{}`", self.root.display()))?
            .map(|entry| entry.map(|entry| entry.path()));
        let paths = Self::consumer_files(entries);

        let registry: Registry = paths
            .iter()
            .filter_map(|path| {
                Self::load_file(path)
                    .inspect_err(|error| {
                        error!(path = %path.display(), "failed to load the consumer: {error:#}");
                    })
                    .ok()
            })
            .collect();
        info!(n_consumers = registry.len(), "loaded consumers");
        Ok(registry)
    }

    /// Consumer files among the listed entries in file-name order, unreadable entries are skipped.
    fn consumer_files(entries: impl IntoIterator<Item = io::Result<PathBuf>>) -> Vec<PathBuf> {
        entries
            .into_iter()
            .filter_map(|entry| {
                entry.inspect_err(|error| error!("failed to read a directory entry: {error:#}")).ok()
            })
            .filter(|path| path.is_file() && path.extension() == Some(OsStr::new(Self::EXTENSION)))
            .sorted()
            .collect()
    }

    fn load_file(path: &Path) -> Result<Consumer> {
        let text = fs::read_to_string(path).context("failed to read the file")?;
        Ok(record::decode(&text)?)
    }

    /// Rewrite the consumer file.
    #[instrument(skip_all, fields(full_name = %consumer.full_name))]
    pub fn save(&self, consumer: &Consumer) -> Result {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create `{}`", self.root.display()))?;
        let path = self.path_of(&consumer.full_name);
        fs::write(&path, record::encode(consumer))
            .with_context(|| format!("failed to write `{}`", path.display()))?;
        debug!(path = %path.display(), "saved");
        Ok(())
    }

    /// Save every consumer, carrying on after failures.
    ///
    /// Returns the number of consumers that could not be saved.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn save_all(&self, registry: &Registry) -> usize {
        for path in self.shared_paths(registry) {
            warn!(path = %path.display(), "several consumers share the file, the last one wins");
        }
        let n_failures = registry
            .iter()
            .filter(|consumer| {
                self.save(consumer)
                    .inspect_err(|error| {
                        error!(
                            full_name = %consumer.full_name,
                            "failed to save the consumer: {error:#}",
                        );
                    })
                    .is_err()
            })
            .count();
        info!(n_consumers = registry.len(), n_failures, "saved consumers");
        n_failures
    }

    /// Files that more than one consumer of the registry would be written to.
    fn shared_paths(&self, registry: &Registry) -> Vec<PathBuf> {
        registry
            .iter()
            .map(|consumer| self.path_of(&consumer.full_name))
            .duplicates()
            .collect()
    }
}

/// File stem for the full name: spaces and characters that paths do not tolerate become `_`.
fn sanitize(full_name: &str) -> String {
    full_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || c.is_control() || r#"/\:*?"<>|"#.contains(c) { '_' } else { c }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        account::AccountType,
        consumer::tests::{jane_doe, today},
        tariff::EnergySource,
    };

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize("Acme: Head Office"), "Acme__Head_Office");
    }

    #[test]
    fn test_missing_directory_is_empty() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = Storage::new(directory.path().join("Users"));
        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = Storage::new(directory.path().join("Users"));
        let mut consumer = jane_doe();
        let _ = consumer.record_usage(today());
        let registry: Registry = [consumer.clone()].into_iter().collect();

        assert_eq!(storage.save_all(&registry), 0);
        assert!(storage.path_of("Jane Doe").is_file());
        assert_eq!(storage.load()?, registry);
        Ok(())
    }

    #[test]
    fn test_save_rewrites_the_file() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = Storage::new(directory.path());
        let mut consumer = jane_doe();
        storage.save(&consumer)?;
        consumer.remove_appliance("TV")?;
        storage.save(&consumer)?;
        let text = fs::read_to_string(storage.path_of("Jane Doe"))?;
        assert!(!text.contains("Device: TV"));
        Ok(())
    }

    #[test]
    fn test_broken_files_are_skipped() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = Storage::new(directory.path());
        storage.save(&jane_doe())?;
        fs::write(storage.path_of("Broken"), "Full Name: Broken\nAccount Type: Residential\n")?;
        fs::write(
            storage.path_of("Nuclear"),
            "Full Name: Nuclear\nAccount Type: Residential\nEnergy Source: FissionEnergy\n",
        )?;
        fs::write(directory.path().join("notes.md"), "not a consumer")?;

        let registry = storage.load()?;
        assert_eq!(registry.len(), 1);
        assert!(registry.find("jane doe").is_some());
        Ok(())
    }

    #[test]
    fn test_save_all_carries_on_after_a_failure() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = Storage::new(directory.path());
        fs::create_dir_all(storage.path_of("Blocked"))?;
        let blocked = Consumer::builder()
            .full_name("Blocked")
            .account_type(AccountType::Commercial)
            .energy_source(EnergySource::Wind)
            .build();
        let registry: Registry = [blocked, jane_doe()].into_iter().collect();

        assert_eq!(storage.save_all(&registry), 1);
        assert!(storage.path_of("Jane Doe").is_file());
        Ok(())
    }

    #[test]
    fn test_shared_paths() {
        let storage = Storage::new("Users");
        let mut twin = jane_doe();
        twin.full_name = "Jane_Doe".to_string();
        let registry: Registry = [jane_doe(), twin].into_iter().collect();
        assert_eq!(storage.shared_paths(&registry), [storage.path_of("Jane Doe")]);
        assert!(storage.shared_paths(&[jane_doe()].into_iter().collect()).is_empty());
    }

    #[test]
    fn test_consumer_files_skip_unreadable_entries() -> Result {
        let directory = tempfile::tempdir()?;
        let first = directory.path().join("b.txt");
        let second = directory.path().join("a.txt");
        fs::write(&first, "")?;
        fs::write(&second, "")?;
        fs::write(directory.path().join("c.md"), "")?;
        let entries = vec![
            Ok(first.clone()),
            Err(io::Error::other("entry vanished")),
            Ok(directory.path().join("c.md")),
            Ok(second.clone()),
        ];
        assert_eq!(Storage::consumer_files(entries), [second, first]);
        Ok(())
    }
}

use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{core::registry::Registry, prelude::*, storage::compact};

#[derive(Parser)]
pub struct ImportArgs {
    /// File with one compact consumer line per line.
    pub path: PathBuf,
}

/// Every consumer as a compact line, one per line.
pub fn export(registry: &Registry) -> Result<String> {
    let mut text = String::new();
    for consumer in registry.iter() {
        let line = compact::encode(consumer)
            .with_context(|| format!("failed to export `{}`", consumer.full_name))?;
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

/// Append the consumers from the compact lines, skipping blank and malformed lines.
///
/// Returns the number of imported consumers.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn import(registry: &mut Registry, args: &ImportArgs) -> Result<usize> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read `{}`", args.path.display()))?;
    Ok(import_lines(registry, &text))
}

fn import_lines(registry: &mut Registry, text: &str) -> usize {
    let n_consumers = registry.len();
    registry.extend(
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| {
                compact::decode(line)
                    .inspect_err(|error| warn!(line_number = index + 1, "skipping: {error}"))
                    .ok()
            }),
    );
    let n_imported = registry.len() - n_consumers;
    info!(n_imported, "imported consumers");
    n_imported
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::consumer::tests::{jane_doe, today};

    #[test]
    fn test_export_then_import() -> Result {
        let mut consumer = jane_doe();
        let _ = consumer.record_usage(today());
        let exported = export(&[consumer].into_iter().collect())?;
        assert_eq!(exported.lines().count(), 1);

        let mut registry = Registry::default();
        assert_eq!(import_lines(&mut registry, &exported), 1);
        assert_eq!(export(&registry)?, exported);
        Ok(())
    }

    #[test]
    fn test_import_skips_bad_lines() -> Result {
        let line = compact::encode(&jane_doe())?;
        let text = format!("{line}\n\nnot a consumer\n{}\n", line.replace("Solar", "Nuclear"));
        let mut registry = Registry::default();
        assert_eq!(import_lines(&mut registry, &text), 1);
        assert!(registry.find("Jane Doe").is_some());
        Ok(())
    }

    #[test]
    fn test_import_file() -> Result {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), compact::encode(&jane_doe())? + "\n")?;
        let mut registry = Registry::default();
        let n_imported = import(&mut registry, &ImportArgs { path: file.path().to_path_buf() })?;
        assert_eq!(n_imported, 1);
        Ok(())
    }
}

//! Dump location: find candidate files and decode them into a [`RawBundle`].

pub mod filesystem;

use crate::error::{DumpscopeError, Result};
use crate::normalize::detect::{self, ContentLabel, SourceKind};
use crate::normalize::RawBundle;
use filesystem::{list_json_files, read_json};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File-name patterns, checked in order against the lowercased file name.
const NAME_PATTERNS: &[(&[&str], SourceKind)] = &[
    (&["omnichannel", "livechat"], SourceKind::FeatureSettings),
    (&["setting"], SourceKind::Settings),
    (&["statistic", "stats"], SourceKind::Statistics),
    (&["app"], SourceKind::Apps),
    (&["log"], SourceKind::Log),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedFile {
    pub kind: SourceKind,
    pub path: PathBuf,
    pub sniffed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LocatedDump {
    pub raw: RawBundle,
    pub files: Vec<LocatedFile>,
}

impl LocatedDump {
    fn slot(&mut self, kind: SourceKind) -> &mut Option<Value> {
        match kind {
            SourceKind::Log => &mut self.raw.log,
            SourceKind::Settings => &mut self.raw.settings,
            SourceKind::Statistics => &mut self.raw.statistics,
            SourceKind::Apps => &mut self.raw.apps,
            SourceKind::FeatureSettings => &mut self.raw.feature_settings,
        }
    }

    fn fill(&mut self, kind: SourceKind, path: &Path, value: Value, sniffed: bool) -> bool {
        let slot = self.slot(kind);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        tracing::info!(kind = kind.as_str(), path = %path.display(), sniffed, "source located");
        self.files.push(LocatedFile {
            kind,
            path: path.to_path_buf(),
            sniffed,
        });
        true
    }
}

pub fn kind_from_name(path: &Path) -> Option<SourceKind> {
    let name = path.file_name()?.to_str()?.to_lowercase();
    NAME_PATTERNS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| name.contains(needle)))
        .map(|(_, kind)| *kind)
}

/// Decoded content, or `Null` when the file is present but not valid JSON.
/// `Null` normalises to an unparseable source.
fn decode_or_null(path: &Path) -> Value {
    match read_json(path) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to decode dump file");
            Value::Null
        }
    }
}

pub fn locate(path: &Path) -> Result<LocatedDump> {
    if !path.exists() {
        return Err(DumpscopeError::PathNotFound(path.display().to_string()));
    }
    let dump = if path.is_dir() {
        locate_in_dir(path)
    } else {
        locate_file(path)
    };
    if dump.files.is_empty() {
        return Err(DumpscopeError::NoSources(path.display().to_string()));
    }
    Ok(dump)
}

/// A directly named file is sniffed first and falls back to its name. An
/// undecodable file still fills the slot its name points at.
fn locate_file(path: &Path) -> LocatedDump {
    let mut dump = LocatedDump::default();
    let value = decode_or_null(path);
    let label = detect::detect(&value);
    if label != ContentLabel::Unknown {
        for kind in label.kinds() {
            dump.fill(*kind, path, value.clone(), true);
        }
    } else if let Some(kind) = kind_from_name(path) {
        dump.fill(kind, path, value, false);
    }
    dump
}

fn locate_in_dir(root: &Path) -> LocatedDump {
    let mut dump = LocatedDump::default();
    let mut unmatched = Vec::new();

    for file in list_json_files(root) {
        match kind_from_name(&file) {
            Some(kind) => {
                if dump.slot(kind).is_none() {
                    let value = decode_or_null(&file);
                    dump.fill(kind, &file, value, false);
                }
            }
            None => unmatched.push(file),
        }
    }

    for file in unmatched {
        let Ok(value) = read_json(&file) else {
            tracing::debug!(path = %file.display(), "skipping undecodable file");
            continue;
        };
        let label = detect::detect(&value);
        tracing::debug!(path = %file.display(), label = label.as_str(), "content sniffed");
        for kind in label.kinds() {
            dump.fill(*kind, &file, value.clone(), true);
        }
    }
    dump
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{DumpBundle, SourceStatus};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn name_patterns_assign_kinds() {
        assert_eq!(
            kind_from_name(Path::new("omnichannel-settings.json")),
            Some(SourceKind::FeatureSettings)
        );
        assert_eq!(
            kind_from_name(Path::new("settings.json")),
            Some(SourceKind::Settings)
        );
        assert_eq!(
            kind_from_name(Path::new("Statistics.json")),
            Some(SourceKind::Statistics)
        );
        assert_eq!(kind_from_name(Path::new("apps.json")), Some(SourceKind::Apps));
        assert_eq!(kind_from_name(Path::new("server-log.json")), Some(SourceKind::Log));
        assert_eq!(kind_from_name(Path::new("dump.json")), None);
    }

    #[test]
    fn directory_scan_combines_names_and_sniffing() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(
            dir.path().join("settings.json"),
            r#"[{"_id": "E2E_Enable", "value": false}]"#,
        )
        .expect("settings should write");
        fs::write(dir.path().join("apps.json"), "{broken").expect("apps should write");
        fs::write(
            dir.path().join("export.json"),
            r#"{"settings": [], "totalUsers": 4, "queue": []}"#,
        )
        .expect("export should write");

        let dump = locate(dir.path()).expect("locate should succeed");
        assert!(dump.raw.settings.is_some());
        assert_eq!(dump.raw.apps, Some(Value::Null));
        assert!(dump.raw.log.is_some());
        assert!(dump.raw.statistics.is_some());
        assert!(dump.raw.feature_settings.is_none());
        let sniffed: Vec<_> = dump
            .files
            .iter()
            .filter(|file| file.sniffed)
            .map(|file| file.kind)
            .collect();
        assert_eq!(sniffed, vec![SourceKind::Log, SourceKind::Statistics]);
    }

    #[test]
    fn single_comprehensive_file_fills_three_slots() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("dump.json");
        fs::write(
            &path,
            r#"{"settings": [{"_id": "E2E_Enable", "value": true}], "totalMessages": 10}"#,
        )
        .expect("dump should write");

        let dump = locate(&path).expect("locate should succeed");
        assert_eq!(dump.files.len(), 3);
        assert!(dump.raw.apps.is_none());
    }

    #[test]
    fn single_comprehensive_file_normalizes_all_three_sources() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("dump.json");
        fs::write(
            &path,
            r#"{"settings": [{"_id": "E2E_Enable", "value": true}], "totalMessages": 10}"#,
        )
        .expect("dump should write");

        let dump = locate(&path).expect("locate should succeed");
        let bundle = DumpBundle::from_raw(&dump.raw);
        assert_eq!(bundle.log.status(), SourceStatus::Analyzed);
        assert_eq!(bundle.settings.status(), SourceStatus::Analyzed);
        assert_eq!(bundle.statistics.status(), SourceStatus::Analyzed);
        assert_eq!(bundle.apps.status(), SourceStatus::NotAnalyzed);
    }

    #[test]
    fn undecodable_single_file_keeps_its_named_slot() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{broken").expect("settings should write");

        let dump = locate(&path).expect("named file should still be located");
        assert_eq!(dump.raw.settings, Some(Value::Null));
        assert_eq!(dump.files.len(), 1);
        assert!(!dump.files[0].sniffed);
        let bundle = DumpBundle::from_raw(&dump.raw);
        assert_eq!(bundle.settings.status(), SourceStatus::Unparseable);
    }

    #[test]
    fn undecodable_unnamed_file_has_no_sources() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("export.json");
        fs::write(&path, "{broken").expect("export should write");

        let err = locate(&path).expect_err("nothing to locate");
        assert!(matches!(err, DumpscopeError::NoSources(_)));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = locate(dir.path()).expect_err("empty dir should fail");
        assert!(matches!(err, DumpscopeError::NoSources(_)));
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = locate(Path::new("/definitely/not/here")).expect_err("missing path should fail");
        assert!(matches!(err, DumpscopeError::PathNotFound(_)));
    }
}

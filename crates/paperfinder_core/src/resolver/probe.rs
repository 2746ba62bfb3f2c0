//! Asset existence probes.
//!
//! # Invariants
//! - Probes fail open: any I/O error reads as "absent".

use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Answers whether one asset file exists for a subject.
pub trait AssetProbe {
    fn exists(&self, subject_code: &str, file_name: &str) -> bool;
}

/// Checks each candidate directly against `<root>/<subject>/<file>`.
#[derive(Debug, Clone)]
pub struct FsAssetProbe {
    root: PathBuf,
}

impl FsAssetProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetProbe for FsAssetProbe {
    fn exists(&self, subject_code: &str, file_name: &str) -> bool {
        self.root.join(subject_code).join(file_name).is_file()
    }
}

/// Lists each subject directory once and answers from memory.
///
/// Same answers as `FsAssetProbe` for files present at scan time.
#[derive(Debug, Clone, Default)]
pub struct IndexedAssetProbe {
    files_by_subject: HashMap<String, HashSet<String>>,
}

impl IndexedAssetProbe {
    /// Scans `<root>/<code>` for every code in `subject_codes`.
    pub fn scan<'a>(root: &Path, subject_codes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut files_by_subject = HashMap::new();
        for code in subject_codes {
            let files = list_files(&root.join(code));
            debug!(
                "event=asset_index module=resolver status=ok subject={} files={}",
                code,
                files.len()
            );
            files_by_subject.insert(code.to_string(), files);
        }
        Self { files_by_subject }
    }

    /// Number of indexed files for `subject_code`.
    pub fn file_count(&self, subject_code: &str) -> usize {
        self.files_by_subject
            .get(subject_code)
            .map_or(0, HashSet::len)
    }
}

impl AssetProbe for IndexedAssetProbe {
    fn exists(&self, subject_code: &str, file_name: &str) -> bool {
        self.files_by_subject
            .get(subject_code)
            .is_some_and(|files| files.contains(file_name))
    }
}

fn list_files(dir: &Path) -> HashSet<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return HashSet::new();
    };
    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{AssetProbe, FsAssetProbe, IndexedAssetProbe};
    use std::fs;

    #[test]
    fn probes_agree_on_present_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("PHY")).unwrap();
        fs::write(dir.path().join("PHY").join("PHY_w23_qp_12.pdf"), b"%PDF").unwrap();

        let direct = FsAssetProbe::new(dir.path());
        let indexed = IndexedAssetProbe::scan(dir.path(), ["PHY", "CHEM"]);

        for probe in [&direct as &dyn AssetProbe, &indexed as &dyn AssetProbe] {
            assert!(probe.exists("PHY", "PHY_w23_qp_12.pdf"));
            assert!(!probe.exists("PHY", "PHY_w23_ms_12.pdf"));
            assert!(!probe.exists("CHEM", "CHEM_w23_qp_12.pdf"));
        }
        assert_eq!(indexed.file_count("PHY"), 1);
        assert_eq!(indexed.file_count("CHEM"), 0);
    }

    #[test]
    fn directories_are_not_reported_as_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("PHY").join("PHY_s20_qp_11.pdf")).unwrap();

        assert!(!FsAssetProbe::new(dir.path()).exists("PHY", "PHY_s20_qp_11.pdf"));
        assert!(!IndexedAssetProbe::scan(dir.path(), ["PHY"]).exists("PHY", "PHY_s20_qp_11.pdf"));
    }
}

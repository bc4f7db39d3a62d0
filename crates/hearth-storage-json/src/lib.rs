//! hearth-storage-json
//!
//! Filesystem JSON ledger source: one snapshot file per household and month,
//! `<root>/<household>/<YYYY-MM>.json`.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use hearth_core::{CoreError, LedgerSnapshot, LedgerSource};
use hearth_domain::{MonthKey, TransactionEvent};

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// On-disk shape. Events stay raw so one bad record cannot sink the whole file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    #[serde(default)]
    opening_balance: Decimal,
    #[serde(default)]
    current_balance: Decimal,
    #[serde(default)]
    events: Vec<Value>,
}

/// Reads and writes month snapshots under a root directory.
#[derive(Debug, Clone)]
pub struct JsonLedgerSource {
    root: PathBuf,
}

impl JsonLedgerSource {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, household: &str, month: MonthKey) -> PathBuf {
        self.household_dir(household)
            .join(format!("{}.{}", month, SNAPSHOT_EXTENSION))
    }

    /// Writes a snapshot, replacing any previous file for the same month.
    pub fn save_month(&self, snapshot: &LedgerSnapshot) -> Result<PathBuf, CoreError> {
        let events = snapshot
            .events
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let file = SnapshotFile {
            opening_balance: snapshot.opening_balance,
            current_balance: snapshot.current_balance,
            events,
        };
        let json =
            serde_json::to_string_pretty(&file).map_err(|err| CoreError::Serde(err.to_string()))?;
        let path = self.snapshot_path(&snapshot.household, snapshot.month);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(path)
    }

    fn household_dir(&self, household: &str) -> PathBuf {
        self.root.join(canonical_name(household))
    }
}

impl LedgerSource for JsonLedgerSource {
    /// A month with no file is an empty ledger, not an error.
    fn load_month(&self, household: &str, month: MonthKey) -> Result<LedgerSnapshot, CoreError> {
        let path = self.snapshot_path(household, month);
        if !path.exists() {
            debug!(household, month = %month, "no snapshot on disk, using empty ledger");
            return Ok(LedgerSnapshot::empty(household, month));
        }
        let data = fs::read_to_string(&path)?;
        let file: SnapshotFile =
            serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;

        let mut events = Vec::with_capacity(file.events.len());
        let mut warnings = Vec::new();
        for (index, raw) in file.events.into_iter().enumerate() {
            match serde_json::from_value::<TransactionEvent>(raw) {
                Ok(event) => events.push(event),
                Err(err) => {
                    let message = format!("skipped event #{index} in {}: {err}", path.display());
                    warn!("{message}");
                    warnings.push(message);
                }
            }
        }

        Ok(LedgerSnapshot {
            household: household.to_string(),
            month,
            opening_balance: file.opening_balance,
            current_balance: file.current_balance,
            events,
            warnings,
        })
    }

    fn list_months(&self, household: &str) -> Result<Vec<MonthKey>, CoreError> {
        let dir = self.household_dir(household);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut months = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(month) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<MonthKey>().ok())
            {
                months.push(month);
            }
        }
        months.sort();
        Ok(months)
    }
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "household".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

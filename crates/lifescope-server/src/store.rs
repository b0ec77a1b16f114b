use anyhow::Context;
use protocol::api::HistoryEntry;
use protocol::{AssessmentInput, RiskResults, RiskTier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

const RECORD_SUFFIX: &str = ".assessment.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub(crate) struct AssessmentRecord {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    pub(crate) created_at_ms: u64,
    #[serde(flatten)]
    pub(crate) answers: AssessmentInput,
    pub(crate) risk_results: RiskResults,
}

impl AssessmentRecord {
    pub(crate) fn created_at(&self) -> String {
        format_timestamp(self.created_at_ms)
    }
}

/// What history needs from a record; the full record stays on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RecordSummary {
    id: u64,
    user_id: Option<String>,
    created_at_ms: u64,
    tiers: [RiskTier; 4],
}

impl RecordSummary {
    fn from_record(record: &AssessmentRecord) -> Self {
        let results = &record.risk_results;
        Self {
            id: record.id,
            user_id: record.user_id.clone(),
            created_at_ms: record.created_at_ms,
            tiers: [
                results.heart.tier,
                results.diabetes.tier,
                results.kidney.tier,
                results.obesity.tier,
            ],
        }
    }

    fn sort_key(&self) -> (u64, u64) {
        (self.created_at_ms, self.id)
    }

    fn history_entry(&self) -> HistoryEntry {
        let [heart_risk, diabetes_risk, kidney_risk, obesity_risk] = self.tiers;
        HistoryEntry {
            id: self.id,
            created_at: format_timestamp(self.created_at_ms),
            heart_risk,
            diabetes_risk,
            kidney_risk,
            obesity_risk,
        }
    }
}

/// Summaries ordered oldest first by creation time, then id.
struct StoreIndex {
    summaries: Vec<RecordSummary>,
    next_id: u64,
}

impl StoreIndex {
    fn push(&mut self, summary: RecordSummary) {
        let key = summary.sort_key();
        let pos = self.summaries.partition_point(|entry| entry.sort_key() <= key);
        self.summaries.insert(pos, summary);
    }
}

/// Assessments kept as one JSON file each under `dir`, indexed in memory.
pub(crate) struct AssessmentStore {
    dir: PathBuf,
    index: Mutex<StoreIndex>,
}

impl AssessmentStore {
    pub(crate) fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data dir {}", dir.display()))?;
        let loaded = load_summaries(&dir)?;
        tracing::info!(
            data_dir = %dir.display(),
            records = loaded.summaries.len(),
            next_id = loaded.next_id,
            "assessment store opened"
        );
        Ok(Self {
            dir,
            index: Mutex::new(loaded),
        })
    }

    pub(crate) async fn insert(
        &self,
        user_id: Option<String>,
        answers: AssessmentInput,
        risk_results: RiskResults,
    ) -> anyhow::Result<AssessmentRecord> {
        let mut index = self.index.lock().await;
        let record = AssessmentRecord {
            id: index.next_id,
            user_id,
            created_at_ms: system_time_ms(SystemTime::now()),
            answers,
            risk_results,
        };
        write_record(&self.dir, &record).await?;
        index.next_id += 1;
        index.push(RecordSummary::from_record(&record));
        Ok(record)
    }

    /// Newest records first, optionally restricted to one owner.
    pub(crate) async fn history(&self, user_id: Option<&str>, limit: usize) -> Vec<HistoryEntry> {
        let index = self.index.lock().await;
        index
            .summaries
            .iter()
            .rev()
            .filter(|summary| match user_id {
                Some(owner) => summary.user_id.as_deref() == Some(owner),
                None => true,
            })
            .take(limit)
            .map(RecordSummary::history_entry)
            .collect()
    }
}

/// Indexes every readable record. Ids are reserved for every record file
/// name, readable or not, so a damaged file is never overwritten.
fn load_summaries(dir: &Path) -> anyhow::Result<StoreIndex> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read data dir {}", dir.display()))?;
    let mut index = StoreIndex {
        summaries: Vec::new(),
        next_id: 1,
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read data directory entry");
                continue;
            }
        };
        let path = entry.path();
        if !is_record_file(&path) {
            continue;
        }
        if let Some(id) = record_file_id(&path) {
            index.next_id = index.next_id.max(id.saturating_add(1));
        }
        match read_json::<AssessmentRecord>(&path) {
            Ok(record) => {
                index.next_id = index.next_id.max(record.id.saturating_add(1));
                index.summaries.push(RecordSummary::from_record(&record));
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %path.display(),
                    "failed to read assessment record"
                );
            }
        }
    }
    index.summaries.sort_by_key(RecordSummary::sort_key);
    Ok(index)
}

async fn write_record(dir: &Path, record: &AssessmentRecord) -> anyhow::Result<()> {
    let path = dir.join(format!("{}{RECORD_SUFFIX}", record.id));
    let tmp = dir.join(format!("{}{RECORD_SUFFIX}.tmp", record.id));
    let payload = serde_json::to_vec_pretty(record)?;
    tokio::fs::write(&tmp, payload)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if let Err(err) = move_into_place(&tmp, &path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            tracing::warn!(
                error = %cleanup,
                path = %tmp.display(),
                "failed to remove temporary record"
            );
        }
        return Err(err);
    }
    Ok(())
}

async fn move_into_place(tmp: &Path, path: &Path) -> anyhow::Result<()> {
    if tokio::fs::try_exists(path).await? {
        anyhow::bail!("refusing to overwrite existing record {}", path.display());
    }
    tokio::fs::rename(tmp, path)
        .await
        .with_context(|| format!("failed to move record into {}", path.display()))?;
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
    let payload = fs::read(path)?;
    let record = serde_json::from_slice(&payload)?;
    Ok(record)
}

fn record_file_id(path: &Path) -> Option<u64> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(RECORD_SUFFIX))
        .and_then(|id| id.parse().ok())
}

fn is_record_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(RECORD_SUFFIX))
        .unwrap_or(false)
}

fn system_time_ms(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or(0)
}

pub(crate) fn format_timestamp(ms: u64) -> String {
    humantime::format_rfc3339_millis(UNIX_EPOCH + Duration::from_millis(ms)).to_string()
}

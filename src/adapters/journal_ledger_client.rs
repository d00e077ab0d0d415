//! Append-only vote journal acting as a local system of record.
//!
//! Each confirmed vote is one JSON line. The journal refuses a second entry
//! for the same `(proposal, voter)` pair. The duplicate check and the append
//! run under an exclusive advisory lock on the journal file, so separate
//! processes sharing one journal see each other's votes.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use sha2::{Digest, Sha256};

use crate::domain::{AppError, LedgerReceipt, ProposalId, Tally, VoteRecord};
use crate::ports::LedgerClient;

#[derive(Debug)]
pub struct JournalLedgerClient {
    path: PathBuf,
    baseline: HashMap<ProposalId, Tally>,
}

impl JournalLedgerClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), baseline: HashMap::new() }
    }

    /// Counters that predate the journal; `read_tallies` adds journal entries on top.
    pub fn with_baseline<I>(mut self, baseline: I) -> Self
    where
        I: IntoIterator<Item = (ProposalId, Tally)>,
    {
        self.baseline = baseline.into_iter().collect();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every journal entry in append order. A missing journal is empty.
    pub fn load_records(&self) -> Result<Vec<VoteRecord>, AppError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: VoteRecord =
                serde_json::from_str(&line).map_err(|e| AppError::ParseError {
                    what: format!("{} line {}", self.path.display(), number + 1),
                    details: e.to_string(),
                })?;
            records.push(record);
        }
        Ok(records)
    }

    fn open_for_append(&self) -> Result<File, AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new().create(true).append(true).open(&self.path)?)
    }
}

/// Content hash identifying a journal entry.
pub fn receipt_for(record: &VoteRecord) -> LedgerReceipt {
    let mut hasher = Sha256::new();
    hasher.update(record.proposal_id.as_bytes());
    hasher.update(b"|");
    hasher.update(record.voter_id.as_bytes());
    hasher.update(b"|");
    hasher.update(record.choice.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(record.recorded_at.to_rfc3339().as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    LedgerReceipt::new(format!("0x{}", hex))
}

impl LedgerClient for JournalLedgerClient {
    fn record_vote(&self, record: &VoteRecord) -> Result<LedgerReceipt, AppError> {
        let mut lock = RwLock::new(self.open_for_append()?);
        let mut guard = lock.write()?;

        let key = record.key();
        if self.load_records()?.iter().any(|existing| existing.key() == key) {
            return Err(AppError::LedgerApiError {
                message: format!(
                    "journal already holds a vote from {} on {}",
                    record.voter_id, record.proposal_id
                ),
                status: Some(409),
            });
        }

        let receipt = receipt_for(record);
        let line = serde_json::to_string(&record.clone().with_receipt(receipt.clone())).map_err(
            |e| AppError::ParseError { what: "vote record".to_string(), details: e.to_string() },
        )?;
        let file: &mut File = &mut guard;
        writeln!(file, "{}", line)?;
        file.sync_data()?;
        Ok(receipt)
    }

    fn read_tallies(&self, proposal_id: &ProposalId) -> Result<Tally, AppError> {
        let mut tally = self.baseline.get(proposal_id).copied().unwrap_or_default();
        for record in self.load_records()? {
            if &record.proposal_id == proposal_id {
                tally.record(record.choice);
            }
        }
        Ok(tally)
    }
}

//! Identifier allocation for workspace entities.
//!
//! Ids are opaque strings (`file_7`, `folder_3`) minted from per-kind
//! counters. Counters are part of the persisted snapshot so ids stay
//! unique across reloads and are never reused.

use compact_str::{format_compact, CompactString};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(CompactString);

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(CompactString);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FolderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
impl From<&str> for FileId {
    fn from(raw: &str) -> Self {
        Self(CompactString::from(raw))
    }
}

#[cfg(test)]
impl From<&str> for FolderId {
    fn from(raw: &str) -> Self {
        Self(CompactString::from(raw))
    }
}

const FILE_PREFIX: &str = "file_";
const FOLDER_PREFIX: &str = "folder_";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdAllocator {
    file_counter: u64,
    folder_counter: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counters(file_counter: u64, folder_counter: u64) -> Self {
        Self {
            file_counter,
            folder_counter,
        }
    }

    pub fn file_counter(&self) -> u64 {
        self.file_counter
    }

    pub fn folder_counter(&self) -> u64 {
        self.folder_counter
    }

    pub fn next_file(&mut self) -> FileId {
        self.file_counter += 1;
        FileId(format_compact!("{FILE_PREFIX}{}", self.file_counter))
    }

    pub fn next_folder(&mut self) -> FolderId {
        self.folder_counter += 1;
        FolderId(format_compact!("{FOLDER_PREFIX}{}", self.folder_counter))
    }

    /// Raise the counters above any numeric suffix already present in the
    /// given ids. Snapshots and backups carry their own counters, but a
    /// backup whose counter lags its maps would reissue live ids.
    pub fn reconcile<'a, F, D>(&mut self, files: F, folders: D)
    where
        F: Iterator<Item = &'a FileId>,
        D: Iterator<Item = &'a FolderId>,
    {
        for id in files {
            if let Some(n) = numeric_suffix(id.as_str(), FILE_PREFIX) {
                self.file_counter = self.file_counter.max(n);
            }
        }
        for id in folders {
            if let Some(n) = numeric_suffix(id.as_str(), FOLDER_PREFIX) {
                self.folder_counter = self.folder_counter.max(n);
            }
        }
    }
}

fn numeric_suffix(raw: &str, prefix: &str) -> Option<u64> {
    raw.strip_prefix(prefix)?.parse().ok()
}

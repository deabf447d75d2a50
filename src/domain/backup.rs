//! Backup document types
//!
//! These structs mirror the Mihon/Tachiyomi JSON backup import format
//! bit-exactly. `BackupEntry` is the normalized per-manga shape; the
//! remaining structs are fixed metadata attached to every backup.

use serde::{Deserialize, Serialize};

/// One normalized manga entry in the backup document.
///
/// Field names serialize in camelCase to match the reader's import schema.
/// `status` is 1 for ongoing titles, 0 for anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub source: String,
    pub url: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: Vec<String>,
    pub status: u8,
    pub thumbnail_url: String,
    pub date_added: String,
    pub chapters: Vec<serde_json::Value>,
    pub categories: Vec<String>,
    pub viewer_flags: i64,
    pub last_modified_at: String,
    pub favorite_modified_at: String,
}

/// A reader-side category the imported entries are filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupCategory {
    pub name: String,
    pub order: String,
    pub flags: String,
}

/// A source descriptor the reader uses to resolve entry URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSource {
    pub name: String,
    pub source_id: String,
}

/// An extension repository descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupExtensionRepo {
    pub base_url: String,
    pub name: String,
    pub website: String,
    pub signing_key_fingerprint: String,
}

/// The consolidated backup document.
///
/// Everything except `backup_manga` is static per-build metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub backup_manga: Vec<BackupEntry>,
    pub backup_categories: Vec<BackupCategory>,
    pub backup_sources: Vec<BackupSource>,
    pub backup_extension_repo: Vec<BackupExtensionRepo>,
}

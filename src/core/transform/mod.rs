//! Record-to-backup transformation
//!
//! Reshapes raw subscription records into the reader's backup import
//! format. The mapping is total: records with missing or oddly-typed
//! fields still produce an entry, falling back to empty strings rather
//! than dropping the record.

use crate::domain::{
    BackupCategory, BackupDocument, BackupEntry, BackupExtensionRepo, BackupSource, RawRecord,
};

/// Source id the reader associates with the DMZJ extension
pub const DMZJ_SOURCE_ID: &str = "2884190037559093788";

/// Status string the API uses for ongoing titles
const STATUS_ONGOING: &str = "连载中";

/// Placeholder author, filled in by the reader on first refresh
const PLACEHOLDER_AUTHOR: &str = "漫画作者";

/// Placeholder description, filled in by the reader on first refresh
const PLACEHOLDER_DESCRIPTION: &str = "（描述内容）";

/// Convert one raw subscription record into a backup entry.
///
/// The entry URL follows the extension's detail-endpoint convention,
/// keyed by the record's `id`. All three timestamp fields carry the
/// subscription time since the source exposes nothing finer-grained.
pub fn transform_record(record: &RawRecord) -> BackupEntry {
    let id = record.string_field("id").unwrap_or_default();
    let sub_uptime = record.string_field("sub_uptime").unwrap_or_default();

    BackupEntry {
        source: DMZJ_SOURCE_ID.to_string(),
        url: format!("/comic/comic_{id}.json?version=2.7.019"),
        title: record.str_field("name").unwrap_or_default().to_string(),
        author: PLACEHOLDER_AUTHOR.to_string(),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        genre: Vec::new(),
        status: if record.str_field("status") == Some(STATUS_ONGOING) {
            1
        } else {
            0
        },
        thumbnail_url: record.str_field("sub_img").unwrap_or_default().to_string(),
        date_added: sub_uptime.clone(),
        chapters: Vec::new(),
        categories: vec!["1".to_string()],
        viewer_flags: 0,
        last_modified_at: sub_uptime.clone(),
        favorite_modified_at: sub_uptime,
    }
}

/// Assemble the full backup document around the transformed entries.
///
/// Categories, sources, and the extension repo are fixed metadata; only
/// `backup_manga` varies between runs.
pub fn assemble_backup(entries: Vec<BackupEntry>) -> BackupDocument {
    BackupDocument {
        backup_manga: entries,
        backup_categories: vec![BackupCategory {
            name: "动漫之家".to_string(),
            order: "1".to_string(),
            flags: "4".to_string(),
        }],
        backup_sources: vec![
            BackupSource {
                name: "本地图源".to_string(),
                source_id: "0".to_string(),
            },
            BackupSource {
                name: "动漫之家".to_string(),
                source_id: DMZJ_SOURCE_ID.to_string(),
            },
        ],
        backup_extension_repo: vec![BackupExtensionRepo {
            base_url: "https://raw.githubusercontent.com/keiyoushi/extensions/repo".to_string(),
            name: "Keiyoushi".to_string(),
            website: "https://keiyoushi.github.io".to_string(),
            signing_key_fingerprint:
                "9add655a78e96c4ec7a53ef89dccb557cb5d767489fac5e785d671a5a75d4da2".to_string(),
        }],
    }
}

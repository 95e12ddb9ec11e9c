//! Check-in photo storage.
//!
//! Attendance marks arrive with the photo inline as a base64 data URL. This
//! module decodes that payload, writes it under the configured storage root,
//! and hands back the public URL that gets persisted on the ledger row. The
//! ledger itself never stores image bytes.
//!
//! Files are laid out as `{storage_root}/attendance/{YYYY-MM-DD}/{filename}`,
//! mirroring the `{date}/{filename}` key in the public URL.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{NaiveDate, Utc};
use db::error::DomainError;
use std::fs;
use std::path::PathBuf;
use util::paths::{attendance_dir, attendance_photo_path, ensure_parent_dir};

/// Route prefix under which stored photos are served back to clients.
pub const PHOTO_URL_PREFIX: &str = "/api/attendance/photos";

/// Service for storing and resolving check-in photos.
pub struct PhotoStorage;

impl PhotoStorage {
    /// Decodes an inline base64 photo (with or without a `data:image/...;base64,`
    /// prefix) and writes it to disk.
    ///
    /// Returns the public URL of the stored file, e.g.
    /// `/api/attendance/photos/2026-08-22/member_3_1755861234567.jpg`.
    pub fn save(
        date: NaiveDate,
        committee_member_id: i64,
        photo_data: &str,
    ) -> Result<String, DomainError> {
        let encoded = photo_data
            .split_once("base64,")
            .map(|(_, rest)| rest)
            .unwrap_or(photo_data);

        let bytes = BASE64.decode(encoded.trim()).map_err(|_| {
            DomainError::ValidationError("photo_data is not valid base64".to_string())
        })?;
        if bytes.is_empty() {
            return Err(DomainError::ValidationError(
                "photo_data decoded to an empty image".to_string(),
            ));
        }

        let filename = format!(
            "member_{}_{}.jpg",
            committee_member_id,
            Utc::now().timestamp_millis()
        );
        let path = attendance_photo_path(date, &filename);
        ensure_parent_dir(&path)?;
        fs::write(&path, &bytes)?;

        Ok(format!(
            "{}/{}/{}",
            PHOTO_URL_PREFIX,
            date.format("%Y-%m-%d"),
            filename
        ))
    }

    /// Resolves a public photo key (`{date}/{filename}`) to its on-disk path.
    ///
    /// Rejects anything that could escape the attendance directory; the key
    /// comes straight from the request path.
    pub fn resolve(key: &str) -> Option<PathBuf> {
        if key.is_empty() || key.starts_with('/') || key.contains("..") || key.contains('\\') {
            return None;
        }
        Some(attendance_dir().join(key))
    }

    /// Best-effort removal of a previously stored photo, given its public URL.
    ///
    /// Called when a re-mark replaces or drops the photo. A URL outside our
    /// prefix or an already-missing file is ignored.
    pub fn remove(photo_url: &str) {
        let Some(key) = photo_url
            .strip_prefix(PHOTO_URL_PREFIX)
            .map(|k| k.trim_start_matches('/'))
        else {
            return;
        };
        let Some(path) = Self::resolve(key) else {
            return;
        };
        if let Err(err) = fs::remove_file(&path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %err, path = %path.display(), "Could not remove replaced photo");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serial_test::serial;
    use util::test_helpers::setup_test_storage_root;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    #[serial]
    fn saves_a_data_url_and_returns_a_servable_key() {
        let _root = setup_test_storage_root();

        let data_url = format!("data:image/jpeg;base64,{}", BASE64.encode(b"jpegbytes"));
        let url = PhotoStorage::save(date(), 7, &data_url).unwrap();

        assert!(url.starts_with("/api/attendance/photos/2026-03-14/member_7_"));
        let key = url.strip_prefix("/api/attendance/photos/").unwrap();
        let path = PhotoStorage::resolve(key).unwrap();
        assert_eq!(fs::read(path).unwrap(), b"jpegbytes");
    }

    #[test]
    #[serial]
    fn bare_base64_without_a_data_url_prefix_is_accepted() {
        let _root = setup_test_storage_root();

        let url = PhotoStorage::save(date(), 1, &BASE64.encode(b"x")).unwrap();
        let key = url.strip_prefix("/api/attendance/photos/").unwrap();
        assert!(PhotoStorage::resolve(key).unwrap().exists());
    }

    #[test]
    #[serial]
    fn garbage_payloads_are_rejected_as_validation_errors() {
        let _root = setup_test_storage_root();

        let err = PhotoStorage::save(date(), 1, "not base64 at all!!!").unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn traversal_keys_do_not_resolve() {
        assert!(PhotoStorage::resolve("../../etc/passwd").is_none());
        assert!(PhotoStorage::resolve("/absolute").is_none());
        assert!(PhotoStorage::resolve("").is_none());
    }

    #[test]
    #[serial]
    fn remove_deletes_the_stored_file() {
        let _root = setup_test_storage_root();

        let url = PhotoStorage::save(date(), 2, &BASE64.encode(b"y")).unwrap();
        let key = url.strip_prefix("/api/attendance/photos/").unwrap();
        let path = PhotoStorage::resolve(key).unwrap();
        assert!(path.exists());

        PhotoStorage::remove(&url);
        assert!(!path.exists());

        // A second removal or a foreign URL is a no-op.
        PhotoStorage::remove(&url);
        PhotoStorage::remove("https://elsewhere.example/p.jpg");
    }
}

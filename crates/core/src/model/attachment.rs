use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::{FileId, MeetingId};

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttachmentError {
    #[error("file name cannot be empty")]
    EmptyFileName,

    #[error("meeting title cannot be empty")]
    EmptyMeetingTitle,

    #[error("meeting url is not a valid http(s) link: {0}")]
    InvalidMeetingUrl(String),
}

//
// ─── FILES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Document,
    Image,
    Video,
}

impl FileKind {
    /// Guess the kind from a file name extension. Unknown extensions are documents.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" | "heic" => FileKind::Image,
            "mp4" | "mov" | "avi" | "webm" | "mkv" => FileKind::Video,
            _ => FileKind::Document,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FileKind::Document => "document",
            FileKind::Image => "image",
            FileKind::Video => "video",
        }
    }
}

/// Which side of the portal uploaded a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uploader {
    Client,
    Admin,
}

/// Inert metadata for an uploaded file. No bytes are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub kind: FileKind,
    pub uploaded_by: Uploader,
    pub uploaded_at: NaiveDate,
    pub size_bytes: u64,
}

impl UploadedFile {
    /// Build a file record from user-provided metadata.
    ///
    /// # Errors
    ///
    /// Returns `AttachmentError::EmptyFileName` if the name is blank.
    pub fn new(
        id: FileId,
        name: impl Into<String>,
        kind: FileKind,
        uploaded_by: Uploader,
        uploaded_at: NaiveDate,
        size_bytes: u64,
    ) -> Result<Self, AttachmentError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(AttachmentError::EmptyFileName);
        }
        Ok(Self {
            id,
            name,
            kind,
            uploaded_by,
            uploaded_at,
            size_bytes,
        })
    }
}

//
// ─── MEETINGS ──────────────────────────────────────────────────────────────────
//

/// A scheduled video call the client can join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingLink {
    pub id: MeetingId,
    pub title: String,
    pub url: Url,
    pub scheduled_for: NaiveDateTime,
}

impl MeetingLink {
    /// # Errors
    ///
    /// Returns `AttachmentError::EmptyMeetingTitle` for a blank title and
    /// `AttachmentError::InvalidMeetingUrl` unless the url parses as http or https.
    pub fn new(
        id: MeetingId,
        title: impl Into<String>,
        url: &str,
        scheduled_for: NaiveDateTime,
    ) -> Result<Self, AttachmentError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(AttachmentError::EmptyMeetingTitle);
        }
        let raw = url.trim();
        let url = Url::parse(raw)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| AttachmentError::InvalidMeetingUrl(raw.to_owned()))?;
        Ok(Self {
            id,
            title,
            url,
            scheduled_for,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 25)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    #[test]
    fn kind_is_inferred_from_extension() {
        assert_eq!(FileKind::from_file_name("kitchen_before.JPG"), FileKind::Image);
        assert_eq!(FileKind::from_file_name("walkthrough.mp4"), FileKind::Video);
        assert_eq!(FileKind::from_file_name("contract.pdf"), FileKind::Document);
        assert_eq!(FileKind::from_file_name("README"), FileKind::Document);
    }

    #[test]
    fn file_name_is_trimmed_and_required() {
        let date = at().date();
        let file = UploadedFile::new(
            FileId::new("f1"),
            "  notes.pdf ",
            FileKind::Document,
            Uploader::Client,
            date,
            10,
        )
        .unwrap();
        assert_eq!(file.name, "notes.pdf");

        let err = UploadedFile::new(
            FileId::new("f2"),
            "  ",
            FileKind::Document,
            Uploader::Client,
            date,
            10,
        )
        .unwrap_err();
        assert_eq!(err, AttachmentError::EmptyFileName);
    }

    #[test]
    fn meeting_requires_http_url() {
        let ok = MeetingLink::new(MeetingId::new("m1"), "Kickoff", "https://zoom.us/j/1", at());
        assert!(ok.is_ok());

        let err = MeetingLink::new(MeetingId::new("m2"), "Kickoff", "ftp://host/x", at())
            .unwrap_err();
        assert!(matches!(err, AttachmentError::InvalidMeetingUrl(_)));

        let err = MeetingLink::new(MeetingId::new("m3"), " ", "https://zoom.us", at()).unwrap_err();
        assert_eq!(err, AttachmentError::EmptyMeetingTitle);
    }
}

//! Demo data set used by the in-memory backend and the `seed` binary.

use chrono::{NaiveDate, NaiveDateTime};
use portal_core::model::{
    AttachmentError, Client, ClientId, FileId, FileKind, FinalRecordStatus, MeetingId,
    MeetingLink, ModuleKey, ModuleSet, Phase, ProductType, UploadedFile, Uploader,
};
use portal_core::template::{create_phases_from_templates, default_phase_templates};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MockDataError {
    #[error("invalid sample date {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error(transparent)]
    Attachment(#[from] AttachmentError),
}

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Three sample clients covering both products and three record states.
///
/// # Errors
///
/// Returns `MockDataError` if a sample date or attachment is malformed.
pub fn mock_clients() -> Result<Vec<Client>, MockDataError> {
    Ok(vec![sarah()?, michael()?, emily()?])
}

/// Every template cloned, with the first two steps of vetting and review done.
fn standard_phases() -> Vec<Phase> {
    let mut phases =
        create_phases_from_templates(ProductType::Zeus, &ModuleSet::new(), &default_phase_templates());
    for phase in phases.iter_mut().take(2) {
        for step in phase.steps.iter_mut().take(2) {
            step.completed = true;
        }
    }
    phases
}

fn sarah() -> Result<Client, MockDataError> {
    let client_files = vec![
        file("f1", "contract_draft.pdf", Uploader::Client, (2026, 1, 15), 24 * MB / 10)?,
        file("f2", "kitchen_before.jpg", Uploader::Client, (2026, 1, 18), 31 * MB / 10)?,
        file("f3", "walkthrough_video.mp4", Uploader::Client, (2026, 1, 20), 452 * MB / 10)?,
    ];
    let admin_files = vec![
        file("af1", "contractor_analysis.pdf", Uploader::Admin, (2026, 1, 17), 18 * MB / 10)?,
        file("af2", "scope_review_annotated.pdf", Uploader::Admin, (2026, 1, 22), 32 * MB / 10)?,
    ];
    let meeting_links = vec![
        meeting("m1", "Initial Consultation", "https://zoom.us/j/123456789", (2026, 1, 25), (14, 0))?,
        meeting(
            "m2",
            "Contract Review Call",
            "https://meet.google.com/abc-defg-hij",
            (2026, 1, 28),
            (10, 0),
        )?,
    ];

    Ok(Client {
        id: ClientId::new("client1"),
        name: "Sarah Johnson".into(),
        email: "sarah.johnson@email.com".into(),
        product: ProductType::Zeus,
        hestia_modules: ModuleSet::new(),
        progress: 0,
        phases: standard_phases(),
        client_files,
        admin_files,
        meeting_links,
        final_record_status: FinalRecordStatus::NotRequested,
    }
    .with_recomputed_progress())
}

fn michael() -> Result<Client, MockDataError> {
    let client_files = vec![
        file("f4", "bid_comparison.xlsx", Uploader::Client, (2026, 1, 10), 856 * KB)?,
        file("f5", "contractor_license.pdf", Uploader::Client, (2026, 1, 12), 12 * MB / 10)?,
    ];
    let admin_files = vec![file(
        "af3",
        "vetting_report.pdf",
        Uploader::Admin,
        (2026, 1, 14),
        21 * MB / 10,
    )?];
    let meeting_links = vec![meeting(
        "m3",
        "Vetting Results Review",
        "https://zoom.us/j/987654321",
        (2026, 1, 30),
        (15, 0),
    )?];

    Ok(Client {
        id: ClientId::new("client2"),
        name: "Michael Chen".into(),
        email: "michael.chen@email.com".into(),
        product: ProductType::Hestia,
        hestia_modules: ModuleSet::from([ModuleKey::Vetting, ModuleKey::Review]),
        progress: 0,
        phases: standard_phases(),
        client_files,
        admin_files,
        meeting_links,
        final_record_status: FinalRecordStatus::Requested,
    }
    .with_recomputed_progress())
}

fn emily() -> Result<Client, MockDataError> {
    let mut phases = standard_phases();
    let last = phases.len().saturating_sub(1);
    for (idx, phase) in phases.iter_mut().enumerate() {
        for (step_idx, step) in phase.steps.iter_mut().enumerate() {
            step.completed = idx < last || step_idx < 2;
        }
    }

    let client_files = vec![
        file("f6", "final_contract.pdf", Uploader::Client, (2025, 12, 1), 45 * MB / 10)?,
        file("f7", "renovation_complete.jpg", Uploader::Client, (2026, 1, 24), 52 * MB / 10)?,
    ];
    let admin_files = vec![
        file("af4", "full_project_analysis.pdf", Uploader::Admin, (2026, 1, 20), 87 * MB / 10)?,
        file("af5", "warranty_documentation.pdf", Uploader::Admin, (2026, 1, 23), 23 * MB / 10)?,
    ];
    let meeting_links = vec![meeting(
        "m4",
        "Final Walkthrough",
        "https://zoom.us/j/456789123",
        (2026, 2, 1),
        (11, 0),
    )?];

    Ok(Client {
        id: ClientId::new("client3"),
        name: "Emily Rodriguez".into(),
        email: "emily.rodriguez@email.com".into(),
        product: ProductType::Zeus,
        hestia_modules: ModuleSet::new(),
        progress: 0,
        phases,
        client_files,
        admin_files,
        meeting_links,
        final_record_status: FinalRecordStatus::Generated,
    }
    .with_recomputed_progress())
}

fn date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, MockDataError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(MockDataError::InvalidDate { year, month, day })
}

fn file(
    id: &str,
    name: &str,
    uploaded_by: Uploader,
    on: (i32, u32, u32),
    size_bytes: u64,
) -> Result<UploadedFile, MockDataError> {
    Ok(UploadedFile::new(
        FileId::new(id),
        name,
        FileKind::from_file_name(name),
        uploaded_by,
        date(on)?,
        size_bytes,
    )?)
}

fn meeting(
    id: &str,
    title: &str,
    url: &str,
    on: (i32, u32, u32),
    (hour, minute): (u32, u32),
) -> Result<MeetingLink, MockDataError> {
    let day = date(on)?;
    let at: NaiveDateTime = day.and_hms_opt(hour, minute, 0).ok_or(MockDataError::InvalidDate {
        year: on.0,
        month: on.1,
        day: on.2,
    })?;
    Ok(MeetingLink::new(MeetingId::new(id), title, url, at)?)
}

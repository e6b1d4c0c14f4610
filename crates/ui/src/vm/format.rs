use chrono::{NaiveDate, NaiveDateTime};
use portal_core::model::{FileKind, FinalRecordStatus, ModuleSet};

/// Stroke length of the dashboard progress ring (`2 * pi * 42`, rounded).
pub const RING_CIRCUMFERENCE: f64 = 264.0;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

#[must_use]
pub fn file_icon(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Document => "📄",
        FileKind::Image => "🖼️",
        FileKind::Video => "🎬",
    }
}

#[must_use]
pub fn status_color(status: FinalRecordStatus) -> &'static str {
    match status {
        FinalRecordStatus::NotRequested => "#6b7280",
        FinalRecordStatus::Requested => "#f59e0b",
        FinalRecordStatus::Generated => "#10b981",
        FinalRecordStatus::Delivered => "#3b82f6",
    }
}

/// "2.4 MB", "856 KB" or "12 B".
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes >= MB {
        // Whole tenths of a megabyte, rounded half up.
        let tenths = (u128::from(bytes) * 10 + u128::from(MB / 2)) / u128::from(MB);
        format!("{}.{} MB", tenths / 10, tenths % 10)
    } else if bytes >= KB {
        format!("{} KB", (bytes + KB / 2) / KB)
    } else {
        format!("{bytes} B")
    }
}

/// "Jan 25, 2026 at 2:00 PM".
#[must_use]
pub fn format_meeting_time(at: NaiveDateTime) -> String {
    at.format("%b %-d, %Y at %-I:%M %p").to_string()
}

#[must_use]
pub fn format_upload_date(on: NaiveDate) -> String {
    on.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Comma-separated display names, or `empty` when the set has none.
#[must_use]
pub fn module_names(modules: &ModuleSet, empty: &str) -> String {
    if modules.is_empty() {
        return empty.to_owned();
    }
    modules
        .iter()
        .map(|module| module.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Dash offset that leaves `percent` of the ring stroked.
#[must_use]
pub fn ring_offset(percent: u8) -> f64 {
    let percent = f64::from(percent.min(100));
    RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * percent / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::ModuleKey;

    #[test]
    fn sizes_pick_a_sensible_unit() {
        assert_eq!(format_file_size(24 * MB / 10), "2.4 MB");
        assert_eq!(format_file_size(856 * KB), "856 KB");
        assert_eq!(format_file_size(452 * MB / 10), "45.2 MB");
        assert_eq!(format_file_size(300), "300 B");
    }

    #[test]
    fn largest_recordable_size_still_formats() {
        assert_eq!(format_file_size(u64::MAX), "17592186044416.0 MB");
        assert_eq!(
            format_file_size(18_014_398_509_481_983u64.saturating_mul(1024)),
            "17592186044416.0 MB"
        );
    }

    #[test]
    fn meeting_time_reads_like_a_calendar_entry() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 25)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        assert_eq!(format_meeting_time(at), "Jan 25, 2026 at 2:00 PM");
        assert_eq!(format_upload_date(at.date()), "Jan 25, 2026");
    }

    #[test]
    fn ring_is_empty_at_zero_and_full_at_hundred() {
        assert!((ring_offset(0) - RING_CIRCUMFERENCE).abs() < f64::EPSILON);
        assert!(ring_offset(100).abs() < f64::EPSILON);
        assert!((ring_offset(25) - 198.0).abs() < 1e-9);
    }

    #[test]
    fn module_names_fall_back_when_empty() {
        let modules = ModuleSet::from([ModuleKey::Design, ModuleKey::Vetting]);
        assert_eq!(module_names(&modules, "-"), "Vetting, Design & Material");
        assert_eq!(
            module_names(&ModuleSet::new(), "All modules (ZEUS)"),
            "All modules (ZEUS)"
        );
    }

    #[test]
    fn capitalize_handles_empty_and_words() {
        assert_eq!(capitalize("design"), "Design");
        assert_eq!(capitalize(""), "");
    }
}

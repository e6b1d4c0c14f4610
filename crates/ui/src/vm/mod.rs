mod format;
mod phase_vm;

pub use format::{
    RING_CIRCUMFERENCE, capitalize, file_icon, format_file_size, format_meeting_time,
    format_upload_date, module_names, ring_offset, status_color,
};
pub use phase_vm::{ClientRowVm, PhaseRowVm, StepRowVm, map_client_rows, map_phase_rows};

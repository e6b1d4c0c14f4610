mod icons;
mod modal;

pub use icons::{
    CalendarIcon, CheckCircleIcon, CheckIcon, ClockIcon, DocumentIcon, DownloadIcon,
    SettingsIcon, ShieldIcon, TrashIcon, UploadIcon, UserIcon,
};
pub use modal::{ConfirmDialog, Modal, UploadModal, UploadRequest};

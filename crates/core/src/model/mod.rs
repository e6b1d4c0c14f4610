mod attachment;
mod client;
mod ids;
mod module;
mod phase;
mod product;

pub use attachment::{AttachmentError, FileKind, MeetingLink, UploadedFile, Uploader};
pub use client::{Client, ClientDraft, ClientError, ValidatedClient};
pub use ids::{ClientId, FileId, MeetingId, ParseIdError, PhaseId, StepId};
pub use module::{ModuleError, ModuleKey, ModuleSet};
pub use phase::{Phase, PhaseTemplate, Step, StepTemplate};
pub use product::{FinalRecordStatus, ProductType};

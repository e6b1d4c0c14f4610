use thiserror::Error;

use crate::model::{AttachmentError, ClientError, ModuleError};
use crate::template::TemplateError;

/// Any validation failure raised by the domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    Module(#[from] ModuleError),
}

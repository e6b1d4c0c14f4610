use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::attachment::{MeetingLink, UploadedFile, Uploader};
use crate::model::ids::{ClientId, FileId, MeetingId, PhaseId};
use crate::model::module::ModuleSet;
use crate::model::phase::{Phase, PhaseTemplate};
use crate::model::product::{FinalRecordStatus, ProductType};
use crate::progress::progress_percent;
use crate::template::create_phases_from_templates;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientError {
    #[error("client name cannot be empty")]
    EmptyName,

    #[error("client email cannot be empty")]
    EmptyEmail,

    #[error("HESTIA clients need at least one module")]
    NoModulesSelected,
}

//
// ─── CLIENT ────────────────────────────────────────────────────────────────────
//

/// A portal account and its private copy of the service process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub product: ProductType,
    /// Purchased modules. Always empty for ZEUS.
    #[serde(default)]
    pub hestia_modules: ModuleSet,
    /// Cached `progress_percent(&phases)`; rewritten by every step toggle.
    pub progress: u8,
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub client_files: Vec<UploadedFile>,
    #[serde(default)]
    pub admin_files: Vec<UploadedFile>,
    #[serde(default)]
    pub meeting_links: Vec<MeetingLink>,
    #[serde(default)]
    pub final_record_status: FinalRecordStatus,
}

impl Client {
    #[must_use]
    pub fn phase(&self, id: &PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|phase| &phase.id == id)
    }

    /// First word of the display name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Up to two uppercase initials for avatars.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Case-insensitive match on name or email. A blank query matches everything.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.email.to_lowercase().contains(&query)
    }

    /// Recompute the cached progress from the full phase set.
    #[must_use]
    pub fn with_recomputed_progress(mut self) -> Self {
        self.progress = progress_percent(&self.phases);
        self
    }

    /// Client-side request for the Final Project Record.
    #[must_use]
    pub fn request_final_record(&self) -> Self {
        self.with_final_record_status(FinalRecordStatus::Requested)
    }

    /// Single-field status write. Ordering is not enforced here.
    #[must_use]
    pub fn with_final_record_status(&self, status: FinalRecordStatus) -> Self {
        Self {
            final_record_status: status,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_meeting_link(&self, link: MeetingLink) -> Self {
        let mut next = self.clone();
        next.meeting_links.push(link);
        next
    }

    #[must_use]
    pub fn without_meeting_link(&self, id: &MeetingId) -> Self {
        let mut next = self.clone();
        next.meeting_links.retain(|link| &link.id != id);
        next
    }

    /// Append a file to the list matching its uploader.
    #[must_use]
    pub fn with_file(&self, file: UploadedFile) -> Self {
        let mut next = self.clone();
        match file.uploaded_by {
            Uploader::Client => next.client_files.push(file),
            Uploader::Admin => next.admin_files.push(file),
        }
        next
    }

    #[must_use]
    pub fn without_file(&self, id: &FileId) -> Self {
        let mut next = self.clone();
        next.client_files.retain(|file| &file.id != id);
        next.admin_files.retain(|file| &file.id != id);
        next
    }
}

//
// ─── CREATION ──────────────────────────────────────────────────────────────────
//

/// Raw input from the new-client form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub product: ProductType,
    pub modules: ModuleSet,
}

impl ClientDraft {
    /// Check the creation preconditions without building a client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::EmptyName` / `ClientError::EmptyEmail` for blank fields
    /// and `ClientError::NoModulesSelected` for a HESTIA draft without modules.
    pub fn validate(&self) -> Result<ValidatedClient, ClientError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ClientError::EmptyName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ClientError::EmptyEmail);
        }
        let modules = match self.product {
            ProductType::Zeus => ModuleSet::new(),
            ProductType::Hestia if self.modules.is_empty() => {
                return Err(ClientError::NoModulesSelected);
            }
            ProductType::Hestia => self.modules.clone(),
        };
        Ok(ValidatedClient {
            name: name.to_owned(),
            email: email.to_owned(),
            product: self.product,
            modules,
        })
    }

    /// True when the create action may be dispatched.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A draft that passed validation; only this can become a `Client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedClient {
    name: String,
    email: String,
    product: ProductType,
    modules: ModuleSet,
}

impl ValidatedClient {
    /// Clone the current templates into a brand-new client.
    #[must_use]
    pub fn assign_id(self, id: ClientId, templates: &[PhaseTemplate]) -> Client {
        let phases = create_phases_from_templates(self.product, &self.modules, templates);
        Client {
            id,
            name: self.name,
            email: self.email,
            product: self.product,
            hestia_modules: self.modules,
            progress: 0,
            phases,
            client_files: Vec::new(),
            admin_files: Vec::new(),
            meeting_links: Vec::new(),
            final_record_status: FinalRecordStatus::NotRequested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleKey;
    use crate::template::default_phase_templates;

    fn draft(product: ProductType, modules: ModuleSet) -> ClientDraft {
        ClientDraft {
            name: "  John Smith ".into(),
            email: " john.smith@email.com".into(),
            product,
            modules,
        }
    }

    #[test]
    fn hestia_without_modules_is_rejected() {
        let err = draft(ProductType::Hestia, ModuleSet::new())
            .validate()
            .unwrap_err();
        assert_eq!(err, ClientError::NoModulesSelected);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut d = draft(ProductType::Zeus, ModuleSet::new());
        d.name = "   ".into();
        assert_eq!(d.validate().unwrap_err(), ClientError::EmptyName);
        d.name = "Ann".into();
        d.email = String::new();
        assert_eq!(d.validate().unwrap_err(), ClientError::EmptyEmail);
        assert!(!d.is_submittable());
    }

    #[test]
    fn zeus_draft_drops_modules_and_clones_every_template() {
        let templates = default_phase_templates();
        let client = draft(ProductType::Zeus, ModuleSet::from([ModuleKey::Design]))
            .validate()
            .unwrap()
            .assign_id(ClientId::new("c1"), &templates);

        assert_eq!(client.name, "John Smith");
        assert_eq!(client.email, "john.smith@email.com");
        assert!(client.hestia_modules.is_empty());
        assert_eq!(client.phases.len(), templates.len());
        assert_eq!(client.progress, 0);
        assert_eq!(client.final_record_status, FinalRecordStatus::NotRequested);
    }

    #[test]
    fn initials_and_search() {
        let client = draft(ProductType::Zeus, ModuleSet::new())
            .validate()
            .unwrap()
            .assign_id(ClientId::new("c1"), &[]);
        assert_eq!(client.initials(), "JS");
        assert_eq!(client.first_name(), "John");
        assert!(client.matches_search("SMITH"));
        assert!(client.matches_search("john.smith@"));
        assert!(client.matches_search("  "));
        assert!(!client.matches_search("emily"));
    }

    #[test]
    fn status_write_is_permissive() {
        let client = draft(ProductType::Zeus, ModuleSet::new())
            .validate()
            .unwrap()
            .assign_id(ClientId::new("c1"), &[]);
        let delivered = client.with_final_record_status(FinalRecordStatus::Delivered);
        assert_eq!(delivered.final_record_status, FinalRecordStatus::Delivered);
        assert_eq!(client.final_record_status, FinalRecordStatus::NotRequested);
    }
}

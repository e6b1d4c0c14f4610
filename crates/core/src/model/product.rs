use serde::{Deserialize, Serialize};

/// Product tier purchased by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    /// Full bundle: every phase is visible.
    #[default]
    Zeus,
    /// A la carte: only phases matching the purchased modules are visible.
    Hestia,
}

impl ProductType {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ProductType::Zeus => "ZEUS",
            ProductType::Hestia => "HESTIA",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProductType::Zeus => "ZEUS Full Bundle",
            ProductType::Hestia => "HESTIA A La Carte",
        }
    }

    #[must_use]
    pub fn tagline(self) -> &'static str {
        match self {
            ProductType::Zeus => "Full Bundle - All modules included",
            ProductType::Hestia => "A La Carte - Select specific modules",
        }
    }

    /// Lowercase token used for CSS hooks.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ProductType::Zeus => "zeus",
            ProductType::Hestia => "hestia",
        }
    }
}

/// Lifecycle of the client-requestable Final Project Record.
///
/// Transitions are manual (client requests, admin generates, admin delivers).
/// Writes are not guarded; see [`FinalRecordStatus::can_advance_to`] for the
/// forward-only ordering the UI follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalRecordStatus {
    #[default]
    NotRequested,
    Requested,
    Generated,
    Delivered,
}

impl FinalRecordStatus {
    pub const ALL: [FinalRecordStatus; 4] = [
        FinalRecordStatus::NotRequested,
        FinalRecordStatus::Requested,
        FinalRecordStatus::Generated,
        FinalRecordStatus::Delivered,
    ];

    /// Persisted key, also used as a CSS class.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FinalRecordStatus::NotRequested => "not_requested",
            FinalRecordStatus::Requested => "requested",
            FinalRecordStatus::Generated => "generated",
            FinalRecordStatus::Delivered => "delivered",
        }
    }

    /// Client-facing wording.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FinalRecordStatus::NotRequested => "Not Requested",
            FinalRecordStatus::Requested => "Requested - Pending",
            FinalRecordStatus::Generated => "Ready for Download",
            FinalRecordStatus::Delivered => "Delivered",
        }
    }

    /// Admin badge wording.
    #[must_use]
    pub fn admin_label(self) -> String {
        self.key().replace('_', " ").to_uppercase()
    }

    /// The forward successor, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            FinalRecordStatus::NotRequested => Some(FinalRecordStatus::Requested),
            FinalRecordStatus::Requested => Some(FinalRecordStatus::Generated),
            FinalRecordStatus::Generated => Some(FinalRecordStatus::Delivered),
            FinalRecordStatus::Delivered => None,
        }
    }

    /// True when `target` is the immediate forward successor.
    #[must_use]
    pub fn can_advance_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

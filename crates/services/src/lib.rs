#![forbid(unsafe_code)]

pub mod app_services;
pub mod client_service;
pub mod error;
pub mod session;
pub mod template_service;

pub use portal_core::Clock;

pub use app_services::AppServices;
pub use client_service::ClientService;
pub use error::{AppServicesError, ClientServiceError, SessionError, TemplateServiceError};
pub use session::{Role, Session, SessionService};
pub use template_service::{TemplateEdit, TemplateService};

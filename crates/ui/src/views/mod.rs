mod actions;
mod admin;
mod client_dashboard;
mod login;
mod state;
mod templates;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use client_dashboard::ClientDashboardView;
pub use login::LoginView;
pub use state::{ViewError, ViewState, view_state_from_resource};

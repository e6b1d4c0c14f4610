use dioxus::prelude::*;
use dioxus_router::Routable;

use crate::views::{AdminView, ClientDashboardView, LoginView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[route("/client", ClientDashboardView)] Client {},
    #[route("/admin", AdminView)] Admin {},
}

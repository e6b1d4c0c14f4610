mod client_detail;
mod client_list;
mod description_modal;
mod meeting_modal;
mod new_client;

use dioxus::prelude::*;
use dioxus_router::navigator;
use portal_core::model::{Client, ClientId};

use crate::components::{ShieldIcon, UserIcon};
use crate::context::{AppContext, use_session};
use crate::routes::Route;
use crate::views::client_dashboard::SignedOut;
use crate::views::templates::TemplateManager;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ClientRowVm, map_client_rows};

use client_detail::ClientDetail;
use client_list::ClientSidebar;
use new_client::NewClientModal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdminTab {
    Clients,
    Templates,
}

#[component]
pub fn AdminView() -> Element {
    let session = use_session();
    let is_admin = session.current().is_some_and(|current| current.is_admin());

    if !is_admin {
        return rsx! { SignedOut {} };
    }
    rsx! { AdminPanel {} }
}

#[component]
fn AdminPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();
    let nav = navigator();
    let mut tab = use_signal(|| AdminTab::Clients);

    let sessions = ctx.sessions();
    let logout = move |_| {
        if let Some(ended) = session.sign_out() {
            sessions.logout(ended);
        }
        nav.push(Route::Login {});
    };

    let tab_class = move |which: AdminTab| {
        if tab() == which { "nav-tab active" } else { "nav-tab" }
    };

    rsx! {
        div { class: "dashboard admin-dashboard",
            header { class: "dashboard-header admin-header",
                div { class: "header-left",
                    div { class: "logo-small",
                        ShieldIcon { class: "logo-icon" }
                        span { "Aegis Shield Admin" }
                    }
                    nav { class: "admin-nav",
                        button {
                            class: tab_class(AdminTab::Clients),
                            r#type: "button",
                            onclick: move |_| tab.set(AdminTab::Clients),
                            "Clients"
                        }
                        button {
                            class: tab_class(AdminTab::Templates),
                            r#type: "button",
                            onclick: move |_| tab.set(AdminTab::Templates),
                            "Phase Templates"
                        }
                    }
                }
                div { class: "header-right",
                    span { class: "user-name", "Administrator" }
                    button { class: "logout-btn", r#type: "button", onclick: logout, "Logout" }
                }
            }

            match tab() {
                AdminTab::Clients => rsx! { ClientsWorkspace {} },
                AdminTab::Templates => rsx! {
                    div { class: "admin-templates-view", TemplateManager {} }
                },
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SelectedClient {
    client: Option<Client>,
}

#[component]
pub(crate) fn ClientsWorkspace() -> Element {
    let ctx = use_context::<AppContext>();
    let search = use_signal(String::new);
    let mut selected = use_signal(|| None::<ClientId>);
    let mut collapsed = use_signal(|| false);
    let mut show_new_client = use_signal(|| false);

    let clients_for_list = ctx.clients();
    let mut list = use_resource(move || {
        let clients = clients_for_list.clone();
        let query = search();
        async move {
            let items = clients
                .list_clients(&query)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<Vec<ClientRowVm>, ViewError>(map_client_rows(&items))
        }
    });

    let clients_for_detail = ctx.clients();
    let mut detail = use_resource(move || {
        let clients = clients_for_detail.clone();
        let id = selected();
        async move {
            let client = match id {
                Some(id) => clients
                    .get_client(&id)
                    .await
                    .map_err(|_| ViewError::Unknown)?,
                None => None,
            };
            Ok::<SelectedClient, ViewError>(SelectedClient { client })
        }
    });

    let rows = match view_state_from_resource(&list) {
        ViewState::Ready(rows) => rows,
        _ => Vec::new(),
    };
    let list_error = matches!(view_state_from_resource(&list), ViewState::Error(_));

    let on_changed = move |()| {
        list.restart();
        detail.restart();
    };

    rsx! {
        div { class: if collapsed() { "admin-layout sidebar-collapsed-state" } else { "admin-layout" },
            ClientSidebar {
                rows,
                selected: selected(),
                search,
                failed: list_error,
                on_select: move |id: ClientId| {
                    selected.set(Some(id));
                    collapsed.set(true);
                },
                on_expand: move |()| collapsed.set(false),
                on_new_client: move |()| show_new_client.set(true),
            }

            main { class: "admin-main",
                match view_state_from_resource(&detail) {
                    ViewState::Ready(SelectedClient { client: Some(client) }) => {
                        let detail_key = client.id.to_string();
                        rsx! {
                            ClientDetail { key: "{detail_key}", client, on_changed }
                        }
                    }
                    ViewState::Error(err) => rsx! {
                        p { class: "form-error", "{err.message()}" }
                    },
                    _ => rsx! { NoSelection {} },
                }
            }

            if show_new_client() {
                NewClientModal {
                    on_close: move |()| show_new_client.set(false),
                    on_created: move |client: Client| {
                        show_new_client.set(false);
                        selected.set(Some(client.id));
                        list.restart();
                    },
                }
            }
        }
    }
}

#[component]
fn NoSelection() -> Element {
    rsx! {
        div { class: "no-selection",
            div { class: "no-selection-icon", UserIcon {} }
            h2 { "Select a Client" }
            p { "Choose a client from the list to view and manage their project" }
        }
    }
}

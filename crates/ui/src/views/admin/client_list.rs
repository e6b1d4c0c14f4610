use dioxus::prelude::*;
use portal_core::model::ClientId;

use crate::vm::ClientRowVm;

#[component]
pub(super) fn ClientSidebar(
    rows: Vec<ClientRowVm>,
    selected: Option<ClientId>,
    mut search: Signal<String>,
    failed: bool,
    on_select: EventHandler<ClientId>,
    on_expand: EventHandler<()>,
    on_new_client: EventHandler<()>,
) -> Element {
    rsx! {
        aside { class: "client-sidebar",
            button {
                class: "sidebar-expand-btn",
                r#type: "button",
                title: "Expand client list",
                onclick: move |_| on_expand.call(()),
                svg {
                    view_box: "0 0 24 24",
                    fill: "none",
                    stroke: "currentColor",
                    stroke_width: "2",
                    path { d: "M9 18l6-6-6-6" }
                }
            }

            div { class: "sidebar-collapsed-content",
                ul { class: "client-avatars",
                    for row in rows.iter() {
                        li {
                            key: "{row.id}",
                            class: "client-avatar {row.product_class}",
                            class: if selected.as_ref() == Some(&row.id) { "selected" },
                            title: "{row.name}",
                            onclick: {
                                let id = row.id.clone();
                                move |_| on_select.call(id.clone())
                            },
                            "{row.initials}"
                        }
                    }
                }
            }

            div { class: "sidebar-expanded",
                div { class: "sidebar-header",
                    div { class: "sidebar-title-row",
                        h2 { "Clients" }
                        button {
                            class: "add-client-btn",
                            r#type: "button",
                            onclick: move |_| on_new_client.call(()),
                            "+ New Client"
                        }
                    }
                    input {
                        class: "search-input",
                        r#type: "text",
                        placeholder: "Search clients...",
                        value: "{search}",
                        oninput: move |evt| search.set(evt.value()),
                    }
                }

                if failed {
                    p { class: "form-error", "Could not load clients." }
                } else if rows.is_empty() {
                    p { class: "empty-state", "No clients match your search" }
                }

                ul { class: "client-list",
                    for row in rows.iter() {
                        li {
                            key: "{row.id}",
                            class: "client-item",
                            class: if selected.as_ref() == Some(&row.id) { "selected" },
                            onclick: {
                                let id = row.id.clone();
                                move |_| on_select.call(id.clone())
                            },
                            div {
                                class: "client-avatar-inline",
                                "data-product": row.product_class,
                                "{row.initials}"
                            }
                            div { class: "client-info",
                                strong { "{row.name}" }
                                span { class: "client-email", "{row.email}" }
                            }
                            div { class: "client-meta",
                                span { class: "product-tag {row.product_class}", "{row.product_code}" }
                                span { class: "progress-tag", "{row.progress}%" }
                            }
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;
use portal_core::model::{Client, ClientDraft, ModuleKey, ProductType};

use crate::components::Modal;
use crate::context::AppContext;
use crate::views::actions::{ErrorBanner, spawn_mutation};

const PRODUCTS: [ProductType; 2] = [ProductType::Zeus, ProductType::Hestia];

#[component]
pub(super) fn NewClientModal(on_close: EventHandler<()>, on_created: EventHandler<Client>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut draft = use_signal(ClientDraft::default);
    let error = use_signal(|| None::<String>);

    let product = draft.read().product;
    let submittable = draft.read().is_submittable();
    let needs_modules = product == ProductType::Hestia && draft.read().modules.is_empty();

    let clients = ctx.clients();
    let create = move |_| {
        let clients = clients.clone();
        let current = draft.read().clone();
        spawn_mutation(
            async move { clients.create_client(&current).await },
            move |client| on_created.call(client),
            error,
        );
    };

    rsx! {
        Modal { title: "Create New Client", on_close, class: "new-client-modal",
            ErrorBanner { error }

            div { class: "form-group",
                label { r#for: "client-name", "Client Name" }
                input {
                    id: "client-name",
                    r#type: "text",
                    placeholder: "e.g., John Smith",
                    value: "{draft.read().name}",
                    oninput: move |evt| draft.write().name = evt.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "client-email", "Email Address" }
                input {
                    id: "client-email",
                    r#type: "email",
                    placeholder: "e.g., john.smith@email.com",
                    value: "{draft.read().email}",
                    oninput: move |evt| draft.write().email = evt.value(),
                }
            }

            div { class: "form-group",
                label { "Product Type" }
                div { class: "product-options",
                    for option in PRODUCTS {
                        label {
                            key: "{option.code()}",
                            class: "product-option {option.css_class()}",
                            class: if product == option { "selected" },
                            input {
                                r#type: "radio",
                                name: "product",
                                checked: product == option,
                                onchange: move |_| draft.write().product = option,
                            }
                            div { class: "option-content",
                                span { class: "option-title", "{option.code()}" }
                                span { class: "option-desc", "{option.tagline()}" }
                            }
                        }
                    }
                }
            }

            if product == ProductType::Hestia {
                div { class: "form-group",
                    label { "Select Modules" }
                    p { class: "form-hint", "Choose which modules this client will have access to" }
                    div { class: "modules-grid",
                        for module in ModuleKey::ALL {
                            label { key: "{module.key()}", class: "module-checkbox",
                                input {
                                    r#type: "checkbox",
                                    checked: draft.read().modules.contains(module),
                                    onchange: move |_| draft.write().modules.toggle(module),
                                }
                                span { "{module.display_name()}" }
                            }
                        }
                    }
                    if needs_modules {
                        p { class: "form-error", "Please select at least one module for HESTIA clients" }
                    }
                }
            }

            div { class: "modal-actions",
                button {
                    class: "cancel-btn",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "submit-btn",
                    r#type: "button",
                    disabled: !submittable,
                    onclick: create,
                    "Create Client"
                }
            }
        }
    }
}

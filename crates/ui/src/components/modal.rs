use dioxus::document::eval;
use dioxus::prelude::*;
use portal_core::model::FileKind;

use crate::components::icons::UploadIcon;
use crate::vm::file_icon;

/// Overlay dialog. Clicking the backdrop or pressing Escape closes it.
///
/// The page behind stops scrolling while a modal is mounted.
#[component]
pub fn Modal(
    #[props(into)] title: String,
    on_close: EventHandler<()>,
    #[props(default, into)] class: String,
    children: Element,
) -> Element {
    use_effect(|| {
        let _ = eval("document.body.style.overflow = 'hidden';");
    });
    use_drop(|| {
        let _ = eval("document.body.style.overflow = '';");
    });

    rsx! {
        div {
            class: "modal-overlay",
            tabindex: "-1",
            onmounted: move |evt| async move {
                let _ = evt.set_focus(true).await;
            },
            onkeydown: move |evt| {
                if evt.data.key() == Key::Escape {
                    on_close.call(());
                }
            },
            onclick: move |_| on_close.call(()),
            div {
                class: "modal {class}",
                onclick: move |evt| evt.stop_propagation(),
                h3 { "{title}" }
                {children}
            }
        }
    }
}

#[component]
pub fn ConfirmDialog(
    #[props(into)] title: String,
    #[props(into)] message: String,
    #[props(default = "Delete".to_string(), into)] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        Modal { title, on_close: on_cancel, class: "confirm-modal",
            p { class: "confirm-message", "{message}" }
            div { class: "modal-actions",
                button {
                    class: "cancel-btn",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "delete-confirm-btn",
                    r#type: "button",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}

/// Metadata for a file picked in the upload dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub name: String,
    pub kind: FileKind,
    pub size_bytes: u64,
}

/// Collects a file name and size. Only metadata is recorded; no bytes move.
#[component]
pub fn UploadModal(
    #[props(default = "Upload File".to_string(), into)] title: String,
    #[props(default = "Supports: PDF, Images, Videos, Documents".to_string(), into)]
    hint: String,
    on_close: EventHandler<()>,
    on_upload: EventHandler<UploadRequest>,
) -> Element {
    let mut name = use_signal(String::new);
    let mut size_kb = use_signal(String::new);

    let trimmed = name.read().trim().to_owned();
    let kind = FileKind::from_file_name(&trimmed);
    let size_valid = {
        let raw = size_kb.read();
        raw.trim().is_empty() || raw.trim().parse::<u64>().is_ok()
    };
    let can_submit = !trimmed.is_empty() && size_valid;

    let submit = move |_| {
        let name = name.read().trim().to_owned();
        if name.is_empty() {
            return;
        }
        let size_bytes = size_kb
            .read()
            .trim()
            .parse::<u64>()
            .map_or(0, |kb| kb.saturating_mul(1024));
        on_upload.call(UploadRequest {
            kind: FileKind::from_file_name(&name),
            name,
            size_bytes,
        });
    };

    rsx! {
        Modal { title, on_close,
            div { class: "upload-area",
                div { class: "upload-icon", UploadIcon {} }
                p { "Enter the file details to record the upload" }
                p { class: "upload-hint", "{hint}" }
                div { class: "form-group",
                    label { r#for: "upload-name", "File Name" }
                    input {
                        id: "upload-name",
                        r#type: "text",
                        placeholder: "e.g., contract_draft.pdf",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "upload-size", "Size (KB)" }
                    input {
                        id: "upload-size",
                        r#type: "text",
                        inputmode: "numeric",
                        placeholder: "optional",
                        value: "{size_kb}",
                        oninput: move |evt| size_kb.set(evt.value()),
                    }
                }
                if !trimmed.is_empty() {
                    p { class: "upload-kind",
                        "{file_icon(kind)} Detected type: {kind.key()}"
                    }
                }
                if !size_valid {
                    p { class: "form-error", "Size must be a whole number of kilobytes" }
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
                    disabled: !can_submit,
                    onclick: submit,
                    "Upload"
                }
            }
        }
    }
}

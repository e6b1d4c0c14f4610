use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dioxus::prelude::*;

use crate::components::Modal;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct MeetingRequest {
    pub title: String,
    pub url: String,
    pub scheduled_for: NaiveDateTime,
}

/// Combine the date and time inputs. Both must be filled in.
fn parse_schedule(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(date.and_time(time))
}

#[component]
pub(super) fn MeetingModal(on_close: EventHandler<()>, on_submit: EventHandler<MeetingRequest>) -> Element {
    let mut title = use_signal(String::new);
    let mut url = use_signal(String::new);
    let mut date = use_signal(String::new);
    let mut time = use_signal(String::new);

    let schedule = parse_schedule(&date.read(), &time.read());
    let can_submit =
        !title.read().trim().is_empty() && !url.read().trim().is_empty() && schedule.is_some();

    let submit = move |_| {
        let Some(scheduled_for) = parse_schedule(&date.read(), &time.read()) else {
            return;
        };
        on_submit.call(MeetingRequest {
            title: title.read().trim().to_owned(),
            url: url.read().trim().to_owned(),
            scheduled_for,
        });
    };

    rsx! {
        Modal { title: "Add Meeting Link", on_close,
            div { class: "form-group",
                label { r#for: "meeting-title", "Meeting Title" }
                input {
                    id: "meeting-title",
                    r#type: "text",
                    placeholder: "e.g., Contract Review Call",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
            }
            div { class: "form-group",
                label { r#for: "meeting-url", "Meeting URL" }
                input {
                    id: "meeting-url",
                    r#type: "url",
                    placeholder: "https://zoom.us/j/...",
                    value: "{url}",
                    oninput: move |evt| url.set(evt.value()),
                }
            }
            div { class: "form-row",
                div { class: "form-group",
                    label { r#for: "meeting-date", "Date" }
                    input {
                        id: "meeting-date",
                        r#type: "date",
                        value: "{date}",
                        oninput: move |evt| date.set(evt.value()),
                    }
                }
                div { class: "form-group",
                    label { r#for: "meeting-time", "Time" }
                    input {
                        id: "meeting-time",
                        r#type: "time",
                        value: "{time}",
                        oninput: move |evt| time.set(evt.value()),
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
                    disabled: !can_submit,
                    onclick: submit,
                    "Add Meeting"
                }
            }
        }
    }
}

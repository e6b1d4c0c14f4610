use std::future::Future;
use std::time::Duration;

use dioxus::prelude::*;

const ERROR_VISIBLE_FOR: Duration = Duration::from_secs(5);

/// Run a service mutation in the background.
///
/// On success `on_done` fires; on failure the error text lands in `error`
/// and clears itself after a few seconds unless replaced.
pub(crate) fn spawn_mutation<T, E, F, D>(future: F, on_done: D, mut error: Signal<Option<String>>)
where
    T: 'static,
    E: std::fmt::Display + 'static,
    F: Future<Output = Result<T, E>> + 'static,
    D: FnOnce(T) + 'static,
{
    spawn(async move {
        match future.await {
            Ok(value) => {
                error.set(None);
                on_done(value);
            }
            Err(err) => {
                tracing::warn!(%err, "portal action failed");
                let message = err.to_string();
                error.set(Some(message.clone()));
                tokio::time::sleep(ERROR_VISIBLE_FOR).await;
                if error.read().as_ref() == Some(&message) {
                    error.set(None);
                }
            }
        }
    });
}

#[component]
pub(crate) fn ErrorBanner(mut error: Signal<Option<String>>) -> Element {
    let message = error.read().clone();
    rsx! {
        if let Some(message) = message {
            div { class: "error-banner", role: "alert",
                span { "{message}" }
                button {
                    class: "error-dismiss",
                    r#type: "button",
                    onclick: move |_| error.set(None),
                    "×"
                }
            }
        }
    }
}

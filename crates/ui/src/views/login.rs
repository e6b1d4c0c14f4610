use dioxus::prelude::*;
use dioxus_router::navigator;

use crate::components::{CheckIcon, ClockIcon, DocumentIcon, SettingsIcon, ShieldIcon, UserIcon};
use crate::context::{AppContext, use_session};
use crate::routes::Route;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();
    let nav = navigator();
    let mut error = use_signal(|| None::<String>);

    let sessions = ctx.sessions();
    let sessions_for_admin = ctx.sessions();

    let login_client = move |_| {
        let sessions = sessions.clone();
        spawn(async move {
            match sessions.login_demo_client().await {
                Ok((signed_in, _client)) => {
                    session.sign_in(signed_in);
                    nav.push(Route::Client {});
                }
                Err(err) => {
                    tracing::warn!(%err, "client login failed");
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let login_admin = move |_| {
        session.sign_in(sessions_for_admin.login_admin());
        nav.push(Route::Admin {});
    };

    rsx! {
        div { class: "login-page",
            div { class: "login-container",
                div { class: "login-brand",
                    div { class: "brand-logo",
                        ShieldIcon { class: "brand-icon" }
                        div {
                            h1 { "Aegis Shield" }
                            span { class: "brand-subtitle", "Client Protection Portal" }
                        }
                    }
                    h2 { class: "login-headline", "Protect Your Renovation Investment" }
                    p { class: "login-tagline",
                        "Comprehensive protection from contractor vetting to project completion"
                    }
                }

                div { class: "login-card",
                    h3 { "Sign In" }
                    p { class: "login-card-subtitle", "Choose your account type to continue" }

                    div { class: "login-options",
                        button {
                            class: "login-option client-option",
                            r#type: "button",
                            onclick: login_client,
                            div { class: "option-icon", UserIcon {} }
                            div { class: "option-text",
                                span { class: "option-title", "Client Portal" }
                                span { class: "option-desc", "Track your renovation project" }
                            }
                        }
                        button {
                            class: "login-option admin-option",
                            r#type: "button",
                            onclick: login_admin,
                            div { class: "option-icon", SettingsIcon {} }
                            div { class: "option-text",
                                span { class: "option-title", "Admin Console" }
                                span { class: "option-desc", "Manage all client projects" }
                            }
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "form-error", "{message}" }
                    }

                    p { class: "login-footer", "Demo Environment • Mock Data" }
                }
            }

            div { class: "feature-grid",
                FeatureTile {
                    title: "Contractor Vetting",
                    description: "Thorough background checks and verification",
                    CheckIcon {}
                }
                FeatureTile {
                    title: "Contract Review",
                    description: "Expert legal analysis and negotiation support",
                    DocumentIcon {}
                }
                FeatureTile {
                    title: "Timeline Tracking",
                    description: "Real-time project monitoring and updates",
                    ClockIcon {}
                }
                FeatureTile {
                    title: "Quality Assurance",
                    description: "Independent inspections at every phase",
                    ShieldIcon {}
                }
            }
        }
    }
}

#[component]
fn FeatureTile(title: &'static str, description: &'static str, children: Element) -> Element {
    rsx! {
        div { class: "feature-item",
            div { class: "feature-icon", {children} }
            h4 { "{title}" }
            p { "{description}" }
        }
    }
}

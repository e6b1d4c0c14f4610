use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use portal_core::model::ClientId;
use portal_core::time::fixed_clock;
use services::{AppServices, Session};

use crate::context::{UiApp, build_app_context, use_session_provider};
use crate::views::templates::TemplateManager;
use crate::views::{AdminView, ClientDashboardView, LoginView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Client,
    Admin,
    Templates,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    session: Option<Session>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_session_provider(props.session.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Client => rsx! { ClientDashboardView {} },
        ViewKind::Admin => rsx! { AdminView {} },
        ViewKind::Templates => rsx! { TemplateManager {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn seeded_app() -> Arc<AppServices> {
    Arc::new(AppServices::in_memory_seeded(fixed_clock()).expect("seed mock data"))
}

pub async fn client_session(app: &AppServices, id: &str) -> Session {
    let (session, _client) = app
        .sessions()
        .login_client(&ClientId::new(id))
        .await
        .expect("login client");
    session
}

pub fn setup_view_harness(app: Arc<AppServices>, view: ViewKind, session: Option<Session>) -> ViewHarness {
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
            session,
        },
    );
    ViewHarness { dom, app }
}

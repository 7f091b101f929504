use std::rc::Rc;

use desktop_runtime::{
    DesktopEvent, DesktopHostContext, DesktopProvider, DesktopShell, WindowCatalog, WindowId,
};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Portfolio Desktop" />
        <Meta name="description" content="A classic desktop-style portfolio shell." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/windows/:id" view=CanonicalWindowRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    let host = DesktopHostContext::default().with_observer(Rc::new(log_desktop_event));
    let window_content = Callback::new(|window_id: WindowId| window_body(&window_id));

    view! {
        <DesktopProvider host>
            <DesktopShell window_content />
        </DesktopProvider>
    }
}

fn log_desktop_event(event: &DesktopEvent) {
    match event {
        DesktopEvent::WindowShown(window_id) => logging::log!("window shown: {window_id}"),
        DesktopEvent::TaskbarReordered => logging::log!("taskbar reordered"),
    }
}

fn window_body(window_id: &WindowId) -> View {
    let title = WindowCatalog::portfolio().title(window_id);
    view! {
        <article class="window-content" data-window=window_id.to_string()>
            <h2>{title}</h2>
            <a href=format!("/windows/{window_id}")>"Permalink"</a>
        </article>
    }
    .into_view()
}

#[component]
fn CanonicalWindowRoute() -> impl IntoView {
    let params = use_params_map();
    let id = move || {
        params
            .with(|map| map.get("id").cloned())
            .unwrap_or_else(|| "unknown".to_string())
    };
    let title = move || WindowCatalog::portfolio().title(&WindowId::new(id()));

    view! {
        <section class="canonical-content canonical-window">
            <h1>{title}</h1>
            <A href=move || format!("/?open={}", id())>"Open in Desktop"</A>
        </section>
    }
}

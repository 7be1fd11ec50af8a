//! Main Leptos application component and routing.

use crate::pages::ChatPage;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="3GPP Assistant"/>
        <Router>
            <main class="app">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=ChatPage/>
                </Routes>
            </main>
        </Router>
    }
}

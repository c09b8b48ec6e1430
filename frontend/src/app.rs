use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};

use crate::pages::{home::HomePage, people::PeoplePage};

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div id="app">
                <header>
                    <h1>"Talks & Papers · People Directory"</h1>
                    <nav>
                        <A href="/">"Overview"</A>
                        <A href="/people">"People"</A>
                    </nav>
                </header>
                <main>
                    <Routes fallback=|| {
                        view! { <p class="error">"Page not found"</p> }
                    }>
                        <Route path=path!("/") view=HomePage/>
                        <Route path=path!("/people") view=PeoplePage/>
                    </Routes>
                </main>
                <footer>
                    <p>"Unified directory of conference speakers and paper authors"</p>
                </footer>
            </div>
        </Router>
    }
}

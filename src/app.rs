//! Root application component: routing, global state contexts, and session
//! restore.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::chats::ChatsPage;
use crate::pages::login::LoginPage;
use crate::state::auth::AuthState;
use crate::state::chat::ChatWindowState;
use crate::state::chats::ChatsState;
use crate::state::users::UsersState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root component. Provides every shared state context and restores a
/// persisted session before the route guards evaluate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let users = RwSignal::new(UsersState::default());
    let chats = RwSignal::new(ChatsState::default());
    let window = RwSignal::new(ChatWindowState::default());

    provide_context(auth);
    provide_context(users);
    provide_context(chats);
    provide_context(window);

    Effect::new(move || {
        let session = crate::util::session::load();
        auth.update(|a| {
            a.session = session;
            a.loading = false;
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/natter.css"/>
        <Title text="Chat Application"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=ChatsPage/>
            </Routes>
        </Router>
    }
}

use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::provide_current_session;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    provide_current_session();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Quiz Portal" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}

//! Toast notifications

use leptos::prelude::*;

use crate::state::DashboardState;

#[component]
pub fn Toasts(state: DashboardState) -> impl IntoView {
    view! {
        <div class="yaku-toasts">
            <For
                each=move || state.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.css_class() role="alert">
                            <button
                                type="button"
                                class="btn-close float-end"
                                aria-label="Close"
                                on:click=move |_| state.dismiss_toast(id)
                            ></button>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}

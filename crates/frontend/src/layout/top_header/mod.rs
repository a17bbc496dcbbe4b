//! Top bar: sidebar toggle, title, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::system::auth::context::{sign_out, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let modals =
        leptos::context::use_context::<ModalStackService>().expect("ModalStackService not found");
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        modals.clear();
        ctx.reset();
        sign_out(set_auth_state);
    };

    let user_name = move || {
        auth_state.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| "Guest".to_string())
        })
    };
    let user_role = move || {
        auth_state.with(|s| s.user.as_ref().map(|u| String::from(u.role.clone())))
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Service Desk"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__user-name">{user_name}</span>
                    {move || user_role().map(|role| view! {
                        <span class="badge badge--primary">{role}</span>
                    })}
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("logout")}
                </button>
            </div>
        </div>
    }
}

use contracts::ApiError;
use leptos::prelude::*;
use thaw::*;

use crate::shared::modal_stack::ModalStackService;

/// Modal alert with a single OK button.
#[component]
pub fn AlertDialog(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="alert-dialog" role="alertdialog">
            <div class="modal-header">
                <h3 class="modal-title">{title}</h3>
            </div>
            <div class="alert-dialog__body">{message}</div>
            <div class="modal-actions">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_close.run(())>
                    "OK"
                </Button>
            </div>
        </div>
    }
}

/// Push an alert on top of whatever modal is open.
pub fn show_alert(modals: ModalStackService, title: &str, message: &str) {
    let title = title.to_string();
    let message = message.to_string();
    modals.push_with_class("modal--alert", move |handle| {
        view! {
            <AlertDialog
                title=title.clone()
                message=message.clone()
                on_close=Callback::new(move |_| handle.close())
            />
        }
        .into_any()
    });
}

/// An expired session needs no alert: the login page replaces the app.
pub fn show_api_error(modals: ModalStackService, err: &ApiError) {
    if err.is_unauthorized() {
        modals.clear();
        return;
    }
    show_alert(modals, err.title(), &err.to_string());
}

use yew::prelude::*;

use crate::hooks::use_toast::{use_toast, ToastVariant};

/// Renders the toasts of the surrounding provider
#[function_component(Toaster)]
pub fn toaster() -> Html {
    let toast = use_toast();

    html! {
        <div class="toaster">
            {for toast.toasts().into_iter().map(|item| {
                let class = match item.variant {
                    ToastVariant::Default => "toast",
                    ToastVariant::Destructive => "toast toast-destructive",
                };
                let on_close = {
                    let toast = toast.clone();
                    let id = item.id.clone();
                    Callback::from(move |_: MouseEvent| toast.dismiss(Some(id.clone())))
                };
                html! {
                    <div key={item.id.clone()} {class} role="status">
                        {if let Some(title) = &item.title {
                            html! { <div class="toast-title">{title}</div> }
                        } else { html! {} }}
                        {if let Some(description) = &item.description {
                            html! { <div class="toast-description">{description}</div> }
                        } else { html! {} }}
                        <button class="toast-close" onclick={on_close}>{"×"}</button>
                    </div>
                }
            })}
        </div>
    }
}

use shared::{PanelDraft, ReviewStatus};
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RemarkPanelProps {
    pub draft: PanelDraft,
    pub on_remark_change: Callback<String>,
    pub on_status_change: Callback<ReviewStatus>,
    pub on_close: Callback<()>,
    pub on_confirm: Callback<()>,
}

/// Side panel editing the remark and review status of one tour
#[function_component(RemarkPanel)]
pub fn remark_panel(props: &RemarkPanelProps) -> Html {
    let on_remark_input = {
        let on_remark_change = props.on_remark_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_remark_change.emit(input.value());
        })
    };

    let on_status_change = {
        let on_status_change = props.on_status_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(status) = ReviewStatus::from_label(&select.value()) {
                on_status_change.emit(status);
            }
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    html! {
        <div class="panel-backdrop">
            <aside class="remark-panel">
                <div class="remark-panel-header">
                    <h3>{"Update Remark"}</h3>
                    <button class="panel-close" onclick={on_close.clone()}>{"×"}</button>
                </div>

                <label for="remark-status">{"Status"}</label>
                <select id="remark-status" onchange={on_status_change}>
                    {for ReviewStatus::ALL.iter().map(|status| html! {
                        <option
                            value={status.label()}
                            selected={*status == props.draft.status}
                        >
                            {status.label()}
                        </option>
                    })}
                </select>

                <label for="remark-text">{"Remark"}</label>
                <textarea
                    id="remark-text"
                    value={props.draft.remark.clone()}
                    oninput={on_remark_input}
                    placeholder="Add a remark for this tour"
                />

                <p class="panel-note">{"Changes are kept in this view only and are not saved to the server."}</p>

                <div class="remark-panel-actions">
                    <button class="button-secondary" onclick={on_close}>{"Cancel"}</button>
                    <button class="button-primary" onclick={on_confirm}>{"Update"}</button>
                </div>
            </aside>
        </div>
    }
}

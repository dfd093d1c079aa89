use yew::prelude::*;

use super::sidebar::Sidebar;
use crate::hooks::use_is_mobile::use_is_mobile;

#[derive(Properties, PartialEq)]
pub struct DashboardLayoutProps {
    pub current_path: String,
    #[prop_or_default]
    pub children: Html,
}

/// Sidebar plus content column; the sidebar turns into a top bar on mobile
#[function_component(DashboardLayout)]
pub fn dashboard_layout(props: &DashboardLayoutProps) -> Html {
    let is_mobile = use_is_mobile();
    let class = if is_mobile { "dashboard dashboard-mobile" } else { "dashboard" };

    html! {
        <div {class}>
            <Sidebar current_path={props.current_path.clone()} compact={is_mobile} />
            <main class="dashboard-content">
                {props.children.clone()}
            </main>
        </div>
    }
}

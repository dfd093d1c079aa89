use yew::prelude::*;

use crate::routes::{navigate, Route};

pub struct SidebarItem {
    pub label: &'static str,
    pub route: Route,
}

pub const SIDEBAR_ITEMS: [SidebarItem; 1] = [SidebarItem {
    label: "ASM Survey",
    route: Route::AsmSurvey,
}];

/// An item is active for its own path and every path nested under it
pub fn is_active_path(current_path: &str, href: &str) -> bool {
    current_path.starts_with(href)
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub current_path: String,
    /// Render as a horizontal top bar instead of a fixed column
    #[prop_or_default]
    pub compact: bool,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let on_logout = Callback::from(|_: MouseEvent| {
        // Signing out belongs to the auth provider; the dashboard only leaves
        navigate(Route::Login, None);
    });

    let class = if props.compact { "sidebar sidebar-compact" } else { "sidebar" };

    html! {
        <aside {class}>
            <div class="sidebar-logo">
                <img src="/images/logo.svg" alt="Nakoda TMT Logo" />
            </div>
            <nav class="sidebar-nav">
                {for SIDEBAR_ITEMS.iter().map(|item| {
                    let href = item.route.path();
                    let class = if is_active_path(&props.current_path, href) {
                        "sidebar-item active"
                    } else {
                        "sidebar-item"
                    };
                    let route = item.route;
                    let onclick = Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        navigate(route, None);
                    });
                    html! {
                        <a key={href} {href} {class} {onclick}>{item.label}</a>
                    }
                })}
                <button class="sidebar-logout" onclick={on_logout}>{"Logout"}</button>
            </nav>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_for_nested_paths() {
        assert!(is_active_path("/asm-survey", "/asm-survey"));
        assert!(is_active_path("/asm-survey/expenses", "/asm-survey"));
        assert!(!is_active_path("/login", "/asm-survey"));
    }
}

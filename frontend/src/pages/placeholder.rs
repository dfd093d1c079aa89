use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlaceholderPageProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub tour_id: Option<String>,
}

/// Stand-in for pages whose content lives outside this dashboard
#[function_component(PlaceholderPage)]
pub fn placeholder_page(props: &PlaceholderPageProps) -> Html {
    html! {
        <div class="placeholder-page">
            <h2>{props.title.clone()}</h2>
            {if let Some(tour_id) = &props.tour_id {
                html! { <p>{format!("Tour: {}", tour_id)}</p> }
            } else { html! {} }}
        </div>
    }
}

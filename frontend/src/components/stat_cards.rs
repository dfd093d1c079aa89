use shared::TourStats;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardsProps {
    pub stats: TourStats,
}

#[function_component(StatCards)]
pub fn stat_cards(props: &StatCardsProps) -> Html {
    let cards = [
        ("Active Tours", props.stats.active),
        ("Total Tours", props.stats.total),
        ("Inactive Tours", props.stats.inactive),
    ];

    html! {
        <div class="stat-cards">
            {for cards.iter().map(|(title, value)| html! {
                <div key={*title} class="stat-card">
                    <p class="stat-title">{*title}</p>
                    <h3 class="stat-value">{value.to_string()}</h3>
                </div>
            })}
        </div>
    }
}

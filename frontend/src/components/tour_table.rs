use chrono::FixedOffset;
use shared::TourSummary;
use yew::prelude::*;

use crate::routes::{navigate, TourAction};

const COLUMN_COUNT: usize = 9;

#[derive(Properties, PartialEq)]
pub struct TourTableProps {
    /// Tours of the selected tab
    pub tours: Vec<TourSummary>,
    /// Whether any tour at all is known, cached or fetched
    pub has_tours: bool,
    pub loading: bool,
    pub offset: FixedOffset,
}

#[function_component(TourTable)]
pub fn tour_table(props: &TourTableProps) -> Html {
    let placeholder = |text: &str| {
        html! {
            <tr>
                <td class="table-placeholder" colspan={COLUMN_COUNT.to_string()}>{text.to_string()}</td>
            </tr>
        }
    };

    html! {
        <div class="table-container">
            <table class="tour-table">
                <thead>
                    <tr>
                        <th>{"S No."}</th>
                        <th>{"Title"}</th>
                        <th>{"ASM ID"}</th>
                        <th>{"Survey Date"}</th>
                        <th>{"ASM Name"}</th>
                        <th>{"Mobile"}</th>
                        {for TourAction::ALL.iter().map(|action| html! { <th>{action.label()}</th> })}
                    </tr>
                </thead>
                <tbody>
                    {if props.loading && !props.has_tours {
                        placeholder("Loading tours...")
                    } else { html! {} }}

                    {for props.tours.iter().enumerate().map(|(index, tour)| {
                        html! {
                            <tr key={tour.id.clone()}>
                                <td>{(index + 1).to_string()}</td>
                                <td class="tour-title">{tour.title_label()}</td>
                                <td>{tour.staff_label()}</td>
                                <td>{tour.survey_date_label(props.offset)}</td>
                                <td>{tour.asm_name_label()}</td>
                                <td>{tour.mobile_label()}</td>
                                {for TourAction::ALL.iter().map(|action| {
                                    let action = *action;
                                    let tour_id = tour.id.clone();
                                    let onclick = Callback::from(move |_: MouseEvent| {
                                        navigate(action.route(), Some(&tour_id));
                                    });
                                    let class = match action {
                                        TourAction::ViewLocation => "row-action row-action-location",
                                        _ => "row-action",
                                    };
                                    let text = match action {
                                        TourAction::ViewLocation => "Location",
                                        _ => "View",
                                    };
                                    html! {
                                        <td><button {class} {onclick}>{text}</button></td>
                                    }
                                })}
                            </tr>
                        }
                    })}

                    {if !props.loading && props.tours.is_empty() {
                        placeholder("No surveys found")
                    } else { html! {} }}
                </tbody>
            </table>
        </div>
    }
}

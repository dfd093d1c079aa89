use shared::TourExpenseGroup;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseGroupProps {
    pub group: TourExpenseGroup,
    pub expanded: bool,
    pub on_toggle: Callback<String>,
    pub on_remark: Callback<String>,
}

/// Header plus, when expanded, the line items and total of one tour
#[function_component(ExpenseGroup)]
pub fn expense_group(props: &ExpenseGroupProps) -> Html {
    let group = &props.group;

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        let tour_id = group.tour_id.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(tour_id.clone()))
    };
    let on_remark = {
        let on_remark = props.on_remark.clone();
        let tour_id = group.tour_id.clone();
        Callback::from(move |_: MouseEvent| on_remark.emit(tour_id.clone()))
    };

    html! {
        <div class="expense-group">
            <div class="expense-group-header">
                <div>
                    <h3 class="expense-group-title">{&group.title}</h3>
                    <p class="expense-group-date">{&group.date}</p>
                </div>
                <div class="expense-group-actions">
                    <span class="review-status">{group.status.label()}</span>
                    <button class="remark-button" onclick={on_remark}>{"Remark"}</button>
                    <button class="toggle-button" onclick={on_toggle}>
                        {if props.expanded { "−" } else { "+" }}
                    </button>
                </div>
            </div>

            {if props.expanded {
                html! {
                    <div class="expense-group-body">
                        <table class="expense-table">
                            <thead>
                                <tr>
                                    <th>{"S No."}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Amount"}</th>
                                    <th>{"Image"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for group.expenses.iter().enumerate().map(|(index, row)| html! {
                                    <tr key={row.id.clone()}>
                                        <td>{(index + 1).to_string()}</td>
                                        <td>{&row.category}</td>
                                        <td class="amount">{&row.amount_display}</td>
                                        <td>
                                            {match &row.image {
                                                Some(src) => html! {
                                                    <a href={src.clone()} target="_blank">
                                                        <img class="receipt-thumb" src={src.clone()} alt="Receipt" />
                                                    </a>
                                                },
                                                None => html! { <div class="receipt-thumb receipt-missing" /> },
                                            }}
                                        </td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                        <div class="expense-total">
                            {"Total Expense : "}<span class="amount">{group.total_display()}</span>
                        </div>
                        {if group.remark.is_empty() { html! {} } else {
                            html! { <p class="expense-remark">{&group.remark}</p> }
                        }}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

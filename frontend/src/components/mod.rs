pub mod dashboard_layout;
pub mod expense_group;
pub mod remark_panel;
pub mod sidebar;
pub mod stat_cards;
pub mod toaster;
pub mod tour_table;

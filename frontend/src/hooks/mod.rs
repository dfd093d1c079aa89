pub mod use_is_mobile;
pub mod use_master_data;
pub mod use_toast;
pub mod use_tour_expenses;
pub mod use_tours;

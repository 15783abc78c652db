pub mod api_key_form;
pub mod banners;
pub mod chart_panel;
pub mod current_weather;
pub mod search_bar;
pub mod statistics;

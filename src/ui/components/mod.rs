pub mod dashboard;
pub mod menu;
pub mod progress_bar;
pub mod stats_header;
pub mod typing_area;

pub mod loading;
pub mod meta;
pub mod price_history_chart;
pub mod recent_changes;
pub mod relative_time;

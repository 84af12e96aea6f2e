pub mod admin_panel;
pub mod header;
pub mod html;
pub mod metrics_source;

//! Dashboard components

mod critical_point_form;
mod map_view;
mod node_form;
mod results_panel;
mod status_panel;
mod toast;

pub use critical_point_form::CriticalPointForm;
pub use map_view::MapView;
pub use node_form::NodeForm;
pub use results_panel::ResultsPanelView;
pub use status_panel::StatusPanel;
pub use toast::Toasts;

pub mod app;
pub mod ar_view;
pub mod controls_panel;
pub mod info_panel;
pub mod model_picker;
pub mod settings_modal;

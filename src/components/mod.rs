pub mod app;
pub mod board;
pub mod help_panel;
pub mod icon;
pub mod intro_overlay;
pub mod status_bar;

pub mod app;
pub mod coordinate_readout;
pub mod globe_view;
pub mod hero;
pub mod navigation;
pub mod time_controller;

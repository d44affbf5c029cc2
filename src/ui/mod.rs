pub mod screen;
pub mod view;

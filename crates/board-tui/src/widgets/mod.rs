pub mod big_digits;
pub mod pane_chrome;
pub mod status_bar;
pub mod toast;

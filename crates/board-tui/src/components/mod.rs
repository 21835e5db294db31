pub mod board_frame;
pub mod event_log;
pub mod help_overlay;
pub mod path_prompt;

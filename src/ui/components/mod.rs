pub mod confirm_dialog;
pub mod input_dialog;

pub mod spinner;
pub mod wizard_ui;

pub mod export;
pub mod generate;
pub mod menu;

pub use export::export_command;
pub use generate::generate_command;
pub use menu::run_menu;

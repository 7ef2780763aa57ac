pub mod board;
pub mod launcher;
pub mod menus;

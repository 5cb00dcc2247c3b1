pub mod call;
pub mod common;
pub mod dora;
pub mod engine;
pub mod game;
pub mod possible_actions;
pub mod wall;

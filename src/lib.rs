#[allow(non_snake_case)]
pub mod Equations;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Grid;
#[allow(non_snake_case)]
pub mod Reactions;
#[allow(non_snake_case)]
pub mod Utils;
pub mod settings;

/// demonstration scenarios of the reaction engine, run from main.rs
pub mod reaction_examples;

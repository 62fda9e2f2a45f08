pub mod gateway;
pub mod prompter;

pub mod env;
pub mod style;
pub mod template;

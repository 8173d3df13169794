pub mod escape;
mod screens;

pub use escape::escape_html;
pub use screens::render;

pub mod builtin_font;
pub mod decode;
pub mod fetch;
pub mod font;
pub mod source;

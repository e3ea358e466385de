pub mod default;
pub mod kja;

pub use default::DefaultStyle;
pub use kja::KjaStyle;

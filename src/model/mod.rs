mod emoji;
mod guild;
mod image;
mod role;
mod snowflake;

pub use emoji::*;
pub use guild::*;
pub use image::*;
pub use role::*;
pub use snowflake::*;

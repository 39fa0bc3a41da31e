pub mod blocks;
pub mod new;
pub mod render;
pub mod serve;
pub mod validate;

pub use blocks::{blocks, BlocksArgs};
pub use new::{new, NewArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
pub use validate::{validate, ValidateArgs};

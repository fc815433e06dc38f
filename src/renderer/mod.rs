pub mod components;
pub mod container;
pub mod context;
pub mod renderer;
pub mod renders;
pub mod result;
pub mod section;
pub mod traits;

pub use components::*;
pub use container::*;
pub use context::*;
pub use renderer::*;
pub use renders::*;
pub use result::*;
pub use section::*;
pub use traits::*;

pub mod proxy;
pub mod render;

pub use proxy::{handle_proxy, __path_handle_proxy};
pub use render::{build_options, handle_render, ApiErrorResponse, RenderJsonResponse, RenderQuery};
pub use render::__path_handle_render;

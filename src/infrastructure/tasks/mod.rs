mod http_server;
mod persistence;
mod render;
mod sntp;

pub use http_server::http_server_task;
pub use persistence::persistence_task;
pub use render::strip_render_task;
pub use sntp::sntp_task;

pub mod http;
pub mod map;
pub mod notices;
pub mod preview;
pub mod routing;

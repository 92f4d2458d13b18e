pub mod config;
pub mod kakao;
pub mod logging;

pub use logging::init_logging;

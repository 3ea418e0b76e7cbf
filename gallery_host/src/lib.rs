pub mod config;
pub mod session;
pub mod store;


pub use config::HostConfig;
pub use session::{ui_message, Session, UiClient};
pub use store::FileStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("message encoding failed: {0}")]
    Codec(#[from] postcard::Error),
}

/// Install the env_logger backend. Filter comes from `GALLERY_LOG`, default `info`.
pub fn init_logging() {
    let env = env_logger::Env::default().filter_or("GALLERY_LOG", "info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

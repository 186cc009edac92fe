use env_logger::Env;

/// Debug-level logging in debug builds, info otherwise. `RUST_LOG` overrides both.
pub fn init_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .filter_module("reqwest", log::LevelFilter::Info)
        .filter_module("hyper_util", log::LevelFilter::Info)
        .init();
}

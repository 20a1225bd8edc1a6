use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` for the album tools.
///
/// The engine logs content loads at info, ignored out-of-range jumps at
/// warn, and each navigation step plus the effects it switched on at debug.
/// `verbose` lowers the default filter from info to debug; `RUST_LOG`
/// overrides either.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // A second call finds the logger already installed; that is fine.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
        log::debug!("logger initialised");
    }
}

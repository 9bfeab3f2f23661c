use tracing_subscriber::EnvFilter;

/// Inicializa el registro de eventos.
///
/// El nivel por defecto es `info`; se puede cambiar con `RUST_LOG`
/// (por ejemplo `RUST_LOG=apibeast=debug`). Los eventos se escriben en
/// stderr para no mezclarse con los informes que se imprimen en stdout.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignorar el error si ya hay un suscriptor global (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

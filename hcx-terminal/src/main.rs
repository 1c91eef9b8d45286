/// HCX Terminal Demo - Orbiting view of a generated housing complex
///
/// Controls:
///   - Q/ESC/Ctrl-C: Quit
///
/// Logs go to stderr; set RUST_LOG (e.g. `RUST_LOG=hcx_core=debug`) to see them.
use hcx_core::{build_housing_complex, ComplexConfig};
use hcx_terminal::{TerminalApp, TerminalError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TerminalError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let layout = build_housing_complex(&ComplexConfig::default(), &mut rand::rng());
    tracing::info!(
        primitives = layout.len(),
        lights = layout.lights.len(),
        "housing complex generated"
    );

    let mut app = TerminalApp::new(&layout)?;
    app.run()
}

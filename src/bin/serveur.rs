// src/bin/serveur.rs
//
// Serveur local : API JSON (POST /api/eval) + interface web (./web).
// Journaux : RUST_LOG (défaut : calculatrice_sure=info,tower_http=info).

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> ExitCode {
    use calculatrice_sure::serveur::{servir, ConfigServeur};
    use clap::Parser;
    use tracing::error;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calculatrice_sure=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigServeur::parse();

    if let Err(err) = servir(config).await {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() -> ExitCode {
    // Pas de serveur en wasm32.
    ExitCode::SUCCESS
}

// src/bin/calc.rs
//
// Mode ligne : calc "sqrt(10) + power(2,3)"
// - arguments joints par un espace => une seule expression
// - sortie : la valeur (code 0) ou "Error: <message>" (code 1)
// - aucun argument : usage (code 2, comme toute erreur d’arguments clap)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use std::process::ExitCode;

use calculatrice_sure::noyau::evaluer;

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "calc", override_usage = "calc \"2+2\"")]
#[command(about = "Évalue une expression arithmétique restreinte")]
struct Cli {
    /// Expression (plusieurs arguments sont joints par un espace)
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    use clap::Parser;

    let cli = Cli::parse();

    match evaluer(&cli.expression.join(" ")) {
        Ok(r) => {
            println!("{:?}", r.valeur);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() -> ExitCode {
    // Pas de mode ligne en wasm32 : la calculatrice passe par l’UI.
    ExitCode::SUCCESS
}

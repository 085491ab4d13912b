//! Serveur HTTP : API JSON + fichiers statiques.
//!
//! - `POST /api/eval` `{"expression": "..."}` -> `200 {"value": ...}` ou `400 {"error": "..."}`
//! - `GET /` et `GET /index.html` -> `<web>/index.html`
//! - `GET /static/<chemin>` -> fichiers sous `<web>/`
//! - tout le reste -> `404`
//!
//! Le serveur ne fait que transporter : toute la décision est dans `noyau::evaluer`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::http::header::CONTENT_LENGTH;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::noyau::evaluer;

/// Configuration du serveur (arguments ou variables d’environnement).
#[derive(clap::Parser, Debug, Clone)]
#[command(name = "serveur")]
#[command(about = "Calculatrice sûre : API JSON + interface web")]
pub struct ConfigServeur {
    /// Adresse TCP d’écoute
    #[arg(long, env = "CALCULATRICE_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Dossier des fichiers statiques (index.html, app.js, style.css)
    #[arg(long, env = "CALCULATRICE_WEB", default_value = "web")]
    pub web_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum ErreurServeur {
    #[error("dossier web introuvable : {}", .0.display())]
    DossierWebAbsent(PathBuf),

    #[error("impossible d’écouter sur {adresse} : {source}")]
    Liaison {
        adresse: SocketAddr,
        source: std::io::Error,
    },

    #[error("erreur serveur : {0}")]
    Service(#[source] std::io::Error),
}

/// Corps d’une réponse refusée.
#[derive(Debug, Serialize)]
pub struct ReponseErreur {
    #[serde(rename = "error")]
    pub erreur: String,
}

/// Routes de l’application (sans écoute réseau : testable en mémoire).
pub fn routeur(dossier_web: &Path) -> Router {
    let index = dossier_web.join("index.html");

    Router::new()
        .route("/api/eval", post(api_eval).fallback(non_trouve))
        .route_service("/", ServeFile::new(&index))
        .route_service("/index.html", ServeFile::new(&index))
        .nest_service("/static", ServeDir::new(dossier_web))
        .fallback(non_trouve)
        .layer(TraceLayer::new_for_http())
}

/// Écoute et sert jusqu’à l’arrêt du processus.
pub async fn servir(config: ConfigServeur) -> Result<(), ErreurServeur> {
    if !config.web_dir.is_dir() {
        return Err(ErreurServeur::DossierWebAbsent(config.web_dir));
    }

    let app = routeur(&config.web_dir);

    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ErreurServeur::Liaison {
            adresse: config.bind,
            source,
        })?;

    info!("Fichiers statiques : {}", config.web_dir.display());
    info!("Calculatrice : http://{}", config.bind);

    axum::serve(listener, app)
        .await
        .map_err(ErreurServeur::Service)
}

/* ------------------------ Handlers ------------------------ */

/// POST `/api/eval`.
///
/// Le corps est lu en octets pour contrôler nous-mêmes les refus
/// (Content-Length absent, JSON invalide) et toujours répondre en JSON.
async fn api_eval(headers: HeaderMap, corps: Bytes) -> Response {
    let longueur = match headers.get(CONTENT_LENGTH) {
        None => return refus("Content-Length manquant"),
        Some(v) => v.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()),
    };
    if longueur.is_none() {
        return refus("Content-Length invalide");
    }

    let requete: Value = match serde_json::from_slice(&corps) {
        Ok(v) => v,
        Err(err) => {
            debug!("JSON invalide : {err}");
            return refus("JSON invalide");
        }
    };

    let Some(objet) = requete.as_object() else {
        return refus("JSON invalide : objet attendu");
    };

    // Une chaîne est prise telle quelle ; tout autre JSON est converti en texte
    // (et sera refusé par le noyau s’il n’a rien d’arithmétique).
    let expression = match objet.get("expression") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(autre) => autre.to_string(),
    };

    match evaluer(&expression) {
        Ok(r) => {
            debug!(valeur = r.valeur, "expression évaluée");
            (StatusCode::OK, Json(r)).into_response()
        }
        Err(e) => {
            debug!(genre = e.genre(), "expression refusée : {e}");
            refus(e.to_string())
        }
    }
}

async fn non_trouve() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn refus(message: impl Into<String>) -> Response {
    let corps = ReponseErreur {
        erreur: message.into(),
    };
    (StatusCode::BAD_REQUEST, Json(corps)).into_response()
}

//! REST API for the pricing engine.
//!
//! Thin transport layer: every route forwards to the pure pricing engine and
//! serializes the result. Engine errors and malformed requests translate to
//! a structured error envelope.

use crate::core::pricing::round_to;
use crate::core::PricingEngine;
use crate::domain::model::PriceResult;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Custom rejection for inputs the engine refuses.
#[derive(Debug)]
struct InvalidInputError(ErrorResponse);

impl warp::reject::Reject for InvalidInputError {}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Price calculation request body; both fields default to 0
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub total_supply_kwh: f64,
    #[serde(default)]
    pub total_demand_kwh: f64,
}

/// Success envelope around a priced result
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub success: bool,
    pub data: PriceResult,
    pub calculated_at: String,
}

/// Pricing configuration echo
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub base_price: f64,
    pub base_price_source: String,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    pub min_possible_price: f64,
    pub max_possible_price: f64,
}

/// Error envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

fn error_response(code: &str, message: String, details: Option<serde_json::Value>) -> ErrorResponse {
    ErrorResponse {
        error: ErrorDetail {
            code: code.to_string(),
            message,
            details,
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

fn health_reply() -> warp::reply::Json {
    warp::reply::json(&HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: VERSION.to_string(),
    })
}

/// Calculate the price for the supply/demand reported by the caller
pub async fn calculate_price(
    request: PriceRequest,
    engine: Arc<PricingEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match engine.compute_price(request.total_supply_kwh, request.total_demand_kwh) {
        Ok(data) => {
            tracing::debug!(
                "Priced supply={} demand={} at {}",
                data.supply_kwh,
                data.demand_kwh,
                data.final_price
            );
            Ok(warp::reply::json(&PriceResponse {
                success: true,
                data,
                calculated_at: chrono::Utc::now().to_rfc3339(),
            }))
        }
        Err(e) => {
            tracing::warn!("Rejected price calculation: {}", e);
            Err(warp::reject::custom(InvalidInputError(error_response(
                "INVALID_INPUT",
                e.to_string(),
                Some(serde_json::json!({
                    "total_supply_kwh": request.total_supply_kwh,
                    "total_demand_kwh": request.total_demand_kwh,
                })),
            ))))
        }
    }
}

/// Current price with no supply/demand input, i.e. the base price
pub async fn get_current_price(
    engine: Arc<PricingEngine>,
) -> Result<impl warp::Reply, warp::Rejection> {
    calculate_price(
        PriceRequest {
            total_supply_kwh: 0.0,
            total_demand_kwh: 0.0,
        },
        engine,
    )
    .await
}

/// Report the pricing configuration and the derived price bounds
pub async fn get_config(engine: Arc<PricingEngine>) -> Result<impl warp::Reply, warp::Rejection> {
    let config = engine.config();

    let response = ConfigResponse {
        base_price: config.base_price,
        base_price_source: config.base_price_source.to_string(),
        min_multiplier: config.min_multiplier,
        max_multiplier: config.max_multiplier,
        min_possible_price: round_to(config.base_price * config.min_multiplier, 2),
        max_possible_price: round_to(config.base_price * config.max_multiplier, 2),
    };

    Ok(warp::reply::json(&response))
}

/// Translate rejections into the error envelope
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, response) = if let Some(InvalidInputError(response)) = err.find::<InvalidInputError>()
    {
        (StatusCode::BAD_REQUEST, response.clone())
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            error_response("NOT_FOUND", "Resource not found".to_string(), None),
        )
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (
            StatusCode::BAD_REQUEST,
            error_response("MALFORMED_BODY", e.to_string(), None),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            error_response("METHOD_NOT_ALLOWED", "Method not allowed".to_string(), None),
        )
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_response("INTERNAL_ERROR", "Internal server error".to_string(), None),
        )
    };

    Ok(warp::reply::with_status(warp::reply::json(&response), status))
}

/// Create REST API routes
pub fn create_routes(
    engine: Arc<PricingEngine>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let engine_filter = warp::any().map(move || engine.clone());

    // Health check at the root and at /health
    let root = warp::path::end().and(warp::get()).map(health_reply);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(health_reply);

    // Configuration echo endpoint
    let config = warp::path("config")
        .and(warp::path::end())
        .and(warp::get())
        .and(engine_filter.clone())
        .and_then(|engine: Arc<PricingEngine>| async move { get_config(engine).await });

    // Price calculation endpoint
    let calculate = warp::path("price")
        .and(warp::path("calculate"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(|request: PriceRequest, engine: Arc<PricingEngine>| async move {
            calculate_price(request, engine).await
        });

    // Current price endpoint (no supply/demand input)
    let current = warp::path("price")
        .and(warp::path("current"))
        .and(warp::path::end())
        .and(warp::get())
        .and(engine_filter)
        .and_then(|engine: Arc<PricingEngine>| async move { get_current_price(engine).await });

    root.or(health)
        .or(config)
        .or(calculate)
        .or(current)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST", "OPTIONS"]),
        )
}

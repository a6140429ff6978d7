//! Payment order routes.
//!
//! Order creation proxies to the payment provider; validation recomputes the
//! checkout signature server-side and rejects anything that does not match.
//! A client-reported confirmation is never trusted on its own.

use axum::{extract::Extension, Json};
use razorpay::Order;
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

pub async fn create_order(
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    if req.amount == 0 {
        return Err(ApiError::BadRequest("Amount must be positive".to_string()));
    }

    let order = state
        .razorpay
        .create_order(req.amount, &req.currency, &req.receipt)
        .await?;
    tracing::info!(order_id = %order.id, amount = order.amount, "Payment order created");

    Ok(Json(order))
}

#[derive(Debug, Deserialize)]
pub struct ValidateOrderRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOrderResponse {
    pub msg: String,
    pub order_id: String,
    pub payment_id: String,
}

pub async fn validate_order(
    Extension(state): Extension<AppState>,
    Json(req): Json<ValidateOrderRequest>,
) -> Result<Json<ValidateOrderResponse>, ApiError> {
    let valid = state.razorpay.verify_payment_signature(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    );

    if !valid {
        tracing::warn!(order_id = %req.razorpay_order_id, "Payment signature mismatch");
        return Err(ApiError::BadRequest(
            "Transaction is not legit!".to_string(),
        ));
    }

    tracing::info!(order_id = %req.razorpay_order_id, "Payment confirmed");

    Ok(Json(ValidateOrderResponse {
        msg: "success".to_string(),
        order_id: req.razorpay_order_id,
        payment_id: req.razorpay_payment_id,
    }))
}

// https://razorpay.com/docs/api/orders/ - create + client-side checkout callback verification

use std::collections::HashMap;

pub mod models;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use thiserror::Error;

pub use crate::models::{ApiErrorBody, Order};

const API_BASE: &str = "https://api.razorpay.com/v1";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum RazorpayError {
    #[error("request to Razorpay failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Razorpay returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct RazorpayOptions {
    pub key_id: String,
    pub key_secret: String,
}

#[derive(Debug, Clone)]
pub struct RazorpayService {
    options: RazorpayOptions,
    client: Client,
}

impl RazorpayService {
    pub fn new(options: RazorpayOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Create an order for the given amount (smallest currency unit).
    ///
    /// The returned order id is handed to the checkout widget on the client;
    /// the provider reports back the order id, a payment id, and a signature
    /// which must be checked with [`verify_payment_signature`].
    ///
    /// [`verify_payment_signature`]: RazorpayService::verify_payment_signature
    pub async fn create_order(
        &self,
        amount: u64,
        currency: &str,
        receipt: &str,
    ) -> Result<Order, RazorpayError> {
        let url = format!("{API_BASE}/orders");

        let mut body: HashMap<&str, serde_json::Value> = HashMap::new();
        body.insert("amount", amount.into());
        body.insert("currency", currency.into());
        body.insert("receipt", receipt.into());

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.key_id, Some(&self.options.key_secret))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the structured error description when the body parses.
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body
                    .error
                    .description
                    .or(body.error.code)
                    .unwrap_or_else(|| "unknown error".to_string()),
                Err(_) => "unknown error".to_string(),
            };
            return Err(RazorpayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<Order>().await.map_err(Into::into)
    }

    /// Compute the checkout callback signature for an order/payment pair.
    ///
    /// Hex-encoded HMAC-SHA256 over `"{order_id}|{payment_id}"` keyed with
    /// the API secret, as produced by the provider's checkout callback.
    pub fn payment_signature(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.options.key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verify a client-reported checkout signature.
    ///
    /// Comparison happens on the raw MAC bytes (constant time); a signature
    /// that is not valid hex never verifies.
    pub fn verify_payment_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool {
        let Ok(reported) = hex::decode(signature) else {
            return false;
        };

        let mut mac = HmacSha256::new_from_slice(self.options.key_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        mac.verify_slice(&reported).is_ok()
    }
}

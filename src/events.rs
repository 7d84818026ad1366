// SPDX-License-Identifier: MPL-2.0
//! Inbound storefront events and their translation into notifications.
//!
//! Events arrive either typed ([`StorefrontEvent`]) or as JSON envelopes of
//! the form `{"event": "<name>", "detail": {...}}`, the shape the storefront
//! scripts dispatch. Cart events map to fixed, pre-localized templates.

use crate::config::{CART_EVENT_DURATION_MS, CART_QUANTITY_DURATION_MS};
use crate::error::EventError;
use crate::ui::notifications::{Lifetime, Severity};
use serde::Deserialize;
use serde_json::Value;

/// Generic request to show a notification.
pub const NOTIFICATION_SHOW: &str = "notification:show";
pub const CART_UPDATED: &str = "cart:updated";
pub const CART_ITEM_ADDED: &str = "cart:item-added";
pub const CART_ITEM_REMOVED: &str = "cart:item-removed";
pub const CART_QUANTITY_UPDATED: &str = "cart:quantity-updated";

/// Every event name a session listens to.
pub const EVENT_NAMES: [&str; 5] = [
    NOTIFICATION_SHOW,
    CART_UPDATED,
    CART_ITEM_ADDED,
    CART_ITEM_REMOVED,
    CART_QUANTITY_UPDATED,
];

const CART_UPDATED_MESSAGE: &str = "Panier mis à jour avec succès";

/// An application event that results in a notification.
#[derive(Debug, Clone, PartialEq)]
pub enum StorefrontEvent {
    /// `notification:show {message, type, duration}`.
    ///
    /// A missing type means info; a missing duration means the default one.
    NotificationShow {
        message: String,
        kind: Option<String>,
        lifetime: Option<Lifetime>,
    },
    CartUpdated,
    CartItemAdded { product_name: String },
    CartItemRemoved { product_name: String },
    CartQuantityUpdated { product_name: String },
}

/// What an event asks the manager to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
    /// `None` selects the manager's default duration.
    pub lifetime: Option<Lifetime>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    detail: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShowDetail {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    duration: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductDetail {
    #[serde(rename = "productName")]
    product_name: Option<String>,
}

impl StorefrontEvent {
    /// Returns the event name as dispatched by the storefront.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StorefrontEvent::NotificationShow { .. } => NOTIFICATION_SHOW,
            StorefrontEvent::CartUpdated => CART_UPDATED,
            StorefrontEvent::CartItemAdded { .. } => CART_ITEM_ADDED,
            StorefrontEvent::CartItemRemoved { .. } => CART_ITEM_REMOVED,
            StorefrontEvent::CartQuantityUpdated { .. } => CART_QUANTITY_UPDATED,
        }
    }

    /// Decodes a JSON envelope.
    pub fn from_json(json: &str) -> Result<Self, EventError> {
        let envelope: Envelope =
            serde_json::from_str(json).map_err(|e| EventError::Malformed(e.to_string()))?;
        Self::from_parts(&envelope.event, envelope.detail)
    }

    /// Builds an event from its name and detail payload.
    pub fn from_parts(name: &str, detail: Value) -> Result<Self, EventError> {
        let detail = if detail.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            detail
        };

        match name {
            NOTIFICATION_SHOW => {
                let detail: ShowDetail = decode_detail(detail)?;
                let message = detail.message.ok_or_else(|| EventError::MissingField {
                    event: name.to_string(),
                    field: "message",
                })?;
                let kind = match detail.kind {
                    Some(Value::String(kind)) => Some(kind),
                    _ => None,
                };
                let lifetime = match detail.duration {
                    None | Some(Value::Null) => None,
                    Some(Value::Number(ms)) => ms.as_f64().map(Lifetime::from_millis_f64),
                    Some(other) => {
                        return Err(EventError::Malformed(format!(
                            "duration must be a number, got {}",
                            other
                        )))
                    }
                };
                Ok(StorefrontEvent::NotificationShow {
                    message,
                    kind,
                    lifetime,
                })
            }
            CART_UPDATED => Ok(StorefrontEvent::CartUpdated),
            CART_ITEM_ADDED | CART_ITEM_REMOVED | CART_QUANTITY_UPDATED => {
                let detail: ProductDetail = decode_detail(detail)?;
                let product_name = detail.product_name.ok_or_else(|| EventError::MissingField {
                    event: name.to_string(),
                    field: "productName",
                })?;
                Ok(match name {
                    CART_ITEM_ADDED => StorefrontEvent::CartItemAdded { product_name },
                    CART_ITEM_REMOVED => StorefrontEvent::CartItemRemoved { product_name },
                    _ => StorefrontEvent::CartQuantityUpdated { product_name },
                })
            }
            other => Err(EventError::Unknown(other.to_string())),
        }
    }

    /// Translates the event into the notification it triggers.
    #[must_use]
    pub fn to_request(&self) -> NotificationRequest {
        let cart = Lifetime::from_millis(CART_EVENT_DURATION_MS);
        let (message, severity, lifetime) = match self {
            StorefrontEvent::NotificationShow {
                message,
                kind,
                lifetime,
            } => (
                message.clone(),
                kind.as_deref().map(Severity::from_type).unwrap_or_default(),
                *lifetime,
            ),
            StorefrontEvent::CartUpdated => {
                (CART_UPDATED_MESSAGE.to_string(), Severity::Success, Some(cart))
            }
            StorefrontEvent::CartItemAdded { product_name } => (
                format!("{product_name} ajouté au panier"),
                Severity::Success,
                Some(cart),
            ),
            StorefrontEvent::CartItemRemoved { product_name } => (
                format!("{product_name} supprimé du panier"),
                Severity::Info,
                Some(cart),
            ),
            StorefrontEvent::CartQuantityUpdated { product_name } => (
                format!("Quantité mise à jour pour {product_name}"),
                Severity::Success,
                Some(Lifetime::from_millis(CART_QUANTITY_DURATION_MS)),
            ),
        };
        NotificationRequest {
            message,
            severity,
            lifetime,
        }
    }
}

fn decode_detail<T: for<'de> Deserialize<'de>>(detail: Value) -> Result<T, EventError> {
    serde_json::from_value(detail).map_err(|e| EventError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_added_fills_template() {
        let event = StorefrontEvent::from_json(
            r#"{"event": "cart:item-added", "detail": {"productName": "Rose Oud"}}"#,
        )
        .expect("valid event");
        assert_eq!(
            event,
            StorefrontEvent::CartItemAdded {
                product_name: "Rose Oud".to_string()
            }
        );

        let request = event.to_request();
        assert_eq!(request.message, "Rose Oud ajouté au panier");
        assert_eq!(request.severity, Severity::Success);
        assert_eq!(request.lifetime, Some(Lifetime::from_millis(3000)));
    }

    #[test]
    fn cart_templates() {
        let product = || "Ambre Noir".to_string();
        let cases = [
            (
                StorefrontEvent::CartUpdated,
                "Panier mis à jour avec succès",
                Severity::Success,
                3000,
            ),
            (
                StorefrontEvent::CartItemRemoved {
                    product_name: product(),
                },
                "Ambre Noir supprimé du panier",
                Severity::Info,
                3000,
            ),
            (
                StorefrontEvent::CartQuantityUpdated {
                    product_name: product(),
                },
                "Quantité mise à jour pour Ambre Noir",
                Severity::Success,
                2500,
            ),
        ];
        for (event, message, severity, ms) in cases {
            let request = event.to_request();
            assert_eq!(request.message, message);
            assert_eq!(request.severity, severity);
            assert_eq!(request.lifetime, Some(Lifetime::from_millis(ms)));
        }
    }

    #[test]
    fn cart_updated_needs_no_detail() {
        let event = StorefrontEvent::from_json(r#"{"event": "cart:updated"}"#).expect("valid");
        assert_eq!(event, StorefrontEvent::CartUpdated);
        assert_eq!(event.name(), CART_UPDATED);
    }

    #[test]
    fn generic_show_carries_type_and_duration() {
        let event = StorefrontEvent::from_json(
            r#"{"event": "notification:show", "detail": {"message": "Adresse enregistrée", "type": "warning", "duration": 0}}"#,
        )
        .expect("valid");
        let request = event.to_request();
        assert_eq!(request.message, "Adresse enregistrée");
        assert_eq!(request.severity, Severity::Warning);
        assert_eq!(request.lifetime, Some(Lifetime::Persistent));
    }

    #[test]
    fn generic_show_defaults() {
        let event = StorefrontEvent::from_json(
            r#"{"event": "notification:show", "detail": {"message": "Bonjour", "type": 3}}"#,
        )
        .expect("valid");
        let request = event.to_request();
        assert_eq!(request.severity, Severity::Info);
        assert_eq!(request.lifetime, None);
    }

    #[test]
    fn unknown_type_falls_back_to_info() {
        let event = StorefrontEvent::NotificationShow {
            message: "x".into(),
            kind: Some("danger".into()),
            lifetime: None,
        };
        assert_eq!(event.to_request().severity, Severity::Info);
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = StorefrontEvent::from_json(r#"{"event": "cart:item-removed", "detail": {}}"#)
            .expect_err("missing product");
        assert_eq!(
            err,
            EventError::MissingField {
                event: CART_ITEM_REMOVED.to_string(),
                field: "productName",
            }
        );

        let err = StorefrontEvent::from_json(r#"{"event": "notification:show"}"#)
            .expect_err("missing message");
        assert!(matches!(err, EventError::MissingField { field: "message", .. }));
    }

    #[test]
    fn rejects_unknown_and_malformed_events() {
        assert_eq!(
            StorefrontEvent::from_json(r#"{"event": "wishlist:added", "detail": {}}"#),
            Err(EventError::Unknown("wishlist:added".to_string()))
        );
        assert!(matches!(
            StorefrontEvent::from_json("not json"),
            Err(EventError::Malformed(_))
        ));
        assert!(matches!(
            StorefrontEvent::from_json(
                r#"{"event": "notification:show", "detail": {"message": "x", "duration": "soon"}}"#
            ),
            Err(EventError::Malformed(_))
        ));
    }

    #[test]
    fn every_event_name_is_listened_to() {
        for name in EVENT_NAMES {
            let result = StorefrontEvent::from_parts(
                name,
                serde_json::json!({"message": "m", "productName": "p"}),
            );
            assert_eq!(result.map(|e| e.name()), Ok(name));
        }
    }
}

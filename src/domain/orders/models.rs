//! Order Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ProductUuid, orders::errors::OrdersServiceError, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line Item UUID
pub type OrderLineItemUuid = TypedUuid<OrderLineItem>;

/// Fulfilment state of an [`Order`]. Admin-settable; no transition graph is
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// How the customer intends to pay. A label only; no gateway integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Online,
}

/// Order header. Immutable after creation except for `status`.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub address: String,
    pub payment_method: PaymentMethod,
    /// Σ(unit price at checkout × quantity), in minor units.
    pub total_amount: u64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
}

/// One purchased line. `unit_price` is the product's price at checkout time,
/// decoupled from any later catalog repricing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineItem {
    pub uuid: OrderLineItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// An order header together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderLineItem>,
}

/// Checkout request payload. Validated at construction; a blank address
/// never reaches the Order Engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlaceOrder")]
pub struct PlaceOrder {
    address: String,
    payment_method: PaymentMethod,
}

impl PlaceOrder {
    /// Build a validated checkout request.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidAddress`] when the address is
    /// blank.
    pub fn new(
        address: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Result<Self, OrdersServiceError> {
        let address = address.into();

        if address.trim().is_empty() {
            return Err(OrdersServiceError::InvalidAddress);
        }

        Ok(Self {
            address,
            payment_method,
        })
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }
}

/// Wire shape of [`PlaceOrder`]; unknown fields are rejected before any
/// business logic runs.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlaceOrder {
    address: String,
    payment_method: PaymentMethod,
}

impl TryFrom<RawPlaceOrder> for PlaceOrder {
    type Error = OrdersServiceError;

    fn try_from(raw: RawPlaceOrder) -> Result<Self, Self::Error> {
        Self::new(raw.address, raw.payment_method)
    }
}

/// One line of an anonymous cart supplied directly by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Where the Order Engine reads the cart from.
///
/// There is no cart-merge-on-login: the server-held cart and an anonymous
/// snapshot never interact.
#[derive(Debug, Clone, PartialEq)]
pub enum CartSource {
    /// The authenticated user's server-held cart; cleared on success.
    Stored,
    /// Caller-supplied lines from an anonymous session cart; the stored cart
    /// is untouched.
    Snapshot(Vec<SnapshotLine>),
}

//! Wire-level entity models
//!
//! Field names match the backend JSON exactly; timestamps stay as the
//! ISO-8601 strings the backend emits.

pub mod cart;
pub mod message;
pub mod order;
pub mod payment;
pub mod quote;
pub mod rfq;

pub use cart::{Cart, CartItem};
pub use message::{Message, MessageDraft, SenderRole};
pub use order::{Order, OrderItem, OrderSource, OrderStatus, OrderUpdate, PaymentState};
pub use payment::{
    CaptureResult, PaymentProvider, PaymentRecord, PayPalOrderCreated, StripeIntentCreated,
};
pub use quote::{Quote, QuoteDraft, QuoteStatus};
pub use rfq::{Rfq, RfqDraft, RfqPatch, RfqStatus};

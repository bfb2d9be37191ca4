//! Stroke data model and the committed-stroke store.
//!
//! A [`Stroke`] is one continuous pointer-down-to-up drawing action. Strokes are
//! born in the input capture state machine and handed to the [`StrokeStore`]
//! when the pointer is released; from then on the store owns them and its
//! insertion order is the paint order.

pub mod model;
pub mod store;

pub use model::{Point, Stroke, StrokeId, effective_pressure, width_for_pressure};
pub use store::{
    StoreError, StoreEvent, StrokeOrigin, StrokeStore, SubscriptionId, ToolSettings,
};

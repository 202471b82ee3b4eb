//! Pano Core
//!
//! Foundational primitives shared by the Pano scroll stack:
//!
//! - **Geometry**: main-axis aware rectangles for viewport and item bounds
//! - **Input Events**: wheel, touch and native scroll events with timestamps
//! - **State Machines**: typed transition tables for lifecycle and motion states
//! - **Channels**: single-threaded subscriber registries with unsubscribe handles
//!
//! # Example
//!
//! ```rust
//! use pano_core::subscription::Channel;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let channel: Channel<f32> = Channel::new();
//! let seen = Rc::new(Cell::new(0.0));
//!
//! let seen_in_cb = seen.clone();
//! let subscription = channel.subscribe(move |value| seen_in_cb.set(*value));
//!
//! channel.emit(&0.5);
//! assert_eq!(seen.get(), 0.5);
//!
//! subscription.unsubscribe();
//! channel.emit(&1.0);
//! assert_eq!(seen.get(), 0.5);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod subscription;

pub use error::{PanoError, Result};
pub use events::{DeltaMode, EventData, EventType, InputEvent};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Axis, Rect};
pub use subscription::{Channel, Subscription, SubscriberId};

//! Stateless typing operations.
//!
//! Every operation maps a [`TypingContext`] (configuration, a read-only
//! model view and the language rules), the current [`CursorState`] and the
//! event data to one [`EditOperationResult`]. Nothing is mutated here; an
//! external applier consumes the returned [`EditCommand`].
//!
//! ```ignore
//! use the_typing::{typing, CursorState, TypingContext};
//!
//! let ctx = TypingContext::new(&config, &model, &rules);
//! let result = typing::type_with_interceptors(&ctx, &cursor, "(");
//! if let Some(command) = result.command() {
//!   model.apply(command)?;
//! }
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod command;
pub mod config;
pub mod context;
pub mod edit;
pub mod enter;
pub mod lines;
pub mod model;
pub mod movement;
pub mod position;
pub mod result;
pub mod rules;
pub mod selection;
pub mod shift;
pub mod tab;
pub mod typing;

pub use command::EditCommand;
pub use config::TypingConfig;
pub use context::TypingContext;
pub use position::{
  Position,
  Range,
};
pub use result::{
  CursorChangeReason,
  EditOperationResult,
};
pub use selection::{
  CursorState,
  Selection,
};

pub type Tendril = SmartString<LazyCompact>;

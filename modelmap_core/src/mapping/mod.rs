//! Normalization of model identifiers onto a shared namespace
//!
//! The pieces build on each other: [`canonical`] extracts cross-reference tokens,
//! [`transport`] classifies reactions, [`dedup`] combines both into final reaction ids and
//! [`mapper`] runs a whole model through a translator and produces the [`record`] tables.
pub mod canonical;
pub mod dedup;
pub mod mapper;
pub mod record;
pub mod transport;

//! Reply construction.
//!
//! - `selector`: Turns a classification into reply text and navigation actions
//! - `personality`: Optional emoji decoration

mod personality;
mod selector;

pub use personality::{Mood, Personality, strip_decoration};
pub use selector::{Reply, ResponseSelector};

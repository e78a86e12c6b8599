/// Remote generation client
///
/// The try-on synthesis itself runs in a hosted edge function.
/// This module only knows how to submit a payload and read back
/// the result image or an error.

pub mod tryon;

pub use tryon::{GenerateError, TryOnClient, TryOnRequest};

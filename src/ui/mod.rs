/// View helpers
///
/// - intake.rs: the reusable image intake widget (no knowledge of `Message`)
/// - result.rs: the result panel
/// - toast.rs: the notification stack

pub mod intake;
pub mod result;
pub mod toast;

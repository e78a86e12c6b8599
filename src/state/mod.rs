/// State management module
///
/// This module handles all application state, including:
/// - Image values and slots (data.rs)
/// - The try-on workflow controller (workflow.rs)
/// - The notification queue (notify.rs)

pub mod data;
pub mod notify;
pub mod workflow;

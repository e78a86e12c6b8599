/// Image intake module
///
/// This module handles:
/// - Gating dropped files on their declared content type
/// - Converting picked/dropped files into embeddable data URLs
/// - Tracking drag state and which slot a drop belongs to
/// - Discarding reads that were superseded before they finished

pub mod drag;
pub mod loader;

/// Try-on workflow controller
///
/// Owns the two selected images, the styling instruction and the
/// generated result, and decides what the result panel shows.
/// It never performs I/O: `begin_generate` hands back the request to
/// send and `finish` consumes whatever the generator answered.
use thiserror::Error;

use super::data::{ImageSlot, ImageValue};
use super::notify::Notification;
use crate::client::{GenerateError, TryOnRequest};

const FALLBACK_FAILURE: &str = "Failed to generate try-on. Please try again.";

/// What the result panel is showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderState<'a> {
    Empty,
    Loading,
    Success(&'a ImageValue),
}

/// Identifies one submission, so late answers can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

/// Why the generate action did not start a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateRejected {
    #[error("a try-on is already being generated")]
    Busy,
    #[error("Please upload both your photo and the outfit image.")]
    MissingImages,
}

impl GenerateRejected {
    /// Notification to show, if any. A busy trigger is simply ignored.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            GenerateRejected::Busy => None,
            GenerateRejected::MissingImages => {
                Some(Notification::destructive("Missing Images", self.to_string()))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Workflow {
    source: Option<ImageValue>,
    outfit: Option<ImageValue>,
    prompt: String,
    result: Option<ImageValue>,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what an intake widget reported for its slot
    ///
    /// `None` means the image was removed.
    pub fn report_selection(&mut self, slot: ImageSlot, value: Option<ImageValue>) {
        tracing::debug!(?slot, present = value.is_some(), "image selection reported");
        match slot {
            ImageSlot::Source => self.source = value,
            ImageSlot::Outfit => self.outfit = value,
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&ImageValue> {
        match slot {
            ImageSlot::Source => self.source.as_ref(),
            ImageSlot::Outfit => self.outfit.as_ref(),
        }
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Both required images are present
    pub fn is_ready(&self) -> bool {
        self.source.is_some() && self.outfit.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the generate trigger should be enabled
    pub fn can_generate(&self) -> bool {
        self.is_ready() && !self.is_loading()
    }

    pub fn result(&self) -> Option<&ImageValue> {
        self.result.as_ref()
    }

    pub fn render_state(&self) -> RenderState<'_> {
        if self.is_loading() {
            RenderState::Loading
        } else if let Some(result) = &self.result {
            RenderState::Success(result)
        } else {
            RenderState::Empty
        }
    }

    /// Start a submission
    ///
    /// On success the previous result is gone, the controller is loading
    /// and the returned request must be sent exactly once.
    pub fn begin_generate(&mut self) -> Result<(RequestId, TryOnRequest), GenerateRejected> {
        if self.is_loading() {
            return Err(GenerateRejected::Busy);
        }

        let (Some(source), Some(outfit)) = (&self.source, &self.outfit) else {
            return Err(GenerateRejected::MissingImages);
        };

        let request = TryOnRequest {
            base_image: source.url().clone(),
            outfit_image: outfit.url().clone(),
            user_prompt: self.prompt.clone(),
        };

        self.result = None;
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.in_flight = Some(id);

        tracing::info!(request = id.0, "try-on generation started");
        Ok((id, request))
    }

    /// Apply the generator's answer for request `id`
    ///
    /// Answers for anything but the in-flight request are dropped.
    /// The result arrives with its preview already decoded.
    pub fn finish(
        &mut self,
        id: RequestId,
        outcome: Result<ImageValue, GenerateError>,
    ) -> Option<Notification> {
        if self.in_flight != Some(id) {
            tracing::debug!(request = id.0, "dropping stale try-on result");
            return None;
        }
        self.in_flight = None;

        match outcome {
            Ok(image) => {
                tracing::info!(request = id.0, mime = image.url().mime(), "try-on ready");
                self.result = Some(image);
                Some(Notification::success("Success!", "Your virtual try-on is ready!"))
            }
            Err(error) => {
                tracing::warn!(request = id.0, %error, "try-on generation failed");
                let description = error
                    .message()
                    .unwrap_or_else(|| FALLBACK_FAILURE.to_string());
                Some(Notification::destructive("Generation Failed", description))
            }
        }
    }

    /// Abandon the in-flight submission, if there is one
    pub fn cancel(&mut self) -> Option<Notification> {
        let id = self.in_flight.take()?;
        tracing::info!(request = id.0, "try-on generation cancelled");
        Some(Notification::info(
            "Generation Cancelled",
            "The try-on request was stopped. You can generate again at any time.",
        ))
    }
}

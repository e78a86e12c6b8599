use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{event, task, time, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod client;
mod config;
mod download;
mod intake;
mod state;
mod ui;

use client::{GenerateError, TryOnClient};
use download::DownloadError;
use intake::drag::{DragState, Tickets};
use intake::loader::{self, Admission, IntakeError, IntakeSource, IMAGE_EXTENSIONS};
use state::data::{ImageSlot, ImageValue};
use state::notify::{Notification, Notifications};
use state::workflow::{RequestId, Workflow};
use ui::intake::IntakeEvents;

/// Main application state
struct FitRoom {
    /// Selected images, styling instruction and result
    workflow: Workflow,
    /// Notifications currently on screen
    notifications: Notifications,
    drag: DragState,
    tickets: Tickets,
    client: TryOnClient,
    /// Abort handle of the running generation, if any
    generation: Option<task::Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked an upload target
    PickImage(ImageSlot),
    /// Files are being dragged over the window
    FileHovered,
    FileDropped(PathBuf),
    FilesHoveredLeft,
    PointerEntered(ImageSlot),
    PointerLeft(ImageSlot),
    /// Background file conversion completed
    ImageLoaded {
        slot: ImageSlot,
        ticket: u64,
        result: Result<ImageValue, IntakeError>,
    },
    RemoveImage(ImageSlot),
    PromptChanged(String),
    /// User clicked "Generate Try-On"
    Generate,
    /// The generator answered
    Generated(RequestId, Result<ImageValue, GenerateError>),
    Cancel,
    Download,
    Downloaded(Result<PathBuf, DownloadError>),
    DismissNotification(u64),
    /// Periodic check for expired notifications
    Tick,
}

impl FitRoom {
    /// Create a new instance of the application
    fn new(config: config::Config, client: TryOnClient) -> (Self, Task<Message>) {
        tracing::info!(endpoint = client.endpoint(), "FitRoom initialized");

        let notifications =
            Notifications::new(config.notification_limit, config.notification_ttl());

        (
            FitRoom {
                workflow: Workflow::new(),
                notifications,
                drag: DragState::default(),
                tickets: Tickets::default(),
                client,
                generation: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage(slot) => {
                // The chooser only offers image files
                let file = FileDialog::new()
                    .set_title(format!("Select {}", slot.label()))
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.intake(slot, path, IntakeSource::Picker),
                    None => Task::none(),
                }
            }
            Message::FileHovered => {
                self.drag.files_hovered();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag.files_left();
                Task::none()
            }
            Message::FileDropped(path) => {
                if !self.drag.dropped() {
                    tracing::debug!(path = %path.display(), "ignoring extra file in drop");
                    return Task::none();
                }

                let workflow = &self.workflow;
                match self.drag.drop_target(|slot| workflow.image(slot).is_none()) {
                    Some(slot) => self.intake(slot, path, IntakeSource::DragDrop),
                    None => {
                        tracing::debug!(path = %path.display(), "drop landed outside an upload target");
                        Task::none()
                    }
                }
            }
            Message::PointerEntered(slot) => {
                self.drag.pointer_entered(slot);
                Task::none()
            }
            Message::PointerLeft(slot) => {
                self.drag.pointer_left(slot);
                Task::none()
            }
            Message::ImageLoaded {
                slot,
                ticket,
                result,
            } => {
                if !self.tickets.is_current(slot, ticket) {
                    tracing::debug!(?slot, ticket, "discarding superseded image read");
                    return Task::none();
                }

                match result {
                    Ok(value) => {
                        tracing::info!(?slot, mime = value.url().mime(), len = value.url().encoded_len(), "image selected");
                        self.workflow.report_selection(slot, Some(value));
                    }
                    Err(error) => {
                        tracing::warn!(?slot, %error, "failed to read image");
                        self.notify(Notification::destructive(
                            "Couldn't read image",
                            error.to_string(),
                        ));
                    }
                }
                Task::none()
            }
            Message::RemoveImage(slot) => {
                self.tickets.invalidate(slot);
                self.workflow.report_selection(slot, None);
                Task::none()
            }
            Message::PromptChanged(prompt) => {
                self.workflow.set_prompt(prompt);
                Task::none()
            }
            Message::Generate => match self.workflow.begin_generate() {
                Ok((id, request)) => {
                    let client = self.client.clone();
                    let (task, handle) = Task::perform(
                        async move { client.generate_image(&request).await },
                        move |result| Message::Generated(id, result),
                    )
                    .abortable();

                    self.generation = Some(handle);
                    task
                }
                Err(rejected) => {
                    if let Some(notification) = rejected.notification() {
                        self.notify(notification);
                    }
                    Task::none()
                }
            },
            Message::Generated(id, result) => {
                if let Some(notification) = self.workflow.finish(id, result) {
                    self.notify(notification);
                }
                if !self.workflow.is_loading() {
                    self.generation = None;
                }
                Task::none()
            }
            Message::Cancel => {
                if let Some(handle) = self.generation.take() {
                    handle.abort();
                }
                if let Some(notification) = self.workflow.cancel() {
                    self.notify(notification);
                }
                Task::none()
            }
            Message::Download => {
                let Some(result) = self.workflow.result() else {
                    return Task::none();
                };
                let url = result.url().clone();

                match download::choose_destination() {
                    Some(path) => Task::perform(download::save_png(url, path), Message::Downloaded),
                    None => Task::none(),
                }
            }
            Message::Downloaded(Ok(path)) => {
                self.notify(Notification::info("Image Saved", path.display().to_string()));
                Task::none()
            }
            Message::Downloaded(Err(error)) => {
                tracing::warn!(%error, "failed to save try-on");
                self.notify(Notification::destructive("Download Failed", error.to_string()));
                Task::none()
            }
            Message::DismissNotification(id) => {
                self.notifications.dismiss(id);
                Task::none()
            }
            Message::Tick => {
                self.notifications.prune(Instant::now());
                Task::none()
            }
        }
    }

    /// Run a file through the content-type gate and start converting it
    fn intake(&mut self, slot: ImageSlot, path: PathBuf, source: IntakeSource) -> Task<Message> {
        if let Admission::Rejected { content_type } = loader::admit(&path, source) {
            tracing::warn!(path = %path.display(), %content_type, "ignoring dropped file that is not an image");
            return Task::none();
        }

        let ticket = self.tickets.issue(slot);
        tracing::info!(?slot, ?source, path = %path.display(), "loading image");

        Task::perform(loader::load_image(path), move |result| Message::ImageLoaded {
            slot,
            ticket,
            result,
        })
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification, Instant::now());
    }

    fn subscription(&self) -> Subscription<Message> {
        let files = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            _ => None,
        });

        let expiry = if self.notifications.is_empty() {
            Subscription::none()
        } else {
            time::every(Duration::from_secs(1)).map(|_| Message::Tick)
        };

        Subscription::batch([files, expiry])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = column![
            text("FitRoom").size(56),
            text("Virtual Try-On Studio").size(24),
            text("See yourself in any outfit instantly with AI-powered fashion technology")
                .size(16),
        ]
        .spacing(8)
        .align_x(Alignment::Center);

        let intakes = Column::with_children(ImageSlot::ALL.into_iter().map(|slot| self.intake_view(slot)))
            .spacing(24);

        let prompt = column![
            text("Styling Instructions (Optional)").size(14),
            text_input("e.g., Make it more formal, adjust fit...", self.workflow.prompt())
                .on_input(Message::PromptChanged)
                .padding(10),
        ]
        .spacing(8);

        let label = if self.workflow.is_loading() {
            "Generating..."
        } else {
            "Generate Try-On"
        };
        let generate = button(container(text(label).size(18)).center_x(Length::Fill))
            .width(Length::Fill)
            .padding(14)
            .on_press_maybe(self.workflow.can_generate().then_some(Message::Generate));

        let inputs = column![intakes, prompt, generate]
            .spacing(24)
            .width(Length::FillPortion(1));

        let output = column![
            text("Your Virtual Try-On").size(28),
            ui::result::view(self.workflow.render_state()),
        ]
        .spacing(24)
        .width(Length::FillPortion(1));

        let content = column![
            header,
            ui::toast::view(&self.notifications),
            row![inputs, output].spacing(32),
        ]
        .spacing(32)
        .padding(40)
        .max_width(1200);

        container(scrollable(container(content).center_x(Length::Fill)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn intake_view(&self, slot: ImageSlot) -> Element<Message> {
        let workflow = &self.workflow;
        let dragging = self
            .drag
            .is_dragging_over(slot, |slot| workflow.image(slot).is_none());

        ui::intake::view(
            slot,
            workflow.image(slot),
            dragging,
            IntakeEvents {
                pick: Message::PickImage(slot),
                remove: Message::RemoveImage(slot),
                pointer_entered: Message::PointerEntered(slot),
                pointer_left: Message::PointerLeft(slot),
            },
        )
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fitroom=info")),
        )
        .init();

    // The app cannot do anything useful without a generation endpoint
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let client = match TryOnClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            eprintln!("❌ Failed to build HTTP client: {e}");
            std::process::exit(2);
        }
    };

    iced::application("FitRoom - Virtual Try-On Studio", FitRoom::update, FitRoom::view)
        .subscription(FitRoom::subscription)
        .theme(FitRoom::theme)
        .centered()
        .run_with(move || FitRoom::new(config, client))
}

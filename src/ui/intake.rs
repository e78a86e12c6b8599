/// Image intake widget
///
/// Shows an upload target while the slot is empty and a preview with a
/// remove button once an image is selected. The widget holds no state of
/// its own: it reports every interaction through the messages it is given.
use iced::widget::{button, column, container, image, mouse_area, text};
use iced::{Alignment, Border, ContentFit, Element, Length, Theme};

use crate::state::data::{ImageSlot, ImageValue};

/// Messages the widget emits
#[derive(Debug, Clone)]
pub struct IntakeEvents<Message> {
    /// The upload target was clicked
    pub pick: Message,
    /// The remove button was pressed
    pub remove: Message,
    pub pointer_entered: Message,
    pub pointer_left: Message,
}

pub fn view<'a, Message: Clone + 'a>(
    slot: ImageSlot,
    value: Option<&'a ImageValue>,
    dragging: bool,
    events: IntakeEvents<Message>,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match value {
        None => {
            let hint = column![
                text("+").size(40),
                text("Drag and drop or click to upload").size(14),
            ]
            .spacing(12)
            .align_x(Alignment::Center);

            let target = container(hint)
                .width(Length::Fill)
                .padding(32)
                .center_x(Length::Fill)
                .style(move |theme: &Theme| upload_target(theme, dragging));

            mouse_area(target).on_press(events.pick).into()
        }
        Some(value) => {
            let preview = image(value.preview().clone())
                .width(Length::Fill)
                .height(Length::Fixed(256.0))
                .content_fit(ContentFit::Cover);

            column![
                preview,
                button(text("Remove"))
                    .style(button::danger)
                    .on_press(events.remove),
            ]
            .spacing(8)
            .align_x(Alignment::End)
            .into()
        }
    };

    let content = column![text(slot.label()).size(14), body].spacing(12);

    mouse_area(content)
        .on_enter(events.pointer_entered)
        .on_exit(events.pointer_left)
        .into()
}

/// Dashed-box look of the upload target, highlighted while dragging
fn upload_target(theme: &Theme, dragging: bool) -> container::Style {
    let palette = theme.extended_palette();

    let (border_color, background) = if dragging {
        (
            palette.primary.strong.color,
            Some(palette.primary.weak.color.scale_alpha(0.2).into()),
        )
    } else {
        (palette.background.strong.color, None)
    };

    container::Style {
        background,
        border: Border {
            color: border_color,
            width: 2.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// Notification stack
use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};

use crate::state::notify::{Notifications, Shown, Variant};
use crate::Message;

pub fn view(notifications: &Notifications) -> Element<'_, Message> {
    Column::with_children(notifications.iter().map(toast))
        .spacing(8)
        .width(Length::Fill)
        .into()
}

fn toast(shown: &Shown) -> Element<'_, Message> {
    let variant = shown.notification.variant;

    let body = column![
        text(&shown.notification.title).size(16),
        text(&shown.notification.description).size(14),
    ]
    .spacing(4)
    .width(Length::Fill);

    let close = button(text("x"))
        .style(button::text)
        .on_press(Message::DismissNotification(shown.id));

    container(row![body, close].spacing(12).align_y(Alignment::Center))
        .padding(12)
        .width(Length::Fill)
        .style(move |theme: &Theme| style(theme, variant))
        .into()
}

fn style(theme: &Theme, variant: Variant) -> container::Style {
    let palette = theme.extended_palette();
    let pair = match variant {
        Variant::Success => palette.success.base,
        Variant::Info => palette.background.strong,
        Variant::Destructive => palette.danger.base,
    };

    container::Style {
        background: Some(pair.color.into()),
        text_color: Some(pair.text),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Result panel: empty hint, loading message or the generated image
use iced::widget::{button, column, container, image, text};
use iced::{Alignment, Element, Length};

use crate::state::workflow::RenderState;
use crate::Message;

const PANEL_HEIGHT: f32 = 500.0;

pub fn view(state: RenderState<'_>) -> Element<'_, Message> {
    match state {
        RenderState::Empty => centered(
            column![
                text("Upload your images to begin").size(18),
                text("Your AI-powered virtual try-on will appear here").size(14),
            ]
            .spacing(8)
            .align_x(Alignment::Center),
        ),
        RenderState::Loading => centered(
            column![
                text("Creating your perfect look...").size(18),
                text("AI is analyzing your images and styling the perfect outfit for you")
                    .size(14),
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::Cancel),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        ),
        RenderState::Success(result) => column![
            image(result.preview().clone()).width(Length::Fill),
            button(container(text("Download Image")).center_x(Length::Fill))
                .width(Length::Fill)
                .style(button::secondary)
                .on_press(Message::Download),
        ]
        .spacing(16)
        .into(),
    }
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(PANEL_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(PANEL_HEIGHT))
        .into()
}

/// User interface widgets
///
/// - `card.rs` - one catalog card per unit
/// - `filters.rs` - level tabs and the filter bar
/// - `plan.rs` - floor-plan loading and the pan/zoom canvas

pub mod card;
pub mod filters;
pub mod plan;

use iced::widget::{center, container, opaque, stack};
use iced::{Color, Element};

/// Show `content` centered over a dimmed `base`, blocking input to `base`
pub fn modal<'a, Message: 'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(center(opaque(content)).style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }))
    ]
    .into()
}

/// Catalog card for a single unit
use iced::widget::{button, column, container, row, text, Row};
use iced::{Alignment, Border, Color, Element, Length, Theme};

use crate::state::data::Unit;
use crate::Message;

const CARD_WIDTH: f32 = 300.0;
const AVAILABLE: Color = Color::from_rgb(0.09, 0.55, 0.29);
const RESERVED: Color = Color::from_rgb(0.86, 0.15, 0.47);

pub fn unit_card(unit: &Unit) -> Element<'_, Message> {
    let (badge, accent) = if unit.is_reserved() {
        ("Reservado", RESERVED)
    } else {
        ("Disponible", AVAILABLE)
    };

    let head = row![
        button(text(&unit.id).size(16))
            .style(button::text)
            .padding(0)
            .on_press(Message::OpenPlan(unit.id.clone())),
        text(badge).size(13).color(accent),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let details = column![
        row![
            field("Nivel", unit.nivel.to_string()),
            field("Habitaciones", unit.habitaciones.to_string()),
        ]
        .spacing(6),
        row![
            field("Área", format!("{:.2} m²", unit.area_m2)),
            field("Precio", format_usd(unit.precio_usd)),
        ]
        .spacing(6),
    ]
    .spacing(6);

    let mut actions = Row::new().spacing(8);
    if unit.disponible {
        actions = actions
            .push(button("Ver plano").on_press(Message::OpenPlan(unit.id.clone())))
            .push(
                button("Quiero este")
                    .style(button::success)
                    .on_press(Message::Contact(unit.id.clone())),
            );
    }

    container(column![head, details, actions].spacing(10))
        .width(Length::Fixed(CARD_WIDTH))
        .padding(14)
        .style(move |theme: &Theme| container::Style {
            background: Some(theme.extended_palette().background.weak.color.into()),
            border: Border {
                color: accent,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn field<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![text(format!("{}:", label)).size(14), text(value).size(14)]
        .spacing(4)
        .width(Length::FillPortion(1))
        .into()
}

/// Format a price as US dollars with thousands separators.
/// Missing or non-finite prices show as an em dash.
pub fn format_usd(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "—".to_string();
    };

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

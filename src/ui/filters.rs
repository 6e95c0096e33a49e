use iced::widget::{button, column, pick_list, row, text, text_input, Row};
use iced::{Alignment, Element, Length, Theme};
use std::fmt;

use crate::state::filter::{Availability, Criteria, RoomCount};
use crate::Message;

/// Level dropdown entry: `None` is the "Nivel" placeholder meaning any level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChoice(pub Option<i64>);

impl fmt::Display for LevelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(level) => write!(f, "{}", level),
            None => f.write_str("Nivel"),
        }
    }
}

/// Room dropdown entry: `None` is the "Habitaciones" placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomChoice(pub Option<RoomCount>);

impl fmt::Display for RoomChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rooms) => write!(f, "{}", rooms),
            None => f.write_str("Habitaciones"),
        }
    }
}

/// "Todos" plus one tab per level
pub fn level_tabs<'a>(levels: &[i64], selected: Option<i64>) -> Element<'a, Message> {
    let tab = |label: String, level: Option<i64>| {
        let style: fn(&Theme, button::Status) -> button::Style = if selected == level {
            button::primary
        } else {
            button::secondary
        };
        button(text(label))
            .style(style)
            .on_press(Message::TabSelected(level))
    };

    let mut tabs = Row::new().spacing(6).push(tab("Todos".to_string(), None));
    for &level in levels {
        tabs = tabs.push(tab(format!("Nivel {}", level), Some(level)));
    }
    tabs.into()
}

/// Search box, dropdowns, area bounds and the clear button
pub fn filter_bar<'a>(criteria: &'a Criteria, levels: &[i64]) -> Element<'a, Message> {
    let level_options: Vec<LevelChoice> = std::iter::once(LevelChoice(None))
        .chain(levels.iter().map(|&level| LevelChoice(Some(level))))
        .collect();
    let room_options: Vec<RoomChoice> = std::iter::once(RoomChoice(None))
        .chain(RoomCount::ALL.into_iter().map(|rooms| RoomChoice(Some(rooms))))
        .collect();

    let legend = row![
        text("Disponible (verde)").size(13).style(text::success),
        text("Reservado (rosado)").size(13).style(text::danger),
    ]
    .spacing(12);

    let inputs = row![
        text_input("Buscar por ID o descripción...", &criteria.query)
            .on_input(Message::SearchChanged)
            .padding(8)
            .width(Length::Fixed(260.0)),
        pick_list(
            level_options,
            Some(LevelChoice(criteria.level_select)),
            Message::LevelSelected,
        )
        .padding(8),
        pick_list(room_options, Some(RoomChoice(criteria.rooms)), Message::RoomsSelected)
            .padding(8),
        text_input("Área mín. m²", &criteria.area_min)
            .on_input(Message::AreaMinChanged)
            .padding(8)
            .width(Length::Fixed(130.0)),
        text_input("Área máx. m²", &criteria.area_max)
            .on_input(Message::AreaMaxChanged)
            .padding(8)
            .width(Length::Fixed(130.0)),
        pick_list(
            Availability::ALL,
            Some(criteria.availability),
            Message::AvailabilitySelected,
        )
        .padding(8),
        button("Limpiar").on_press(Message::ClearFilters).padding(8),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    column![legend, inputs].spacing(8).into()
}

/// Filter criteria and the derived catalog view
///
/// The derived view is always recomputed from scratch: `filter` is a pure
/// function of the catalog and the criteria, and it keeps catalog order.

use std::fmt;

use super::data::Unit;

/// Availability selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Any,
    AvailableOnly,
    ReservedOnly,
}

impl Availability {
    pub const ALL: [Availability; 3] = [
        Availability::Any,
        Availability::AvailableOnly,
        Availability::ReservedOnly,
    ];

    fn accepts(self, unit: &Unit) -> bool {
        match self {
            Availability::Any => true,
            Availability::AvailableOnly => unit.disponible,
            Availability::ReservedOnly => !unit.disponible,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Availability::Any => "Todos",
            Availability::AvailableOnly => "Solo disponibles",
            Availability::ReservedOnly => "Solo reservados",
        })
    }
}

/// Room-count selector: the catalog only offers 1, 2 or 3 bedrooms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomCount {
    One,
    Two,
    Three,
}

impl RoomCount {
    pub const ALL: [RoomCount; 3] = [RoomCount::One, RoomCount::Two, RoomCount::Three];

    pub fn value(self) -> u32 {
        match self {
            RoomCount::One => 1,
            RoomCount::Two => 2,
            RoomCount::Three => 3,
        }
    }
}

impl fmt::Display for RoomCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The current set of user-specified constraints.
///
/// Area bounds are kept as the raw text the user typed; they are parsed on
/// every evaluation so an invalid entry simply imposes no bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub query: String,
    /// Level picked in the dropdown
    pub level_select: Option<i64>,
    /// Level picked in the tab strip
    pub level_tab: Option<i64>,
    pub rooms: Option<RoomCount>,
    pub area_min: String,
    pub area_max: String,
    pub availability: Availability,
}

impl Criteria {
    /// Reset every field to "no constraint"
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Select a level tab. Picking a tab clears the dropdown, the "all"
    /// tab (`None`) leaves the dropdown alone.
    pub fn select_tab(&mut self, level: Option<i64>) {
        if level.is_some() {
            self.level_select = None;
        }
        self.level_tab = level;
    }

    /// Check whether a single unit satisfies every active constraint
    pub fn matches(&self, unit: &Unit) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !unit.search_text().to_lowercase().contains(&query) {
            return false;
        }

        // Dropdown and tab constrain independently; both may be active
        if self.level_select.is_some_and(|level| unit.nivel != level) {
            return false;
        }
        if self.level_tab.is_some_and(|level| unit.nivel != level) {
            return false;
        }

        if self.rooms.is_some_and(|rooms| unit.habitaciones != rooms.value()) {
            return false;
        }

        if parse_bound(&self.area_min).is_some_and(|min| unit.area_m2 < min) {
            return false;
        }
        if parse_bound(&self.area_max).is_some_and(|max| unit.area_m2 > max) {
            return false;
        }

        self.availability.accepts(unit)
    }
}

/// Derive the filtered view. Catalog order is preserved.
pub fn filter<'a>(catalog: &'a [Unit], criteria: &Criteria) -> Vec<&'a Unit> {
    catalog.iter().filter(|unit| criteria.matches(unit)).collect()
}

/// Parse an area bound the way a browser's `parseFloat` does: leading
/// whitespace is skipped and the longest numeric prefix wins ("40m2" -> 40).
/// Returns None for empty or non-numeric input.
pub fn parse_bound(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return s[..end + "Infinity".len()].replace("Infinity", "inf").parse().ok();
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| !v.is_nan())
}

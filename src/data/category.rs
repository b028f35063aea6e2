//! Category Lookup Module
//! Fixed code → label mappings for season, weekday and weather situation.

use std::fmt;

/// A closed set of labelled codes with an explicit unknown case.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every known variant, in code order.
    const KNOWN: &'static [Self];

    fn from_code(code: i64) -> Self;

    /// Human-readable label, `None` for unknown codes.
    fn label(&self) -> Option<&'static str>;

    /// Reverse lookup by label (case-insensitive).
    fn from_label(label: &str) -> Option<Self> {
        Self::KNOWN.iter().copied().find(|known| {
            known
                .label()
                .is_some_and(|l| l.eq_ignore_ascii_case(label.trim()))
        })
    }

    fn is_known(&self) -> bool {
        self.label().is_some()
    }
}

/// Season of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown(i64),
}

impl Category for Season {
    const KNOWN: &'static [Self] = &[Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    fn from_code(code: i64) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unknown(other),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match self {
            Season::Spring => Some("Spring"),
            Season::Summer => Some("Summer"),
            Season::Fall => Some("Fall"),
            Season::Winter => Some("Winter"),
            Season::Unknown(_) => None,
        }
    }
}

/// Day of the week, coded from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Unknown(i64),
}

impl Weekday {
    /// Display order for weekday charts, Monday first.
    pub const DISPLAY_ORDER: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

impl Category for Weekday {
    const KNOWN: &'static [Self] = &[
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    fn from_code(code: i64) -> Self {
        match code {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            6 => Weekday::Saturday,
            other => Weekday::Unknown(other),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match self {
            Weekday::Sunday => Some("Sunday"),
            Weekday::Monday => Some("Monday"),
            Weekday::Tuesday => Some("Tuesday"),
            Weekday::Wednesday => Some("Wednesday"),
            Weekday::Thursday => Some("Thursday"),
            Weekday::Friday => Some("Friday"),
            Weekday::Saturday => Some("Saturday"),
            Weekday::Unknown(_) => None,
        }
    }
}

/// Weather situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    CloudyMisty,
    LightRainSnow,
    HeavyRainSnow,
    Unknown(i64),
}

impl Category for Weather {
    const KNOWN: &'static [Self] = &[
        Weather::Clear,
        Weather::CloudyMisty,
        Weather::LightRainSnow,
        Weather::HeavyRainSnow,
    ];

    fn from_code(code: i64) -> Self {
        match code {
            1 => Weather::Clear,
            2 => Weather::CloudyMisty,
            3 => Weather::LightRainSnow,
            4 => Weather::HeavyRainSnow,
            other => Weather::Unknown(other),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match self {
            Weather::Clear => Some("Clear"),
            Weather::CloudyMisty => Some("Cloudy/Misty"),
            Weather::LightRainSnow => Some("Light Rain/Snow"),
            Weather::HeavyRainSnow => Some("Heavy Rain/Snow"),
            Weather::Unknown(_) => None,
        }
    }
}

/// The three derived label columns of an enriched row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Labels {
    pub season: Season,
    pub weekday: Weekday,
    pub weather: Weather,
}

/// Label text for tables, with a placeholder for absent labels.
pub fn display_label<C: Category>(category: &C) -> &'static str {
    category.label().unwrap_or("-")
}

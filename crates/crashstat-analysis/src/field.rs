use serde::Serialize;

/// A numeric column of the accident dataset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, Serialize,
)]
pub enum Field {
    /// Length of road affected by the accident, in miles.
    #[display("Distance(mi)")]
    #[serde(rename = "Distance(mi)")]
    Distance,
    /// Visibility at the time of the accident, in miles.
    #[display("Visibility(mi)")]
    #[serde(rename = "Visibility(mi)")]
    Visibility,
    /// Accident severity, 1 (least) to 4 (most).
    #[display("Severity")]
    #[serde(rename = "Severity")]
    Severity,
}

impl Field {
    /// Every column projected from the source.
    pub const ALL: [Self; 3] = [Self::Distance, Self::Visibility, Self::Severity];

    /// The columns the statistics screens report on, in display order.
    pub const ANALYZED: [Self; 2] = [Self::Distance, Self::Visibility];

    /// Header of the CSV column holding this field.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Distance => "Distance(mi)",
            Self::Visibility => "Visibility(mi)",
            Self::Severity => "Severity",
        }
    }

    /// Name without the unit suffix.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Distance => "Distance",
            Self::Visibility => "Visibility",
            Self::Severity => "Severity",
        }
    }
}

//! Column names of the health-outcomes table.

pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const EVENT_DATE: &str = "event_date";

// Derived from `event_date` during normalization
pub const YEAR_OF_EVENT: &str = "year_of_event";
pub const MONTH_OF_EVENT: &str = "month_of_event";

pub const PREGNANCIES: &str = "fertility_nr_pregnancies";
pub const LIVEBIRTHS: &str = "fertility_nr_livebirths";
pub const STILLBIRTHS: &str = "fertility_nr_stillbirths";
pub const MISCARRIAGES: &str = "fertility_nr_miscarriages";
pub const ABORTIONS: &str = "fertility_nr_abortions";
pub const HAS_PREV_PREGNANCIES: &str = "fertility_has_prev_pregnancies";
pub const TWIN_OUTCOMES: &str = "fertility_nr_twin_outcomes";
pub const TWINS_ALIVE: &str = "fertility_nr_twins_alive";
pub const TRIPLET_OUTCOMES: &str = "fertility_nr_triplet_outcomes";
pub const QUADR_OUTCOMES: &str = "fertility_nr_quadr_outcomes";
pub const ALIVE_BOYS: &str = "fertility_nr_alive_boys";
pub const ALIVE_GIRLS: &str = "fertility_nr_alive_girls";

pub const HAS_EDUCATION: &str = "has_education";
pub const HAS_ID_CARD: &str = "has_id_card";
pub const WORK_REGIME: &str = "work_regime";

/// Columns read by the filter or by any chart aggregate.
pub const REQUIRED: [&str; 18] = [
    EVENT_DATE,
    AGE,
    GENDER,
    PREGNANCIES,
    LIVEBIRTHS,
    STILLBIRTHS,
    MISCARRIAGES,
    ABORTIONS,
    HAS_PREV_PREGNANCIES,
    TWIN_OUTCOMES,
    TWINS_ALIVE,
    TRIPLET_OUTCOMES,
    QUADR_OUTCOMES,
    ALIVE_BOYS,
    ALIVE_GIRLS,
    HAS_EDUCATION,
    HAS_ID_CARD,
    WORK_REGIME,
];

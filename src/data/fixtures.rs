//! Raw frames for unit tests.

use crate::data::columns;
use polars::prelude::*;

/// One raw row; fertility counters default to zero.
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub age: Option<i64>,
    pub gender: Option<&'static str>,
    pub event_date: &'static str,
    pub pregnancies: Option<i64>,
    pub livebirths: Option<i64>,
    pub stillbirths: Option<i64>,
    pub miscarriages: Option<i64>,
    pub abortions: Option<i64>,
    pub has_prev_pregnancies: bool,
    pub twin_outcomes: i64,
    pub twins_alive: i64,
    pub triplet_outcomes: i64,
    pub quadr_outcomes: i64,
    pub alive_boys: Option<i64>,
    pub alive_girls: Option<i64>,
    pub has_education: Option<&'static str>,
    pub has_id_card: Option<&'static str>,
    pub work_regime: Option<&'static str>,
}

pub fn record(age: i64, gender: &'static str, event_date: &'static str) -> FixtureRow {
    FixtureRow {
        age: Some(age),
        gender: Some(gender),
        event_date,
        pregnancies: Some(0),
        livebirths: Some(0),
        stillbirths: Some(0),
        miscarriages: Some(0),
        abortions: Some(0),
        has_prev_pregnancies: false,
        twin_outcomes: 0,
        twins_alive: 0,
        triplet_outcomes: 0,
        quadr_outcomes: 0,
        alive_boys: Some(0),
        alive_girls: Some(0),
        has_education: Some("No"),
        has_id_card: Some("No"),
        work_regime: Some("Unemployed"),
    }
}

impl FixtureRow {
    pub fn pregnancies(mut self, n: i64) -> Self {
        self.pregnancies = Some(n);
        self.has_prev_pregnancies = n > 0;
        self
    }

    pub fn outcomes(mut self, livebirths: i64, stillbirths: i64, miscarriages: i64, abortions: i64) -> Self {
        self.livebirths = Some(livebirths);
        self.stillbirths = Some(stillbirths);
        self.miscarriages = Some(miscarriages);
        self.abortions = Some(abortions);
        self
    }

    pub fn multiples(mut self, twin_outcomes: i64, twins_alive: i64, triplets: i64, quadruplets: i64) -> Self {
        self.twin_outcomes = twin_outcomes;
        self.twins_alive = twins_alive;
        self.triplet_outcomes = triplets;
        self.quadr_outcomes = quadruplets;
        self
    }

    pub fn alive(mut self, boys: Option<i64>, girls: Option<i64>) -> Self {
        self.alive_boys = boys;
        self.alive_girls = girls;
        self
    }

    pub fn social(
        mut self,
        has_education: Option<&'static str>,
        has_id_card: Option<&'static str>,
        work_regime: Option<&'static str>,
    ) -> Self {
        self.has_education = has_education;
        self.has_id_card = has_id_card;
        self.work_regime = work_regime;
        self
    }
}

/// Build a raw frame, as the CSV reader would hand it over.
pub fn sample_frame(rows: &[FixtureRow]) -> DataFrame {
    fn ints(name: &str, rows: &[FixtureRow], f: impl Fn(&FixtureRow) -> Option<i64>) -> Column {
        Column::new(name.into(), rows.iter().map(f).collect::<Vec<_>>())
    }
    fn texts(name: &str, rows: &[FixtureRow], f: impl Fn(&FixtureRow) -> Option<&'static str>) -> Column {
        Column::new(name.into(), rows.iter().map(f).collect::<Vec<_>>())
    }

    DataFrame::new(vec![
        ints(columns::AGE, rows, |r| r.age),
        texts(columns::GENDER, rows, |r| r.gender),
        texts(columns::EVENT_DATE, rows, |r| Some(r.event_date)),
        ints(columns::PREGNANCIES, rows, |r| r.pregnancies),
        ints(columns::LIVEBIRTHS, rows, |r| r.livebirths),
        ints(columns::STILLBIRTHS, rows, |r| r.stillbirths),
        ints(columns::MISCARRIAGES, rows, |r| r.miscarriages),
        ints(columns::ABORTIONS, rows, |r| r.abortions),
        // the CSV reader infers True/False text as Boolean
        Column::new(
            columns::HAS_PREV_PREGNANCIES.into(),
            rows.iter().map(|r| r.has_prev_pregnancies).collect::<Vec<_>>(),
        ),
        ints(columns::TWIN_OUTCOMES, rows, |r| Some(r.twin_outcomes)),
        ints(columns::TWINS_ALIVE, rows, |r| Some(r.twins_alive)),
        ints(columns::TRIPLET_OUTCOMES, rows, |r| Some(r.triplet_outcomes)),
        ints(columns::QUADR_OUTCOMES, rows, |r| Some(r.quadr_outcomes)),
        ints(columns::ALIVE_BOYS, rows, |r| r.alive_boys),
        ints(columns::ALIVE_GIRLS, rows, |r| r.alive_girls),
        texts(columns::HAS_EDUCATION, rows, |r| r.has_education),
        texts(columns::HAS_ID_CARD, rows, |r| r.has_id_card),
        texts(columns::WORK_REGIME, rows, |r| r.work_regime),
    ])
    .expect("fixture columns share one length")
}

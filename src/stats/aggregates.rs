//! Chart Aggregates Module
//! The eleven per-chart summaries, each recomputed from the filtered table.

use crate::data::columns;
use crate::data::values::{float_values, int_values, label_values};
use crate::data::FilteredTable;
use crate::stats::{BoxSummary, StatsCalculator};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Values of one measure, optionally restricted to one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub label: String,
    pub values: Vec<f64>,
    pub summary: Option<BoxSummary>,
}

impl Distribution {
    fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        let summary = StatsCalculator::box_summary(&values);
        Self {
            label: label.into(),
            values,
            summary,
        }
    }
}

/// `(x, y)` pairs of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSeries {
    pub group: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct OutcomeTotals {
    pub livebirths: f64,
    pub stillbirths: f64,
    pub miscarriages: f64,
    pub abortions: f64,
}

impl OutcomeTotals {
    /// `(label, total)` in chart order.
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("Live births", self.livebirths),
            ("Stillbirths", self.stillbirths),
            ("Miscarriages", self.miscarriages),
            ("Abortions", self.abortions),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Fraction of the grand total, 0 when the grand total is 0
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: u32,
    pub label: &'static str,
    pub total: f64,
}

/// Everything the chart viewer draws for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardAggregates {
    pub record_count: usize,
    pub pregnancies: Distribution,
    pub livebirths_vs_stillbirths: Vec<PairSeries>,
    pub twin_outcomes_by_gender: Vec<Distribution>,
    pub outcome_totals: OutcomeTotals,
    pub alive_boys_vs_girls: Vec<PairSeries>,
    pub multiple_births: Vec<Distribution>,
    pub pregnancies_by_education: Vec<Distribution>,
    pub livebirths_by_work_regime: Vec<CategoryTotal>,
    pub livebirths_by_id_card: Vec<CategoryShare>,
    pub pregnancies_by_year: Vec<YearTotal>,
    pub pregnancies_by_month: [MonthTotal; 12],
}

impl DashboardAggregates {
    pub fn compute(filtered: &FilteredTable) -> PolarsResult<Self> {
        let df = filtered.dataframe();
        Ok(Self {
            record_count: df.height(),
            pregnancies: pregnancy_distribution(df)?,
            livebirths_vs_stillbirths: livebirths_vs_stillbirths(df)?,
            twin_outcomes_by_gender: twin_outcomes_by_gender(df)?,
            outcome_totals: outcome_totals(df)?,
            alive_boys_vs_girls: alive_boys_vs_girls(df)?,
            multiple_births: multiple_births(df)?,
            pregnancies_by_education: pregnancies_by_education(df)?,
            livebirths_by_work_regime: livebirths_by_work_regime(df)?,
            livebirths_by_id_card: livebirths_by_id_card(df)?,
            pregnancies_by_year: pregnancies_by_year(df)?,
            pregnancies_by_month: pregnancies_by_month(df)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

pub fn pregnancy_distribution(df: &DataFrame) -> PolarsResult<Distribution> {
    Ok(Distribution::new(
        columns::PREGNANCIES,
        present(float_values(df, columns::PREGNANCIES)?),
    ))
}

pub fn livebirths_vs_stillbirths(df: &DataFrame) -> PolarsResult<Vec<PairSeries>> {
    grouped_pairs(
        df,
        columns::HAS_PREV_PREGNANCIES,
        columns::LIVEBIRTHS,
        columns::STILLBIRTHS,
    )
}

pub fn twin_outcomes_by_gender(df: &DataFrame) -> PolarsResult<Vec<Distribution>> {
    grouped_distribution(df, columns::GENDER, columns::TWIN_OUTCOMES)
}

pub fn outcome_totals(df: &DataFrame) -> PolarsResult<OutcomeTotals> {
    Ok(OutcomeTotals {
        livebirths: column_sum(df, columns::LIVEBIRTHS)?,
        stillbirths: column_sum(df, columns::STILLBIRTHS)?,
        miscarriages: column_sum(df, columns::MISCARRIAGES)?,
        abortions: column_sum(df, columns::ABORTIONS)?,
    })
}

pub fn alive_boys_vs_girls(df: &DataFrame) -> PolarsResult<Vec<PairSeries>> {
    grouped_pairs(df, columns::GENDER, columns::ALIVE_BOYS, columns::ALIVE_GIRLS)
}

pub fn multiple_births(df: &DataFrame) -> PolarsResult<Vec<Distribution>> {
    [
        columns::TWINS_ALIVE,
        columns::TRIPLET_OUTCOMES,
        columns::QUADR_OUTCOMES,
    ]
    .iter()
    .map(|&name| Ok(Distribution::new(name, present(float_values(df, name)?))))
    .collect()
}

pub fn pregnancies_by_education(df: &DataFrame) -> PolarsResult<Vec<Distribution>> {
    grouped_distribution(df, columns::HAS_EDUCATION, columns::PREGNANCIES)
}

pub fn livebirths_by_work_regime(df: &DataFrame) -> PolarsResult<Vec<CategoryTotal>> {
    Ok(grouped_sum(df, columns::WORK_REGIME, columns::LIVEBIRTHS)?
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect())
}

pub fn livebirths_by_id_card(df: &DataFrame) -> PolarsResult<Vec<CategoryShare>> {
    let totals = grouped_sum(df, columns::HAS_ID_CARD, columns::LIVEBIRTHS)?;
    let grand_total: f64 = totals.values().sum();
    Ok(totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            share: if grand_total == 0.0 {
                0.0
            } else {
                total / grand_total
            },
        })
        .collect())
}

pub fn pregnancies_by_year(df: &DataFrame) -> PolarsResult<Vec<YearTotal>> {
    let years = int_values(df, columns::YEAR_OF_EVENT)?;
    let pregnancies = float_values(df, columns::PREGNANCIES)?;

    let mut totals: BTreeMap<i64, f64> = BTreeMap::new();
    for (year, value) in years.into_iter().zip(pregnancies) {
        if let Some(year) = year {
            *totals.entry(year).or_default() += value.unwrap_or(0.0);
        }
    }

    Ok(totals
        .into_iter()
        .map(|(year, total)| YearTotal { year, total })
        .collect())
}

/// Always twelve entries, January first; months without records total 0.
pub fn pregnancies_by_month(df: &DataFrame) -> PolarsResult<[MonthTotal; 12]> {
    let months = int_values(df, columns::MONTH_OF_EVENT)?;
    let pregnancies = float_values(df, columns::PREGNANCIES)?;

    let mut totals = [0.0f64; 12];
    for (month, value) in months.into_iter().zip(pregnancies) {
        if let Some(month @ 1..=12) = month {
            totals[(month - 1) as usize] += value.unwrap_or(0.0);
        }
    }

    Ok(std::array::from_fn(|i| MonthTotal {
        month: i as u32 + 1,
        label: MONTH_LABELS[i],
        total: totals[i],
    }))
}

fn present(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().flatten().collect()
}

fn column_sum(df: &DataFrame, name: &str) -> PolarsResult<f64> {
    Ok(float_values(df, name)?.into_iter().flatten().sum())
}

/// Sum of `value_col` per non-null `group_col` label.
fn grouped_sum(df: &DataFrame, group_col: &str, value_col: &str) -> PolarsResult<BTreeMap<String, f64>> {
    let groups = label_values(df, group_col)?;
    let values = float_values(df, value_col)?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (group, value) in groups.into_iter().zip(values) {
        if let Some(group) = group {
            *totals.entry(group).or_default() += value.unwrap_or(0.0);
        }
    }
    Ok(totals)
}

fn grouped_distribution(df: &DataFrame, group_col: &str, value_col: &str) -> PolarsResult<Vec<Distribution>> {
    let groups = label_values(df, group_col)?;
    let values = float_values(df, value_col)?;

    let mut by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (group, value) in groups.into_iter().zip(values) {
        if let (Some(group), Some(value)) = (group, value) {
            by_group.entry(group).or_default().push(value);
        }
    }

    Ok(by_group
        .into_iter()
        .map(|(group, values)| Distribution::new(group, values))
        .collect())
}

fn grouped_pairs(df: &DataFrame, group_col: &str, x_col: &str, y_col: &str) -> PolarsResult<Vec<PairSeries>> {
    let groups = label_values(df, group_col)?;
    let xs = float_values(df, x_col)?;
    let ys = float_values(df, y_col)?;

    let mut by_group: BTreeMap<String, Vec<[f64; 2]>> = BTreeMap::new();
    for ((group, x), y) in groups.into_iter().zip(xs).zip(ys) {
        if let (Some(group), Some(x), Some(y)) = (group, x, y) {
            by_group.entry(group).or_default().push([x, y]);
        }
    }

    Ok(by_group
        .into_iter()
        .map(|(group, points)| PairSeries { group, points })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{record, sample_frame, FixtureRow};
    use crate::data::{filter, normalize, FilterParams, InclusiveRange, NormalizeOptions, NormalizedTable};

    fn table(rows: &[FixtureRow]) -> NormalizedTable {
        normalize(&sample_frame(rows), &NormalizeOptions::default()).unwrap()
    }

    fn unfiltered(table: &NormalizedTable) -> DashboardAggregates {
        let params = FilterParams::unrestricted(table).unwrap();
        DashboardAggregates::compute(&filter(table, &params).unwrap()).unwrap()
    }

    fn cohort() -> NormalizedTable {
        table(&[
            record(22, "F", "2019-01-15")
                .pregnancies(3)
                .outcomes(2, 1, 0, 0)
                .alive(Some(1), Some(1))
                .social(Some("Yes"), Some("Yes"), Some("Farmer")),
            record(28, "M", "2019-03-02")
                .pregnancies(1)
                .outcomes(1, 0, 0, 0)
                .multiples(1, 2, 0, 0)
                .alive(Some(1), None)
                .social(Some("No"), Some("No"), Some("Farmer")),
            record(31, "F", "2020-03-20")
                .pregnancies(5)
                .outcomes(3, 0, 1, 1)
                .multiples(2, 1, 1, 0)
                .alive(Some(2), Some(1))
                .social(Some("Yes"), Some("Yes"), None),
            record(35, "F", "unknown")
                .pregnancies(2)
                .outcomes(2, 0, 0, 0)
                .social(Some("No"), None, Some("Trader")),
        ])
    }

    #[test]
    fn outcome_totals_match_direct_column_sums() {
        let table = table(&[
            record(22, "F", "2019-01-15").outcomes(2, 1, 0, 0),
            record(28, "M", "2019-03-02").outcomes(1, 0, 4, 0),
            record(31, "F", "2020-03-20").outcomes(3, 0, 1, 1),
        ]);
        let totals = unfiltered(&table).outcome_totals;
        let all = table.dataframe();

        assert_eq!(totals.livebirths, column_sum(all, columns::LIVEBIRTHS).unwrap());
        assert_eq!(totals.stillbirths, column_sum(all, columns::STILLBIRTHS).unwrap());
        assert_eq!(totals.miscarriages, column_sum(all, columns::MISCARRIAGES).unwrap());
        assert_eq!(totals.abortions, column_sum(all, columns::ABORTIONS).unwrap());
        assert_eq!(totals.entries()[0], ("Live births", 6.0));
    }

    #[test]
    fn undated_rows_fall_out_of_every_total() {
        let table = cohort();
        let params = FilterParams {
            year: InclusiveRange::new(i64::MIN, i64::MAX),
            ..FilterParams::unrestricted(&table).unwrap()
        };
        let totals = outcome_totals(filter(&table, &params).unwrap().dataframe()).unwrap();

        assert_eq!(totals.livebirths, 6.0);
        assert_eq!(column_sum(table.dataframe(), columns::LIVEBIRTHS).unwrap(), 8.0);
    }

    #[test]
    fn month_totals_are_complete_and_calendar_ordered() {
        let aggregates = unfiltered(&cohort());
        let months = &aggregates.pregnancies_by_month;

        assert_eq!(months.len(), 12);
        assert_eq!(
            months.iter().map(|m| m.month).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<u32>>()
        );
        assert_eq!(months[0].label, "Jan");
        assert_eq!(months[0].total, 3.0);
        assert_eq!(months[2].total, 6.0);
        assert_eq!(months[11].label, "Dec");
        assert!(months.iter().enumerate().all(|(i, m)| i == 0 || i == 2 || m.total == 0.0));
    }

    #[test]
    fn yearly_totals_ascend_and_skip_undated_rows() {
        let aggregates = unfiltered(&cohort());
        assert_eq!(
            aggregates.pregnancies_by_year,
            vec![
                YearTotal { year: 2019, total: 4.0 },
                YearTotal { year: 2020, total: 5.0 },
            ]
        );
    }

    #[test]
    fn grouped_aggregates_drop_null_keys() {
        let table = cohort();
        let df = table.dataframe();

        let regimes = livebirths_by_work_regime(df).unwrap();
        assert_eq!(
            regimes,
            vec![
                CategoryTotal { category: "Farmer".into(), total: 3.0 },
                CategoryTotal { category: "Trader".into(), total: 2.0 },
            ]
        );

        let id_cards = livebirths_by_id_card(df).unwrap();
        assert_eq!(id_cards.len(), 2);
        assert_eq!(id_cards[0].category, "No");
        assert_eq!(id_cards[1].category, "Yes");
        assert!((id_cards[1].share - 5.0 / 6.0).abs() < 1e-12);
        assert!((id_cards.iter().map(|s| s.share).sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pairs_require_both_coordinates() {
        let table = cohort();
        let series = alive_boys_vs_girls(table.dataframe()).unwrap();

        // the only "M" row has no girls count
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].group, "F");
        assert_eq!(series[0].points, vec![[1.0, 1.0], [2.0, 1.0], [0.0, 0.0]]);

        let scatter = livebirths_vs_stillbirths(table.dataframe()).unwrap();
        assert_eq!(
            scatter.iter().map(|s| s.group.as_str()).collect::<Vec<_>>(),
            vec!["True"]
        );
        assert_eq!(scatter[0].points.len(), 4);
    }

    #[test]
    fn distributions_carry_summaries() {
        let aggregates = unfiltered(&cohort());

        assert_eq!(aggregates.pregnancies.values, vec![3.0, 1.0, 5.0]);
        assert_eq!(aggregates.pregnancies.summary.as_ref().map(|s| s.median), Some(3.0));

        let labels: Vec<&str> = aggregates
            .multiple_births
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![columns::TWINS_ALIVE, columns::TRIPLET_OUTCOMES, columns::QUADR_OUTCOMES]
        );
        assert_eq!(aggregates.multiple_births[0].values, vec![0.0, 2.0, 1.0]);

        let twins: Vec<&str> = aggregates
            .twin_outcomes_by_gender
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(twins, vec!["F", "M"]);

        let education = &aggregates.pregnancies_by_education;
        assert_eq!(education[0].label, "No");
        assert_eq!(education[0].values, vec![1.0]);
        assert_eq!(education[1].values, vec![3.0, 5.0]);
    }

    #[test]
    fn empty_selection_degrades_to_zeroes() {
        let table = cohort();
        let mut params = FilterParams::unrestricted(&table).unwrap();
        params.genders.clear();
        let aggregates = DashboardAggregates::compute(&filter(&table, &params).unwrap()).unwrap();

        assert!(aggregates.is_empty());
        assert!(aggregates.pregnancies.values.is_empty());
        assert!(aggregates.pregnancies.summary.is_none());
        assert_eq!(aggregates.outcome_totals, OutcomeTotals::default());
        assert!(aggregates.livebirths_by_id_card.is_empty());
        assert!(aggregates.pregnancies_by_year.is_empty());
        assert!(aggregates.pregnancies_by_month.iter().all(|m| m.total == 0.0));
    }
}

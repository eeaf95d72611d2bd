//! Income/expense/result summaries grouped by taxonomy level.
//!
//! Everything here is a pure function over an already filtered slice of
//! entries. Classification uses the natureza prefix only: `R*` is income,
//! anything else is expense, whatever the sign of the amount.

use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};

use crate::{Entry, MoneyCents, ResultEngine};

/// Key used for the overall row.
pub const TOTAL_KEY: &str = "TOTAL";

/// Grouping level of a summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Natureza,
    Conta,
    Categoria,
}

impl Dimension {
    /// Grouping key of `entry` for this level, if the entry has one.
    pub fn key(self, entry: &Entry) -> Option<String> {
        match self {
            Self::Natureza => Some(entry.natureza_code.clone()),
            Self::Conta => entry.conta_id.map(|id| id.to_string()),
            Self::Categoria => entry.categoria_id.map(|id| id.to_string()),
        }
    }

    /// Tie-break order of two keys: natureza codes as text, conta and
    /// categoria ids numerically.
    fn compare_keys(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Natureza => a.cmp(b),
            Self::Conta | Self::Categoria => match (a.parse::<i32>(), b.parse::<i32>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub key: String,
    /// Display name, filled by the store layer when it knows one.
    pub label: Option<String>,
    pub income: MoneyCents,
    pub expense: MoneyCents,
    pub result: MoneyCents,
    pub percent: f64,
}

/// Grouped rows for one dimension plus the overall row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub total: SummaryItem,
    pub groups: Vec<SummaryItem>,
}

/// The three grouped views returned by the summary report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub totals: SummaryItem,
    pub by_natureza: Vec<SummaryItem>,
    pub by_conta: Vec<SummaryItem>,
    pub by_categoria: Vec<SummaryItem>,
}

#[derive(Clone, Copy, Default)]
struct Totals {
    income: MoneyCents,
    expense: MoneyCents,
}

impl Totals {
    fn add(&mut self, entry: &Entry) -> ResultEngine<()> {
        if entry.is_income() {
            self.income = self.income.try_add(entry.amount)?;
        } else {
            self.expense = self.expense.try_add(entry.amount)?;
        }
        Ok(())
    }

    fn result(self) -> ResultEngine<MoneyCents> {
        self.income.try_sub(self.expense)
    }

    fn into_item(self, key: String, overall_result: MoneyCents) -> ResultEngine<SummaryItem> {
        let result = self.result()?;
        Ok(SummaryItem {
            key,
            label: None,
            income: self.income,
            expense: self.expense,
            result,
            percent: percent_of(result, overall_result),
        })
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero.
fn percent_of(part: MoneyCents, whole: MoneyCents) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.cents() as f64 / whole.cents() as f64 * 100.0
}

fn overall(entries: &[Entry]) -> ResultEngine<Totals> {
    let mut totals = Totals::default();
    for entry in entries {
        totals.add(entry)?;
    }
    Ok(totals)
}

fn total_item(totals: Totals) -> ResultEngine<SummaryItem> {
    Ok(SummaryItem {
        key: TOTAL_KEY.to_string(),
        label: None,
        income: totals.income,
        expense: totals.expense,
        result: totals.result()?,
        percent: 100.0,
    })
}

fn grouped(
    entries: &[Entry],
    dimension: Dimension,
    overall_result: MoneyCents,
) -> ResultEngine<Vec<SummaryItem>> {
    let mut groups: HashMap<String, Totals> = HashMap::new();
    for entry in entries {
        let Some(key) = dimension.key(entry) else {
            continue;
        };
        groups.entry(key).or_default().add(entry)?;
    }

    let mut items = groups
        .into_iter()
        .map(|(key, totals)| totals.into_item(key, overall_result))
        .collect::<ResultEngine<Vec<_>>>()?;
    items.sort_by(|a, b| {
        b.result
            .cmp(&a.result)
            .then_with(|| dimension.compare_keys(&a.key, &b.key))
    });
    Ok(items)
}

/// Groups `entries` by `dimension`.
///
/// Entries without a key for the dimension are left out of the groups but
/// still count in `total`. Groups are ordered by result (highest first), ties
/// by key. Fails with `InvalidAmount` if a total overflows.
pub fn compute_summary(entries: &[Entry], dimension: Dimension) -> ResultEngine<SummaryResult> {
    let totals = overall(entries)?;
    let result = totals.result()?;
    Ok(SummaryResult {
        total: total_item(totals)?,
        groups: grouped(entries, dimension, result)?,
    })
}

/// Overall totals plus the grouping at every taxonomy level.
pub fn summarize(entries: &[Entry]) -> ResultEngine<Summary> {
    let totals = overall(entries)?;
    let result = totals.result()?;
    Ok(Summary {
        totals: total_item(totals)?,
        by_natureza: grouped(entries, Dimension::Natureza, result)?,
        by_conta: grouped(entries, Dimension::Conta, result)?,
        by_categoria: grouped(entries, Dimension::Categoria, result)?,
    })
}

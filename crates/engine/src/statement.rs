//! Monthly running-balance statement of a partner's capital account.
//!
//! Contributions and withdrawals are plain ledger entries booked in two
//! categorias per partner. Which categorias belong to which partner is
//! configuration ([`PartnerAccounts`]), not something derived from names.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Entry, EngineError, MoneyCents, Partner, ResultEngine};

/// Calendar month. Orders chronologically (year, then month).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ResultEngine<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidRange(format!("invalid month: {month}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn first_day(self) -> ResultEngine<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| EngineError::InvalidRange(format!("month out of range: {self}")))
    }

    fn last_day(self) -> ResultEngine<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| EngineError::InvalidRange(format!("month out of range: {self}")))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidRange(format!("invalid month: {s}"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Inclusive date interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ResultEngine<Self> {
        if start > end {
            return Err(EngineError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from optional textual bounds.
    ///
    /// Bounds are `YYYY-MM-DD` or `YYYY-MM`; a month start means its first
    /// day and a month end its last day. A missing start is the earliest
    /// representable date, a missing end is `today`.
    pub fn parse(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> ResultEngine<Self> {
        let start = match start.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_bound(raw, Bound::Start)?,
            None => NaiveDate::MIN,
        };
        let end = match end.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_bound(raw, Bound::End)?,
            None => today,
        };
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_bound(raw: &str, bound: Bound) -> ResultEngine<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    let month: YearMonth = raw
        .parse()
        .map_err(|_| EngineError::InvalidRange(format!("invalid date: {raw}")))?;
    match bound {
        Bound::Start => month.first_day(),
        Bound::End => month.last_day(),
    }
}

/// Names of the categorias holding a partner's contributions and withdrawals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerCategories {
    pub contribution: String,
    pub withdrawal: String,
}

/// Configured mapping `partner id -> capital account categorias`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartnerAccounts {
    accounts: BTreeMap<i32, PartnerCategories>,
}

impl PartnerAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, partner_id: i32, categories: PartnerCategories) {
        self.accounts.insert(partner_id, categories);
    }

    pub fn with(mut self, partner_id: i32, contribution: &str, withdrawal: &str) -> Self {
        self.insert(
            partner_id,
            PartnerCategories {
                contribution: contribution.to_string(),
                withdrawal: withdrawal.to_string(),
            },
        );
        self
    }

    /// Categorias configured for `partner`.
    pub fn categories_for(&self, partner: &Partner) -> ResultEngine<&PartnerCategories> {
        self.accounts
            .get(&partner.id)
            .ok_or_else(|| EngineError::UnmappedPartner(partner.name.clone()))
    }
}

impl FromIterator<(i32, PartnerCategories)> for PartnerAccounts {
    fn from_iter<T: IntoIterator<Item = (i32, PartnerCategories)>>(iter: T) -> Self {
        Self {
            accounts: iter.into_iter().collect(),
        }
    }
}

/// Categoria ids a partner's capital moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapitalAccount {
    pub contribution_id: i32,
    pub withdrawal_id: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub month: YearMonth,
    pub inflow: MoneyCents,
    pub outflow: MoneyCents,
    pub balance_after: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub partner_name: String,
    pub initial_balance: MoneyCents,
    pub period: DateRange,
    pub statement: Vec<StatementLine>,
}

/// Builds the month-by-month statement of `partner`.
///
/// Only entries dated inside `range` and booked in one of the two capital
/// categorias take part; months with no movement are skipped. Fails with
/// `InvalidAmount` if a monthly total or the balance overflows.
pub fn compute_statement(
    partner: &Partner,
    account: CapitalAccount,
    entries: &[Entry],
    range: DateRange,
) -> ResultEngine<Statement> {
    let mut months: BTreeMap<YearMonth, (MoneyCents, MoneyCents)> = BTreeMap::new();
    for entry in entries.iter().filter(|e| range.contains(e.date)) {
        let Some(categoria_id) = entry.categoria_id else {
            continue;
        };
        let totals = if categoria_id == account.contribution_id {
            &mut months.entry(YearMonth::of(entry.date)).or_default().0
        } else if categoria_id == account.withdrawal_id {
            &mut months.entry(YearMonth::of(entry.date)).or_default().1
        } else {
            continue;
        };
        *totals = totals.try_add(entry.amount)?;
    }

    let mut balance = partner.initial_balance;
    let mut statement = Vec::with_capacity(months.len());
    for (month, (inflow, outflow)) in months {
        balance = balance.try_add(inflow)?.try_sub(outflow)?;
        statement.push(StatementLine {
            month,
            inflow,
            outflow,
            balance_after: balance,
        });
    }

    Ok(Statement {
        partner_name: partner.name.clone(),
        initial_balance: partner.initial_balance,
        period: range,
        statement,
    })
}

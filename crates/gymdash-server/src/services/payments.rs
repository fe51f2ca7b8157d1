use chrono::{Datelike, NaiveDate};

use crate::models::GymPaymentsQuery;

pub const PAGE_SIZE: u32 = 20;

/// Offset/limit paging over the gym payment ledger. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_count: u64,
}

impl Pagination {
    pub fn new(page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            total_count: 0,
        }
    }

    pub fn with_total(self, total_count: u64) -> Self {
        Self { total_count, ..self }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(PAGE_SIZE)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) * u64::from(PAGE_SIZE) < self.total_count
    }
}

/// Inclusive date range for the ledger and its revenue card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// First to last day of the month containing `today`.
    pub fn month_of(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let next_month = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
        Self { start, end }
    }

    /// Missing bounds fall back to the current month's.
    pub fn resolve(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let month = Self::month_of(today);
        Self {
            start: start.unwrap_or(month.start),
            end: end.unwrap_or(month.end),
        }
    }

    pub fn label(&self) -> String {
        format!(
            "Revenue {} to {}",
            self.start.format("%d %b %y"),
            self.end.format("%d %b %y")
        )
    }
}

pub fn ledger_query(pagination: &Pagination, range: &DateRange) -> GymPaymentsQuery {
    GymPaymentsQuery {
        limit: PAGE_SIZE,
        offset: pagination.offset(),
        start_date: range.start,
        end_date: range.end,
    }
}

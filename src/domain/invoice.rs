//! Invoices, including scheduled (recurring) invoice templates.

use std::fmt;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Upper bound on generated occurrences for a single query.
const MAX_OCCURRENCES: u32 = 100_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Paid and cancelled invoices no longer accept status changes.
    pub fn is_final(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl InvoiceLine {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence rule of a scheduled invoice.
///
/// Occurrences are computed from `start` rather than from the previous
/// occurrence, so a schedule starting on the 31st lands on the last day of
/// shorter months without drifting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub frequency: Frequency,
    #[serde(default = "Schedule::default_interval")]
    pub interval: u32,
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl Schedule {
    pub fn new(frequency: Frequency, start: NaiveDate) -> Self {
        Self {
            frequency,
            interval: 1,
            start,
            end: None,
        }
    }

    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    fn default_interval() -> u32 {
        1
    }

    /// The `n`-th occurrence (zero based), or `None` past the end date.
    pub fn nth(&self, n: u32) -> Option<NaiveDate> {
        let step = self.interval.max(1).checked_mul(n)?;
        let date = match self.frequency {
            Frequency::Daily => self.start.checked_add_days(Days::new(u64::from(step))),
            Frequency::Weekly => self
                .start
                .checked_add_days(Days::new(u64::from(step) * 7)),
            Frequency::Monthly => self.start.checked_add_months(Months::new(step)),
            Frequency::Yearly => self
                .start
                .checked_add_months(Months::new(step.checked_mul(12)?)),
        }?;
        match self.end {
            Some(end) if date > end => None,
            _ => Some(date),
        }
    }

    /// All occurrences in the inclusive range `[from, to]`.
    pub fn occurrences_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for n in 0..MAX_OCCURRENCES {
            let Some(date) = self.nth(n) else { break };
            if date > to {
                break;
            }
            if date >= from {
                dates.push(date);
            }
        }
        dates
    }

    /// First occurrence strictly after `date`.
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        (0..MAX_OCCURRENCES)
            .map_while(|n| self.nth(n))
            .find(|candidate| *candidate > date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    /// Latest occurrence already turned into a concrete invoice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<NaiveDate>,
}

impl Invoice {
    pub fn new(
        number: impl Into<String>,
        customer_id: impl Into<String>,
        customer_name: impl Into<String>,
        issue_date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            number: number.into(),
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            issue_date,
            due_date: None,
            status: InvoiceStatus::Draft,
            lines: Vec::new(),
            schedule: None,
            last_generated: None,
        }
    }

    pub fn with_line(mut self, line: InvoiceLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::total).sum()
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }

    /// Next occurrence that has not been generated yet.
    pub fn next_occurrence(&self) -> Option<NaiveDate> {
        let schedule = self.schedule.as_ref()?;
        match self.last_generated {
            Some(last) => schedule.next_after(last),
            None => schedule.nth(0),
        }
    }
}

impl Identifiable for Invoice {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Invoice {
    fn display_label(&self) -> String {
        format!("#{} {} ({})", self.number, self.customer_name, self.status)
    }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.number.as_str(),
            self.customer_name.as_str(),
            self.status.label(),
        ]
    }
}

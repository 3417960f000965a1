//! CSV import and export of payout splits and v1 mods.
//!
//! Every file starts with a header row, which is skipped on import. Percent
//! columns hold human-scale decimals ("12.5") and are converted exactly to
//! each record's fixed-point scale, so exporting and re-importing a list
//! yields the same records.

use log::{debug, warn};

use crate::{
    constants::{PAYOUT_MODS_CSV_HEADER, SPLITS_CSV_HEADER, TICKET_MODS_CSV_HEADER},
    distributions::duplicate_beneficiaries,
    errors::{ErrorCode, Result},
    percent::FixedPercent,
    state::{Address, Allocation, PayoutMod, Split, TicketMod},
};

/// A record with a fixed CSV column layout
pub trait CsvRecord: Allocation + Sized {
    const HEADER: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> Result<Self>;

    fn to_row(&self) -> Vec<String>;
}

/// One data line, with its 1-based line number for error reporting
pub struct Row<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    pub fn line(&self) -> usize {
        self.line
    }

    /// Trimmed field at `index`, empty when the row is shorter
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or_default()
    }

    pub fn invalid(&self, field: &'static str, value: &str) -> ErrorCode {
        ErrorCode::CsvInvalidField {
            line: self.line,
            field,
            value: value.to_string(),
        }
    }

    /// Optional address; mixed case must carry a valid checksum
    pub fn address(&self, index: usize, field: &'static str) -> Result<Option<Address>> {
        let raw = self.field(index);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| self.invalid(field, raw))
    }

    /// Required human-scale percent at the record's fixed-point scale
    pub fn percent<const TOTAL: u64>(&self, index: usize) -> Result<FixedPercent<TOTAL>> {
        let raw = self.field(index);
        if raw.is_empty() {
            return Err(ErrorCode::CsvMissingField {
                line: self.line,
                field: "percent",
            });
        }
        FixedPercent::parse_percentage(raw).map_err(|_| self.invalid("percent", raw))
    }

    /// `true`/`false`, empty meaning false
    pub fn flag(&self, index: usize, field: &'static str) -> Result<bool> {
        let raw = self.field(index);
        if raw.is_empty() || raw.eq_ignore_ascii_case("false") {
            Ok(false)
        } else if raw.eq_ignore_ascii_case("true") {
            Ok(true)
        } else {
            Err(self.invalid(field, raw))
        }
    }

    pub fn number(&self, index: usize, field: &'static str) -> Result<Option<u64>> {
        let raw = self.field(index);
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(|_| self.invalid(field, raw))
    }
}

fn optional<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl CsvRecord for Split {
    const HEADER: &'static [&'static str] = &SPLITS_CSV_HEADER;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Split {
            beneficiary: row.address(0, "beneficiary")?,
            percent: row.percent(1)?,
            prefer_claimed: row.flag(2, "preferClaimed")?,
            locked_until: row.number(3, "lockedUntil")?,
            project_id: row.number(4, "projectId")?,
            allocator: row.address(5, "allocator")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            optional(&self.beneficiary),
            self.percent.format_percentage(),
            self.prefer_claimed.to_string(),
            optional(&self.locked_until),
            optional(&self.project_id),
            optional(&self.allocator),
        ]
    }
}

impl CsvRecord for PayoutMod {
    const HEADER: &'static [&'static str] = &PAYOUT_MODS_CSV_HEADER;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(PayoutMod {
            beneficiary: row.address(0, "beneficiary")?,
            percent: row.percent(1)?,
            prefer_unstaked: row.flag(2, "preferUnstaked")?,
            locked_until: row.number(3, "lockedUntil")?,
            project_id: row.number(4, "projectId")?,
            allocator: row.address(5, "allocator")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            optional(&self.beneficiary),
            self.percent.format_percentage(),
            self.prefer_unstaked.to_string(),
            optional(&self.locked_until),
            optional(&self.project_id),
            optional(&self.allocator),
        ]
    }
}

impl CsvRecord for TicketMod {
    const HEADER: &'static [&'static str] = &TICKET_MODS_CSV_HEADER;

    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(TicketMod {
            beneficiary: row.address(0, "beneficiary")?,
            percent: row.percent(1)?,
            prefer_unstaked: row.flag(2, "preferUnstaked")?,
            locked_until: row.number(3, "lockedUntil")?,
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            optional(&self.beneficiary),
            self.percent.format_percentage(),
            self.prefer_unstaked.to_string(),
            optional(&self.locked_until),
        ]
    }
}

/// Parse CSV content of any record type. Rejects zero-percent rows and
/// beneficiaries listed more than once.
pub fn parse_csv<T: CsvRecord>(content: &str) -> Result<Vec<T>> {
    let mut lines = content.lines().enumerate();

    if let Some((_, header)) = lines.next() {
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != T::HEADER {
            warn!("unexpected CSV header {:?}, expected {:?}", columns, T::HEADER);
        }
    }

    let mut records = Vec::new();
    for (index, raw) in lines {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() > T::HEADER.len() {
            return Err(ErrorCode::CsvFieldCount {
                line,
                expected: T::HEADER.len(),
                found: fields.len(),
            });
        }

        let record = T::from_row(&Row { line, fields })?;
        if record.percent_value() == 0 {
            return Err(ErrorCode::CsvZeroPercent { line });
        }
        records.push(record);
    }

    let duplicates = duplicate_beneficiaries(&records);
    if !duplicates.is_empty() {
        let listed: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
        return Err(ErrorCode::CsvDuplicateBeneficiaries(listed.join(", ")));
    }

    debug!("parsed {} CSV records", records.len());
    Ok(records)
}

/// Render records as CSV with a header row
pub fn to_csv<T: CsvRecord>(records: &[T]) -> String {
    std::iter::once(T::HEADER.join(","))
        .chain(records.iter().map(|record| record.to_row().join(",")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_splits_csv(content: &str) -> Result<Vec<Split>> {
    parse_csv(content)
}

pub fn parse_payout_mods_csv(content: &str) -> Result<Vec<PayoutMod>> {
    parse_csv(content)
}

pub fn parse_ticket_mods_csv(content: &str) -> Result<Vec<TicketMod>> {
    parse_csv(content)
}

pub fn splits_to_csv(splits: &[Split]) -> String {
    to_csv(splits)
}

pub fn payout_mods_to_csv(mods: &[PayoutMod]) -> String {
    to_csv(mods)
}

pub fn ticket_mods_to_csv(mods: &[TicketMod]) -> String {
    to_csv(mods)
}

//! Rendering of output rows.

use tsfold_key::GroupIdentity;
use tsfold_types::Record;

use crate::Column;

/// A record together with the context its output line needs.
#[derive(Debug, Clone, Copy)]
pub struct OutputRow<'a> {
    /// Filter name or stream label.
    pub label: &'a str,
    /// Filter id or summary ordinal.
    pub index: usize,
    /// Group the record belongs to.
    pub identity: &'a GroupIdentity,
    /// Record to render.
    pub record: &'a Record,
}

impl<'a> OutputRow<'a> {
    /// Creates a row.
    #[must_use]
    pub const fn new(
        label: &'a str,
        index: usize,
        identity: &'a GroupIdentity,
        record: &'a Record,
    ) -> Self {
        Self {
            label,
            index,
            identity,
            record,
        }
    }

    /// Renders one field.
    #[must_use]
    pub fn field(&self, column: Column) -> String {
        let rec = self.record;
        match column {
            Column::Label => self.label.to_string(),
            Column::Index => self.index.to_string(),
            Column::Exchange => self.identity.exchange().to_string(),
            Column::Symbol => self.identity.symbol().to_string(),
            Column::Date => rec.datetime().map_or_else(
                || rec.timestamp.to_string(),
                |dt| dt.format("%Y-%m-%d").to_string(),
            ),
            Column::Timestamp => rec.timestamp.to_string(),
            Column::Open => format!("{:.6}", rec.open),
            Column::High => format!("{:.6}", rec.high),
            Column::Low => format!("{:.6}", rec.low),
            Column::Close => format!("{:.6}", rec.close),
            Column::Volume => rec.volume.to_string(),
            Column::AdjClose => format!("{:.6}", rec.adj_close),
            Column::GroupKey => self.identity.as_str().to_string(),
            Column::HeaderKey => self.identity.header(),
            Column::PeriodKey => self.identity.period().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnTemplate;

    // 2015-01-05T00:00:00Z
    const T1: i64 = 1_420_416_000_000;

    #[test]
    fn test_default_row() {
        let identity = GroupIdentity::new("", "SPX", "2015-01").unwrap();
        let rec = Record::new(T1, 10.0, 12.5, 9.0, 11.0, 100, 10.9);
        let row = OutputRow::new("highest-high", 3, &identity, &rec);

        assert_eq!(
            ColumnTemplate::default().format(&row),
            "2015-01-05,10.000000,12.500000,9.000000,11.000000,100,10.900000"
        );
    }

    #[test]
    fn test_context_columns() {
        let identity = GroupIdentity::new("NYSE", "IBM", "2015-01").unwrap();
        let rec = Record::adj_only(T1, 7, 1.5);
        let row = OutputRow::new("lowest-low", 4, &identity, &rec);
        let template: ColumnTemplate = "id,in,x,s,k,r,p,t".parse().unwrap();

        assert_eq!(
            template.format(&row),
            format!("lowest-low,4,NYSE,IBM,NYSE-IBM-2015-01,NYSE-IBM,2015-01,{T1}")
        );
    }
}

//! CSV export and import. Exports carry two computed columns (effective
//! monthly contribution and resolved next occurrence) alongside the stored
//! fields; imports read only the stored fields.

use chrono::NaiveDate;

use ::csv::{ReaderBuilder, WriterBuilder};

use subtally_core::{format_date, monthly_contribution, next_occurrence_on_or_after, parse_date};
use subtally_domain::{Cycle, Subscription};

use crate::ExportError;

const HEADERS: [&str; 7] = [
    "name",
    "category",
    "cycle",
    "anchor_date",
    "price",
    "monthly_contribution",
    "next_occurrence",
];

/// Renders the subscriptions as a CSV document.
pub fn export_csv(subscriptions: &[Subscription], today: NaiveDate) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for sub in subscriptions {
        let next = next_occurrence_on_or_after(sub.anchor_date, sub.cycle, today)
            .map(format_date)
            .unwrap_or_else(|_| format_date(sub.anchor_date));
        let cycle = sub.cycle.to_string().to_lowercase();
        let anchor = format_date(sub.anchor_date);
        let price = format!("{:.2}", sub.price);
        // Effective contribution, the same figure the dashboard totals use.
        let monthly = format!("{:.4}", monthly_contribution(sub, today));
        writer.write_record([
            sub.name.as_str(),
            sub.category.as_deref().unwrap_or(""),
            cycle.as_str(),
            anchor.as_str(),
            price.as_str(),
            monthly.as_str(),
            next.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Serde(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Serde(err.to_string()))
}

/// Reads subscriptions back from a CSV document. Only the stored columns
/// are consumed; computed columns are ignored.
pub fn import_csv(data: &str) -> Result<Vec<Subscription>, ExportError> {
    let mut reader = ReaderBuilder::new().from_reader(data.as_bytes());
    let mut imported = Vec::new();
    for result in reader.records() {
        let record = result?;
        let name = field(&record, 0, "name")?;
        let cycle: Cycle = field(&record, 2, "cycle")?
            .parse()
            .map_err(|err| ExportError::InvalidRecord(format!("{err}")))?;
        let anchor = parse_date(&field(&record, 3, "anchor_date")?).ok_or_else(|| {
            ExportError::InvalidRecord(format!("bad anchor date for `{name}`"))
        })?;
        let price: f64 = field(&record, 4, "price")?
            .parse()
            .map_err(|_| ExportError::InvalidRecord(format!("bad price for `{name}`")))?;
        if price < 0.0 {
            return Err(ExportError::InvalidRecord(format!(
                "negative price for `{name}`"
            )));
        }

        let mut sub = Subscription::new(name, anchor, cycle, price);
        let category = record.get(1).unwrap_or("").trim();
        if !category.is_empty() {
            sub.category = Some(category.to_string());
        }
        imported.push(sub);
    }
    Ok(imported)
}

fn field(record: &::csv::StringRecord, index: usize, label: &str) -> Result<String, ExportError> {
    let value = record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ExportError::InvalidRecord(format!("missing {label} column")))?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use subtally_domain::{Cycle, Subscription};

    use super::{export_csv, import_csv};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn export_includes_computed_columns() {
        let subs = vec![
            Subscription::new("Video", date(2026, 1, 31), Cycle::Monthly, 12.99)
                .with_category("Entertainment"),
        ];
        let csv = export_csv(&subs, date(2026, 2, 15)).expect("export");

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,category,cycle,anchor_date,price,monthly_contribution,next_occurrence"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Video,Entertainment,monthly,2026-01-31,12.99"));
        assert!(row.contains(",12.9900,"));
        assert!(row.ends_with("2026-02-28"));
    }

    #[test]
    fn exported_contribution_reflects_shared_cost() {
        let subs = vec![
            Subscription::new("Family plan", date(2026, 3, 5), Cycle::Monthly, 20.0)
                .with_shared_count(4),
        ];
        let csv = export_csv(&subs, date(2026, 3, 1)).expect("export");

        let row = csv.lines().nth(1).unwrap();
        // Stored price stays nominal; the computed column carries the
        // per-person share.
        assert!(row.contains(",20.00,"));
        assert!(row.contains(",5.0000,"));
    }

    #[test]
    fn import_reads_back_stored_fields() {
        let subs = vec![Subscription::new("News", date(2026, 3, 1), Cycle::Yearly, 99.0)];
        let csv = export_csv(&subs, date(2026, 1, 1)).expect("export");
        let imported = import_csv(&csv).expect("import");

        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].name, "News");
        assert_eq!(imported[0].cycle, Cycle::Yearly);
        assert_eq!(imported[0].anchor_date, date(2026, 3, 1));
        assert!((imported[0].price - 99.0).abs() < 1e-9);
    }

    #[test]
    fn import_rejects_malformed_rows() {
        let bad_cycle = "name,category,cycle,anchor_date,price\nX,,fortnightly,2026-01-01,5.0";
        assert!(import_csv(bad_cycle).is_err());

        let bad_price = "name,category,cycle,anchor_date,price\nX,,monthly,2026-01-01,-5.0";
        assert!(import_csv(bad_price).is_err());
    }
}

//! CSV Batch Reading and Annotated Export

use crate::error::BatchError;
use crate::record::RawCustomerRecord;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::debug;

/// Column headers of the annotated export, in write order.
///
/// Matches the raw schema plus the trailing `Prediction` column.
const EXPORT_COLUMNS: [&str; 27] = [
    "ID",
    "Year_Birth",
    "Education",
    "Marital_Status",
    "Income",
    "Kidhome",
    "Teenhome",
    "Dt_Customer",
    "Recency",
    "MntWines",
    "MntFruits",
    "MntMeatProducts",
    "MntFishProducts",
    "MntSweetProducts",
    "MntGoldProds",
    "NumDealsPurchases",
    "NumWebPurchases",
    "NumCatalogPurchases",
    "NumStorePurchases",
    "NumWebVisitsMonth",
    "AcceptedCmp1",
    "AcceptedCmp2",
    "AcceptedCmp3",
    "AcceptedCmp4",
    "AcceptedCmp5",
    "Complain",
    "Prediction",
];

/// A raw record annotated with its predicted label
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRecord {
    /// The original uploaded record, unchanged
    #[serde(flatten)]
    pub record: RawCustomerRecord,
    /// Predicted label: 1 = accept offer, 0 = reject offer
    #[serde(rename = "Prediction")]
    pub prediction: u8,
}

/// Read a whole uploaded CSV batch.
///
/// The batch is rejected as a whole on the first malformed row; there is no
/// partial-row recovery.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<RawCustomerRecord>, BatchError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<RawCustomerRecord>().enumerate() {
        // Header occupies line 1, data starts at line 2
        let record = row.map_err(|e| BatchError::Malformed {
            line: idx + 2,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(BatchError::Empty);
    }

    debug!("Read batch of {} customer records", records.len());
    Ok(records)
}

/// Write the annotated batch back out as CSV, one row per uploaded record
/// with its `Prediction` column appended.
pub fn write_annotated_csv<W: Write>(
    writer: W,
    rows: &[AnnotatedRecord],
) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(EXPORT_COLUMNS)
        .map_err(|e| BatchError::Export(e.to_string()))?;

    for row in rows {
        let r = &row.record;
        let income = r.income.map(|v| v.to_string()).unwrap_or_default();
        let fields = [
            r.id.to_string(),
            r.year_of_birth.to_string(),
            r.education.clone(),
            r.marital_status.clone(),
            income,
            r.num_kids_home.to_string(),
            r.num_teens_home.to_string(),
            r.enrollment_date.format("%Y-%m-%d").to_string(),
            r.recency.to_string(),
            r.spending_wines.to_string(),
            r.spending_fruits.to_string(),
            r.spending_meat.to_string(),
            r.spending_fish.to_string(),
            r.spending_sweets.to_string(),
            r.spending_gold.to_string(),
            r.num_deals_purchases.to_string(),
            r.num_web_purchases.to_string(),
            r.num_catalog_purchases.to_string(),
            r.num_store_purchases.to_string(),
            r.num_web_visits_month.to_string(),
            r.accepted_cmp1.to_string(),
            r.accepted_cmp2.to_string(),
            r.accepted_cmp3.to_string(),
            r.accepted_cmp4.to_string(),
            r.accepted_cmp5.to_string(),
            r.complained.to_string(),
            row.prediction.to_string(),
        ];
        wtr.write_record(&fields)
            .map_err(|e| BatchError::Export(e.to_string()))?;
    }

    wtr.flush().map_err(|e| BatchError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "ID,Year_Birth,Education,Marital_Status,Income,Kidhome,Teenhome,\
Dt_Customer,Recency,MntWines,MntFruits,MntMeatProducts,MntFishProducts,MntSweetProducts,\
MntGoldProds,NumDealsPurchases,NumWebPurchases,NumCatalogPurchases,NumStorePurchases,\
NumWebVisitsMonth,AcceptedCmp1,AcceptedCmp2,AcceptedCmp3,AcceptedCmp4,AcceptedCmp5,Complain";

    const ROW: &str = "5524,1957,Graduation,Single,58138,0,0,2012-09-04,58,\
635,88,546,172,88,88,3,8,10,4,7,0,0,0,0,0,0";

    #[test]
    fn test_read_batch() {
        let csv = format!("{HEADER}\n{ROW}\n");
        let records = read_batch(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 5524);
        assert_eq!(
            records[0].enrollment_date,
            NaiveDate::from_ymd_opt(2012, 9, 4).unwrap()
        );
    }

    #[test]
    fn test_read_batch_missing_income() {
        let row = ROW.replace("58138", "");
        let csv = format!("{HEADER}\n{row}\n");
        let records = read_batch(csv.as_bytes()).unwrap();
        assert_eq!(records[0].income, None);
    }

    #[test]
    fn test_malformed_row_rejects_batch_with_line() {
        let bad = ROW.replace("1957", "not-a-year");
        let csv = format!("{HEADER}\n{ROW}\n{bad}\n");
        match read_batch(csv.as_bytes()) {
            Err(BatchError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed batch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_batch_rejected() {
        let csv = format!("{HEADER}\n");
        assert!(matches!(read_batch(csv.as_bytes()), Err(BatchError::Empty)));
    }

    #[test]
    fn test_annotated_export_round_trip() {
        let csv = format!("{HEADER}\n{ROW}\n");
        let records = read_batch(csv.as_bytes()).unwrap();
        let rows: Vec<AnnotatedRecord> = records
            .into_iter()
            .map(|record| AnnotatedRecord {
                record,
                prediction: 1,
            })
            .collect();

        let mut out = Vec::new();
        write_annotated_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("ID,"));
        assert!(header.ends_with(",Prediction"));
        let data = lines.next().unwrap();
        assert!(data.starts_with("5524,1957,Graduation,Single,58138,"));
        assert!(data.ends_with(",1"));
    }
}

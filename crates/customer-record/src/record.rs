//! Raw Customer Record Schema

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Binary yes/no flag coerced to a 0/1 category.
///
/// Accepts `Yes`/`No` (case-insensitive), `0`/`1`, or boolean forms on input
/// and always serializes as a numeric 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryFlag(pub u8);

impl BinaryFlag {
    /// Flag set to "no"
    pub const NO: BinaryFlag = BinaryFlag(0);
    /// Flag set to "yes"
    pub const YES: BinaryFlag = BinaryFlag(1);

    /// Numeric 0/1 value
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl From<bool> for BinaryFlag {
    fn from(v: bool) -> Self {
        BinaryFlag(v as u8)
    }
}

impl fmt::Display for BinaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for BinaryFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

struct FlagVisitor;

impl<'de> Visitor<'de> for FlagVisitor {
    type Value = BinaryFlag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a yes/no flag as Yes/No, 0/1, or a boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(BinaryFlag::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(BinaryFlag::NO),
            1 => Ok(BinaryFlag::YES),
            other => Err(E::custom(format!("'{other}' is not a 0/1 flag"))),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match v {
            0 => Ok(BinaryFlag::NO),
            1 => Ok(BinaryFlag::YES),
            other => Err(E::custom(format!("'{other}' is not a 0/1 flag"))),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if v == 0.0 {
            Ok(BinaryFlag::NO)
        } else if v == 1.0 {
            Ok(BinaryFlag::YES)
        } else {
            Err(E::custom(format!("'{v}' is not a 0/1 flag")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v.trim().to_ascii_lowercase().as_str() {
            "yes" | "1" | "true" => Ok(BinaryFlag::YES),
            "no" | "0" | "false" => Ok(BinaryFlag::NO),
            other => Err(E::custom(format!("'{other}' is not a yes/no flag"))),
        }
    }
}

impl<'de> Deserialize<'de> for BinaryFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }
}

/// One row of raw customer attributes.
///
/// Field names bind to the dataset's column headers so CSV uploads and JSON
/// submissions share one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCustomerRecord {
    /// Opaque customer identifier, passed through for reporting
    #[serde(rename = "ID")]
    pub id: i64,

    /// Calendar year of birth
    #[serde(rename = "Year_Birth")]
    pub year_of_birth: i32,

    /// Raw education level (Basic, 2n Cycle, Graduation, Master, PhD)
    #[serde(rename = "Education")]
    pub education: String,

    /// Raw marital status (Single, Together, Married, Divorced, Absurd,
    /// Widow, YOLO)
    #[serde(rename = "Marital_Status")]
    pub marital_status: String,

    /// Yearly household income; may be missing in batch uploads
    #[serde(rename = "Income", default)]
    pub income: Option<f64>,

    /// Number of kids at home
    #[serde(rename = "Kidhome")]
    pub num_kids_home: u32,

    /// Number of teenagers at home
    #[serde(rename = "Teenhome")]
    pub num_teens_home: u32,

    /// Date of enrollment with the company
    #[serde(
        rename = "Dt_Customer",
        deserialize_with = "deserialize_enrollment_date"
    )]
    pub enrollment_date: NaiveDate,

    /// Days since the last purchase
    #[serde(rename = "Recency")]
    pub recency: u32,

    /// Spending on wine in the last 2 years
    #[serde(rename = "MntWines")]
    pub spending_wines: u32,

    /// Spending on fruits in the last 2 years
    #[serde(rename = "MntFruits")]
    pub spending_fruits: u32,

    /// Spending on meat in the last 2 years
    #[serde(rename = "MntMeatProducts")]
    pub spending_meat: u32,

    /// Spending on fish in the last 2 years
    #[serde(rename = "MntFishProducts")]
    pub spending_fish: u32,

    /// Spending on sweets in the last 2 years
    #[serde(rename = "MntSweetProducts")]
    pub spending_sweets: u32,

    /// Spending on gold products in the last 2 years
    #[serde(rename = "MntGoldProds")]
    pub spending_gold: u32,

    /// Purchases made with a discount
    #[serde(rename = "NumDealsPurchases")]
    pub num_deals_purchases: u32,

    /// Purchases made through the web site
    #[serde(rename = "NumWebPurchases")]
    pub num_web_purchases: u32,

    /// Purchases made using a catalog
    #[serde(rename = "NumCatalogPurchases")]
    pub num_catalog_purchases: u32,

    /// Purchases made directly in stores
    #[serde(rename = "NumStorePurchases")]
    pub num_store_purchases: u32,

    /// Web site visits in the last month
    #[serde(rename = "NumWebVisitsMonth")]
    pub num_web_visits_month: u32,

    /// Accepted the offer in the 1st campaign
    #[serde(rename = "AcceptedCmp1")]
    pub accepted_cmp1: BinaryFlag,

    /// Accepted the offer in the 2nd campaign
    #[serde(rename = "AcceptedCmp2")]
    pub accepted_cmp2: BinaryFlag,

    /// Accepted the offer in the 3rd campaign
    #[serde(rename = "AcceptedCmp3")]
    pub accepted_cmp3: BinaryFlag,

    /// Accepted the offer in the 4th campaign
    #[serde(rename = "AcceptedCmp4")]
    pub accepted_cmp4: BinaryFlag,

    /// Accepted the offer in the 5th campaign
    #[serde(rename = "AcceptedCmp5")]
    pub accepted_cmp5: BinaryFlag,

    /// Complained in the last 2 years
    #[serde(rename = "Complain")]
    pub complained: BinaryFlag,
}

impl RawCustomerRecord {
    /// Sum of the six per-category spending fields
    pub fn total_spending(&self) -> u32 {
        self.spending_wines
            + self.spending_fruits
            + self.spending_meat
            + self.spending_fish
            + self.spending_sweets
            + self.spending_gold
    }
}

/// Parse an enrollment date, accepting ISO `YYYY-MM-DD` with a `DD-MM-YYYY`
/// fallback matching the source dataset's export format.
fn deserialize_enrollment_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d-%m-%Y"))
        .map_err(|_| de::Error::custom(format!("'{s}' is not a valid enrollment date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(flag: &str) -> String {
        format!(
            r#"{{
                "ID": 5524, "Year_Birth": 1957, "Education": "Graduation",
                "Marital_Status": "Single", "Income": 58138.0,
                "Kidhome": 0, "Teenhome": 0, "Dt_Customer": "2012-09-04",
                "Recency": 58, "MntWines": 635, "MntFruits": 88,
                "MntMeatProducts": 546, "MntFishProducts": 172,
                "MntSweetProducts": 88, "MntGoldProds": 88,
                "NumDealsPurchases": 3, "NumWebPurchases": 8,
                "NumCatalogPurchases": 10, "NumStorePurchases": 4,
                "NumWebVisitsMonth": 7,
                "AcceptedCmp1": {flag}, "AcceptedCmp2": 0, "AcceptedCmp3": 0,
                "AcceptedCmp4": 0, "AcceptedCmp5": 0, "Complain": "No"
            }}"#
        )
    }

    #[test]
    fn test_deserialize_record() {
        let record: RawCustomerRecord = serde_json::from_str(&record_json("\"Yes\"")).unwrap();
        assert_eq!(record.id, 5524);
        assert_eq!(record.year_of_birth, 1957);
        assert_eq!(record.enrollment_date, NaiveDate::from_ymd_opt(2012, 9, 4).unwrap());
        assert_eq!(record.accepted_cmp1, BinaryFlag::YES);
        assert_eq!(record.complained, BinaryFlag::NO);
    }

    #[test]
    fn test_flag_accepts_text_and_numeric_forms() {
        for form in ["\"Yes\"", "\"yes\"", "1", "true"] {
            let record: RawCustomerRecord = serde_json::from_str(&record_json(form)).unwrap();
            assert_eq!(record.accepted_cmp1, BinaryFlag::YES, "form {form}");
        }
        for form in ["\"No\"", "\"no\"", "0", "false"] {
            let record: RawCustomerRecord = serde_json::from_str(&record_json(form)).unwrap();
            assert_eq!(record.accepted_cmp1, BinaryFlag::NO, "form {form}");
        }
    }

    #[test]
    fn test_flag_rejects_unknown_forms() {
        assert!(serde_json::from_str::<RawCustomerRecord>(&record_json("\"maybe\"")).is_err());
        assert!(serde_json::from_str::<RawCustomerRecord>(&record_json("2")).is_err());
    }

    #[test]
    fn test_flag_serializes_numeric() {
        assert_eq!(serde_json::to_string(&BinaryFlag::YES).unwrap(), "1");
        assert_eq!(serde_json::to_string(&BinaryFlag::NO).unwrap(), "0");
    }

    #[test]
    fn test_enrollment_date_fallback_format() {
        let json = record_json("0").replace("2012-09-04", "04-09-2012");
        let record: RawCustomerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.enrollment_date, NaiveDate::from_ymd_opt(2012, 9, 4).unwrap());
    }

    #[test]
    fn test_missing_income_is_none() {
        let json = record_json("0").replace(r#""Income": 58138.0,"#, "");
        let record: RawCustomerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.income, None);
    }

    #[test]
    fn test_total_spending() {
        let mut record: RawCustomerRecord = serde_json::from_str(&record_json("0")).unwrap();
        assert_eq!(record.total_spending(), 635 + 88 + 546 + 172 + 88 + 88);

        record.spending_wines = 5;
        record.spending_fruits = 0;
        record.spending_meat = 10;
        record.spending_fish = 0;
        record.spending_sweets = 0;
        record.spending_gold = 3;
        assert_eq!(record.total_spending(), 18);
    }
}

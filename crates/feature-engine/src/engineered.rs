//! Engineered Feature Record

use crate::error::TransformError;
use serde::{Deserialize, Serialize};

/// Fixed-width age bracket, left-inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Below 25")]
    Below25,
    #[serde(rename = "25-34")]
    From25To34,
    #[serde(rename = "35-44")]
    From35To44,
    #[serde(rename = "45-54")]
    From45To54,
    #[serde(rename = "55-65")]
    From55To65,
    #[serde(rename = "Above 65")]
    Above65,
}

impl AgeGroup {
    /// Bucket an age into its bracket.
    ///
    /// Brackets start at 18; callers bound birth years upstream, and an age
    /// below the lowest edge is surfaced as an error rather than an
    /// unlabeled bucket.
    pub fn from_age(age: i32) -> Result<Self, TransformError> {
        match age {
            i32::MIN..=17 => Err(TransformError::AgeBelowBracket { age }),
            18..=24 => Ok(AgeGroup::Below25),
            25..=34 => Ok(AgeGroup::From25To34),
            35..=44 => Ok(AgeGroup::From35To44),
            45..=54 => Ok(AgeGroup::From45To54),
            55..=65 => Ok(AgeGroup::From55To65),
            _ => Ok(AgeGroup::Above65),
        }
    }

    /// Bracket label as the classifier knows it
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Below25 => "Below 25",
            AgeGroup::From25To34 => "25-34",
            AgeGroup::From35To44 => "35-44",
            AgeGroup::From45To54 => "45-54",
            AgeGroup::From55To65 => "55-65",
            AgeGroup::Above65 => "Above 65",
        }
    }
}

/// Marital status reduced to two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalGroup {
    #[serde(rename = "Alone")]
    Alone,
    #[serde(rename = "In couple")]
    InCouple,
}

impl MaritalGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalGroup::Alone => "Alone",
            MaritalGroup::InCouple => "In couple",
        }
    }
}

/// Education level reduced to two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationGroup {
    Undergraduate,
    Postgraduate,
}

impl EducationGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationGroup::Undergraduate => "Undergraduate",
            EducationGroup::Postgraduate => "Postgraduate",
        }
    }
}

/// One value of an engineered feature, as the classifier consumes it
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// Continuous feature
    Numeric(f64),
    /// Categorical feature, compared by label
    Label(String),
}

/// The feature schema the classifier was trained on.
///
/// Declaration order is the projection: raw fields with no column here
/// (birth year, enrollment date, id, per-category spending, kid/teen
/// counts) are dropped by construction. Field order is stable within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    /// Yearly household income, imputed in batch mode if missing
    #[serde(rename = "Income")]
    pub income: f64,

    /// Days since the last purchase
    #[serde(rename = "Recency")]
    pub recency: u32,

    #[serde(rename = "NumDealsPurchases")]
    pub num_deals_purchases: u32,

    #[serde(rename = "NumWebPurchases")]
    pub num_web_purchases: u32,

    #[serde(rename = "NumCatalogPurchases")]
    pub num_catalog_purchases: u32,

    #[serde(rename = "NumStorePurchases")]
    pub num_store_purchases: u32,

    #[serde(rename = "NumWebVisitsMonth")]
    pub num_web_visits_month: u32,

    /// Sum of the six per-category spending fields
    #[serde(rename = "Spending")]
    pub spending: u32,

    /// Kids plus teenagers at home
    #[serde(rename = "Children")]
    pub children: u32,

    /// Age bracket derived from the reference year
    #[serde(rename = "Age_Group")]
    pub age_group: AgeGroup,

    /// Months since enrollment, one decimal place
    #[serde(rename = "Tenure")]
    pub tenure: f64,

    #[serde(rename = "Marital_Status")]
    pub marital_status: MaritalGroup,

    #[serde(rename = "Education")]
    pub education: EducationGroup,

    #[serde(rename = "AcceptedCmp1")]
    pub accepted_cmp1: u8,

    #[serde(rename = "AcceptedCmp2")]
    pub accepted_cmp2: u8,

    #[serde(rename = "AcceptedCmp3")]
    pub accepted_cmp3: u8,

    #[serde(rename = "AcceptedCmp4")]
    pub accepted_cmp4: u8,

    #[serde(rename = "AcceptedCmp5")]
    pub accepted_cmp5: u8,

    #[serde(rename = "Complain")]
    pub complained: u8,
}

impl EngineeredRecord {
    /// Look up a feature by the column name the classifier was trained
    /// against. Returns `None` for names outside the schema.
    pub fn feature(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            "Income" => FeatureValue::Numeric(self.income),
            "Recency" => FeatureValue::Numeric(self.recency as f64),
            "NumDealsPurchases" => FeatureValue::Numeric(self.num_deals_purchases as f64),
            "NumWebPurchases" => FeatureValue::Numeric(self.num_web_purchases as f64),
            "NumCatalogPurchases" => FeatureValue::Numeric(self.num_catalog_purchases as f64),
            "NumStorePurchases" => FeatureValue::Numeric(self.num_store_purchases as f64),
            "NumWebVisitsMonth" => FeatureValue::Numeric(self.num_web_visits_month as f64),
            "Spending" => FeatureValue::Numeric(self.spending as f64),
            "Tenure" => FeatureValue::Numeric(self.tenure),
            "Age_Group" => FeatureValue::Label(self.age_group.as_str().to_string()),
            "Marital_Status" => FeatureValue::Label(self.marital_status.as_str().to_string()),
            "Education" => FeatureValue::Label(self.education.as_str().to_string()),
            "Children" => FeatureValue::Label(self.children.to_string()),
            "AcceptedCmp1" => FeatureValue::Label(self.accepted_cmp1.to_string()),
            "AcceptedCmp2" => FeatureValue::Label(self.accepted_cmp2.to_string()),
            "AcceptedCmp3" => FeatureValue::Label(self.accepted_cmp3.to_string()),
            "AcceptedCmp4" => FeatureValue::Label(self.accepted_cmp4.to_string()),
            "AcceptedCmp5" => FeatureValue::Label(self.accepted_cmp5.to_string()),
            "Complain" => FeatureValue::Label(self.complained.to_string()),
            _ => return None,
        };
        Some(value)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Writable attributes of a grievance, in the order forms usually present them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    State,
    City,
    Sector,
    Category,
    Company,
    GrievanceNarrative,
    ProductValueRange,
    DealerInfo,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::State,
        CanonicalField::City,
        CanonicalField::Sector,
        CanonicalField::Category,
        CanonicalField::Company,
        CanonicalField::GrievanceNarrative,
        CanonicalField::ProductValueRange,
        CanonicalField::DealerInfo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::State => "state",
            CanonicalField::City => "city",
            CanonicalField::Sector => "sector",
            CanonicalField::Category => "category",
            CanonicalField::Company => "company",
            CanonicalField::GrievanceNarrative => "grievanceNarrative",
            CanonicalField::ProductValueRange => "productValueRange",
            CanonicalField::DealerInfo => "dealerInfo",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// Normalized, site-agnostic grievance.
///
/// Fields are private: a record is built once through
/// [`CanonicalRecord::builder`] and only read afterwards. Blank values never
/// make it in, so every present value is writable.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    grievance_narrative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_value_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dealer_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
}

impl CanonicalRecord {
    pub fn builder() -> CanonicalRecordBuilder {
        CanonicalRecordBuilder::default()
    }

    /// Value of a writable field, `None` when absent or empty.
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        let slot = match field {
            CanonicalField::State => &self.state,
            CanonicalField::City => &self.city,
            CanonicalField::Sector => &self.sector,
            CanonicalField::Category => &self.category,
            CanonicalField::Company => &self.company,
            CanonicalField::GrievanceNarrative => &self.grievance_narrative,
            CanonicalField::ProductValueRange => &self.product_value_range,
            CanonicalField::DealerInfo => &self.dealer_info,
        };
        slot.as_deref().filter(|value| !value.trim().is_empty())
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Fields that carry a writable value, in canonical order.
    pub fn present_fields(&self) -> impl Iterator<Item = (CanonicalField, &str)> + '_ {
        CanonicalField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().next().is_none()
    }

    /// Synthetic grievance used when no backend answers, so the fill path can
    /// still be exercised.
    pub fn sample() -> Self {
        Self::builder()
            .set(CanonicalField::State, "Karnataka")
            .set(CanonicalField::City, "Bangalore")
            .set(CanonicalField::Sector, "E-Commerce")
            .set(CanonicalField::Category, "Defective Product")
            .set(CanonicalField::Company, "ABC Electronics")
            .set(
                CanonicalField::GrievanceNarrative,
                "Product received was damaged and company is not responding to refund requests.",
            )
            .set(CanonicalField::ProductValueRange, "10000-25000")
            .set(CanonicalField::DealerInfo, "XYZ Store, MG Road, Bangalore")
            .build()
    }
}

/// One-shot builder for [`CanonicalRecord`].
#[derive(Debug, Default)]
pub struct CanonicalRecordBuilder {
    record: CanonicalRecord,
}

impl CanonicalRecordBuilder {
    /// Sets a field; blank values leave the field absent.
    pub fn set(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        let value = non_blank(value.into());
        let slot = match field {
            CanonicalField::State => &mut self.record.state,
            CanonicalField::City => &mut self.record.city,
            CanonicalField::Sector => &mut self.record.sector,
            CanonicalField::Category => &mut self.record.category,
            CanonicalField::Company => &mut self.record.company,
            CanonicalField::GrievanceNarrative => &mut self.record.grievance_narrative,
            CanonicalField::ProductValueRange => &mut self.record.product_value_range,
            CanonicalField::DealerInfo => &mut self.record.dealer_info,
        };
        *slot = value;
        self
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.record.identifier = non_blank(identifier.into());
        self
    }

    pub fn build(self) -> CanonicalRecord {
        self.record
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

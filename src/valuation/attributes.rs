use serde::{Deserialize, Serialize};

use super::error::{Result, ValuationError};

/// Validated property attributes, the input of every valuation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttributes {
    /// Floor area in m²
    pub area: f64,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub sub_district: String,
    /// Layout such as "3室2厅"; the room count is read from the `<N>室` part
    #[serde(default)]
    pub layout: String,
    /// One of 毛坯, 简装, 中等, 精装, 豪华; other values score as the default
    #[serde(default)]
    pub decoration: String,
    /// District average price per m²; the engine default is used when absent
    #[serde(default)]
    pub district_average_price: Option<f64>,
}

impl PropertyAttributes {
    pub fn new(area: f64, district: impl Into<String>) -> Self {
        Self {
            area,
            district: district.into(),
            sub_district: String::new(),
            layout: String::new(),
            decoration: String::new(),
            district_average_price: None,
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_decoration(mut self, decoration: impl Into<String>) -> Self {
        self.decoration = decoration.into();
        self
    }

    pub fn with_sub_district(mut self, sub_district: impl Into<String>) -> Self {
        self.sub_district = sub_district.into();
        self
    }

    pub fn with_average_price(mut self, price: f64) -> Self {
        self.district_average_price = Some(price);
        self
    }

    /// Range checks applied on every call, even for attributes that came
    /// through an upstream form validator.
    pub fn validate(&self) -> Result<()> {
        if !self.area.is_finite() {
            return Err(ValuationError::validation("area", "must be a finite number"));
        }
        if self.area <= 0.0 {
            return Err(ValuationError::validation(
                "area",
                format!("must be positive, got {}", self.area),
            ));
        }
        if let Some(price) = self.district_average_price {
            if !price.is_finite() {
                return Err(ValuationError::validation(
                    "districtAveragePrice",
                    "must be a finite number",
                ));
            }
            if price <= 0.0 {
                return Err(ValuationError::validation(
                    "districtAveragePrice",
                    format!("must be positive, got {}", price),
                ));
            }
        }
        Ok(())
    }
}

/// A numeric field as it arrives from forms and files: either a number or
/// a string that should hold one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn parse(&self, field: &'static str) -> Result<f64> {
        match self {
            NumberLike::Number(n) => Ok(*n),
            NumberLike::Text(s) => {
                let trimmed = s.trim().trim_end_matches('㎡').trim_end_matches("m²").trim();
                trimmed.parse::<f64>().map_err(|_| {
                    ValuationError::validation(field, format!("'{}' is not a number", s))
                })
            }
        }
    }
}

impl From<f64> for NumberLike {
    fn from(n: f64) -> Self {
        NumberLike::Number(n)
    }
}

impl From<&str> for NumberLike {
    fn from(s: &str) -> Self {
        NumberLike::Text(s.to_string())
    }
}

/// Loosely-typed attributes as read from an input file or CLI flags.
///
/// Example YAML:
/// ```yaml
/// area: "105"
/// district: 雨湖区
/// layout: 3室2厅
/// decoration: 精装
/// districtAveragePrice: 8000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawPropertyAttributes {
    #[serde(default)]
    pub area: Option<NumberLike>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub sub_district: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub decoration: Option<String>,
    #[serde(default, alias = "avgPrice")]
    pub district_average_price: Option<NumberLike>,
}

impl TryFrom<RawPropertyAttributes> for PropertyAttributes {
    type Error = ValuationError;

    fn try_from(raw: RawPropertyAttributes) -> Result<Self> {
        let area = raw
            .area
            .as_ref()
            .ok_or_else(|| ValuationError::validation("area", "is required"))?
            .parse("area")?;

        let district_average_price = match raw.district_average_price {
            Some(ref value) => Some(value.parse("districtAveragePrice")?),
            None => None,
        };

        let attributes = PropertyAttributes {
            area,
            district: raw.district.unwrap_or_default().trim().to_string(),
            sub_district: raw.sub_district.unwrap_or_default().trim().to_string(),
            layout: raw.layout.unwrap_or_default().trim().to_string(),
            decoration: raw.decoration.unwrap_or_default().trim().to_string(),
            district_average_price,
        };
        attributes.validate()?;
        Ok(attributes)
    }
}

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::valuation::{NumberLike, RawPropertyAttributes};

/// Load raw property attributes from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn load_attributes(path: &Path) -> Result<RawPropertyAttributes> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read property file at {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse property: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse property: invalid YAML in {}", path.display()))?
    };

    Ok(raw)
}

/// Field values given on the command line. Set fields win over file values.
#[derive(Debug, Clone, Default)]
pub struct AttributeOverrides {
    pub area: Option<String>,
    pub district: Option<String>,
    pub sub_district: Option<String>,
    pub layout: Option<String>,
    pub decoration: Option<String>,
    pub average_price: Option<String>,
}

impl AttributeOverrides {
    pub fn apply(self, mut raw: RawPropertyAttributes) -> RawPropertyAttributes {
        if let Some(area) = self.area {
            raw.area = Some(NumberLike::Text(area));
        }
        if let Some(district) = self.district {
            raw.district = Some(district);
        }
        if let Some(sub_district) = self.sub_district {
            raw.sub_district = Some(sub_district);
        }
        if let Some(layout) = self.layout {
            raw.layout = Some(layout);
        }
        if let Some(decoration) = self.decoration {
            raw.decoration = Some(decoration);
        }
        if let Some(price) = self.average_price {
            raw.district_average_price = Some(NumberLike::Text(price));
        }
        raw
    }
}

//! Server payload schemas for the dashboard endpoints

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One named series of a chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
}

/// `{dataSet, labels}` body returned by the chart endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(rename = "dataSet")]
    pub data_set: Vec<Series>,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("series '{series}' has {values} values for {labels} labels")]
    LengthMismatch {
        series: String,
        values: usize,
        labels: usize,
    },
    #[error("series '{series}' contains a non-finite value at index {index}")]
    NonFinite { series: String, index: usize },
}

impl ChartPayload {
    /// Reject payloads the renderer cannot draw
    pub fn validate(&self) -> Result<(), PayloadError> {
        for series in &self.data_set {
            if series.data.len() != self.labels.len() {
                return Err(PayloadError::LengthMismatch {
                    series: series.label.clone(),
                    values: series.data.len(),
                    labels: self.labels.len(),
                });
            }
            if let Some(index) = series.data.iter().position(|v| !v.is_finite()) {
                return Err(PayloadError::NonFinite {
                    series: series.label.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

/// A tile value: the server mixes plain counts and preformatted percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for CountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountValue::Number(n) => write!(f, "{n}"),
            CountValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CountValue {
    fn from(value: i64) -> Self {
        CountValue::Number(value.into())
    }
}

impl From<&str> for CountValue {
    fn from(value: &str) -> Self {
        CountValue::Text(value.to_string())
    }
}

/// Display regions the count tiles are written to, in field order
pub const COUNT_REGIONS: [&str; 5] = [
    "totalEmployeesCount",
    "newbie",
    "newbiePerc",
    "newbieToday",
    "newbieTodayPerc",
];

/// Body of `/employee/dashboard-employee-count`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountPayload {
    pub total_employees: CountValue,
    pub newbies_week: CountValue,
    pub newbies_week_percentage: CountValue,
    pub newbies_today: CountValue,
    pub newbies_today_percentage: CountValue,
}

impl CountPayload {
    /// Field values paired with the display region each one is written to
    pub fn regions(&self) -> [(&'static str, &CountValue); 5] {
        [
            (COUNT_REGIONS[0], &self.total_employees),
            (COUNT_REGIONS[1], &self.newbies_week),
            (COUNT_REGIONS[2], &self.newbies_week_percentage),
            (COUNT_REGIONS[3], &self.newbies_today),
            (COUNT_REGIONS[4], &self.newbies_today_percentage),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPELINE: &str = r#"{
        "dataSet": [{"label": "Odoo developer 2023-03-30", "data": [3, 0, 5, 3]}],
        "labels": ["Initial", "Test", "Interview", "Hired"]
    }"#;

    #[test]
    fn test_decode_pipeline_payload() {
        let payload: ChartPayload = serde_json::from_str(PIPELINE).unwrap();
        assert_eq!(payload.labels.len(), 4);
        assert_eq!(payload.data_set.len(), 1);
        assert_eq!(payload.data_set[0].data, vec![3.0, 0.0, 5.0, 3.0]);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let err = serde_json::from_str::<ChartPayload>(r#"{"labels": ["a"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let payload = ChartPayload {
            data_set: vec![Series {
                label: "Male".into(),
                data: vec![1.0, 2.0],
            }],
            labels: vec!["Jan".into()],
        };
        assert_eq!(
            payload.validate(),
            Err(PayloadError::LengthMismatch {
                series: "Male".into(),
                values: 2,
                labels: 1,
            })
        );
    }

    #[test]
    fn test_empty_payload_is_valid() {
        let payload = ChartPayload {
            data_set: Vec::new(),
            labels: Vec::new(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_count_values_render_verbatim() {
        let payload: CountPayload = serde_json::from_str(
            r#"{"total_employees": 42, "newbies_week": 3, "newbies_week_percentage": "7%",
                "newbies_today": 1, "newbies_today_percentage": "2%"}"#,
        )
        .unwrap();
        let shown: Vec<String> = payload.regions().iter().map(|(_, v)| v.to_string()).collect();
        assert_eq!(shown, vec!["42", "3", "7%", "1", "2%"]);
    }

    #[test]
    fn test_float_count_keeps_json_form() {
        let value: CountValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(value.to_string(), "12.5");
    }
}

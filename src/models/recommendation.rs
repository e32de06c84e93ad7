use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single ranked trip activity
///
/// Deserialization is lenient because records also arrive from the
/// language-model delegate: numeric fields accept numbers or numeric strings,
/// and fractional hours are rounded to the nearest whole hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub location: String,
    pub category: String,
    /// USD, one decimal place
    #[serde(deserialize_with = "loose_number")]
    pub estimated_cost: f64,
    /// Kilometres, one decimal place
    #[serde(deserialize_with = "loose_number")]
    pub estimated_distance_km: f64,
    #[serde(deserialize_with = "whole_hours")]
    pub duration_hours: u32,
    /// In `[0.6, 1.0]`, two decimal places
    #[serde(deserialize_with = "loose_number")]
    pub score: f64,
}

fn loose_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .ok_or_else(|| de::Error::custom(format!("expected a number, got {}", value)))
}

fn whole_hours<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let hours = loose_number(deserializer)?;
    if hours < 0.0 || hours > u32::MAX as f64 {
        return Err(de::Error::custom(format!("hours out of range: {}", hours)));
    }
    Ok(hours.round() as u32)
}

impl Recommendation {
    /// Composite identity used for de-duplication
    pub fn dedup_key(&self) -> String {
        format!("{}|{}|{}", self.title, self.location, self.category)
    }
}

/// Which engine produced a recommendation list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// External language-model delegate
    Delegate,
    /// Deterministic local synthesizer
    Local,
    /// Delegate configured but produced nothing
    None,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub count: usize,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub source: RecommendationSource,
}

/// Body returned by `POST /api/recomendations`
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub summary: RecommendationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Recommendation {
        Recommendation {
            title: "Street food tour".to_string(),
            location: "Colombo".to_string(),
            category: "Food".to_string(),
            estimated_cost: 42.5,
            estimated_distance_km: 12.3,
            duration_hours: 3,
            score: 0.87,
        }
    }

    #[test]
    fn test_dedup_key() {
        assert_eq!(sample().dedup_key(), "Street food tour|Colombo|Food");
    }

    #[test]
    fn test_recommendation_uses_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["estimatedCost"], 42.5);
        assert_eq!(value["estimatedDistanceKm"], 12.3);
        assert_eq!(value["durationHours"], 3);
    }

    #[test]
    fn test_deserialize_accepts_fractional_hours() {
        let rec: Recommendation = serde_json::from_value(json!({
            "title": "Kandy Lake walk",
            "location": "Kandy",
            "category": "nature",
            "estimatedCost": 0,
            "estimatedDistanceKm": 3.2,
            "durationHours": 2.5,
            "score": 0.8
        }))
        .unwrap();

        assert_eq!(rec.duration_hours, 3);
        assert_eq!(rec.estimated_cost, 0.0);
    }

    #[test]
    fn test_deserialize_accepts_numeric_strings() {
        let rec: Recommendation = serde_json::from_value(json!({
            "title": "Spice garden tour",
            "location": "Matale",
            "category": "food",
            "estimatedCost": "12.5",
            "estimatedDistanceKm": " 24 ",
            "durationHours": "2",
            "score": "0.9"
        }))
        .unwrap();

        assert_eq!(rec.estimated_cost, 12.5);
        assert_eq!(rec.estimated_distance_km, 24.0);
        assert_eq!(rec.duration_hours, 2);
        assert_eq!(rec.score, 0.9);
    }

    #[test]
    fn test_deserialize_rejects_non_numeric() {
        let result = serde_json::from_value::<Recommendation>(json!({
            "title": "Mystery",
            "location": "Ella",
            "category": "adventure",
            "estimatedCost": "cheap",
            "estimatedDistanceKm": 10,
            "durationHours": -2,
            "score": 0.7
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_summary_serialization() {
        let response = RecommendationResponse {
            recommendations: vec![sample()],
            summary: RecommendationSummary {
                count: 1,
                start_date: Some("2025-01-10".to_string()),
                end_date: None,
                source: RecommendationSource::Local,
            },
        };

        let value = serde_json::to_value(response).unwrap();
        assert_eq!(
            value["summary"],
            json!({ "count": 1, "startDate": "2025-01-10", "endDate": null, "source": "local" })
        );
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::{GeoPoint, Location};

/// Inbound preference body, exactly as the client sent it
///
/// Accepts either the flat shape or `{"preferences": [ ... ]}`, in which case
/// only the first element is read. Every field stays loosely typed here so
/// that malformed optional fields can be dropped instead of failing the
/// whole request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencePayload {
    #[serde(default)]
    pub preferences: Option<Value>,
    #[serde(default)]
    pub categories: Option<Value>,
    #[serde(default)]
    pub locations: Option<Value>,
    #[serde(default)]
    pub start_date: Option<Value>,
    #[serde(default)]
    pub end_date: Option<Value>,
    #[serde(default)]
    pub max_distance_km: Option<Value>,
    #[serde(default)]
    pub max_budget: Option<Value>,
    #[serde(default)]
    pub home: Option<Value>,
}

impl PreferencePayload {
    /// Unwraps the `preferences` array form, if present and non-empty
    fn flatten(self) -> Self {
        match self.preferences.as_ref().and_then(Value::as_array) {
            Some(list) if !list.is_empty() => {
                serde_json::from_value(list[0].clone()).unwrap_or_default()
            }
            _ => self,
        }
    }
}

/// Validated travel preferences handed to the recommendation engines
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub categories: Vec<String>,
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<GeoPoint>,
}

impl RecommendationRequest {
    pub fn new<C, L>(categories: C, locations: L) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator<Item = Location>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            locations: locations.into_iter().collect(),
            ..Default::default()
        }
    }
}

fn non_empty_array<'a>(value: Option<&'a Value>, field: &str) -> AppResult<&'a Vec<Value>> {
    value
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::InvalidInput(format!("{} must be a non-empty array", field)))
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

fn opaque_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl TryFrom<PreferencePayload> for RecommendationRequest {
    type Error = AppError;

    fn try_from(payload: PreferencePayload) -> AppResult<Self> {
        let payload = payload.flatten();

        let categories = non_empty_array(payload.categories.as_ref(), "categories")?
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    AppError::InvalidInput("categories must contain only strings".to_string())
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let locations = non_empty_array(payload.locations.as_ref(), "locations")?
            .iter()
            .map(|item| {
                Location::from_value(item).ok_or_else(|| {
                    AppError::InvalidInput(
                        "locations must contain names or {name, lat, lng} objects".to_string(),
                    )
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            categories,
            locations,
            start_date: opaque_string(payload.start_date.as_ref()),
            end_date: opaque_string(payload.end_date.as_ref()),
            max_distance_km: finite_number(payload.max_distance_km.as_ref()),
            max_budget: finite_number(payload.max_budget.as_ref()),
            home: payload.home.as_ref().and_then(GeoPoint::from_value),
        })
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reads `{lat, lng}` out of an arbitrary JSON value.
    ///
    /// Both coordinates must be finite JSON numbers; numeric strings and
    /// anything else count as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let lat = value.get("lat")?.as_f64()?;
        let lng = value.get("lng")?.as_f64()?;

        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// A trip location as supplied by the client
///
/// Clients send either a bare name or an object carrying coordinates. The
/// shape is resolved once, when the request is normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Named(String),
    Geocoded { name: String, point: GeoPoint },
}

pub const UNKNOWN_LOCATION: &str = "Unknown";

impl Location {
    /// Resolves a wire value into a location
    ///
    /// Returns `None` for values that are neither strings nor objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Location::Named(name.clone())),
            Value::Object(fields) => {
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_LOCATION)
                    .to_string();

                Some(match GeoPoint::from_value(value) {
                    Some(point) => Location::Geocoded { name, point },
                    None => Location::Named(name),
                })
            }
            _ => None,
        }
    }

    /// Display name used in recommendation records
    pub fn name(&self) -> &str {
        match self {
            Location::Named(name) => name,
            Location::Geocoded { name, .. } => name,
        }
    }

    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            Location::Named(_) => None,
            Location::Geocoded { point, .. } => Some(*point),
        }
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Location::Named(name.to_string())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Wire<'a> {
            name: &'a str,
            lat: f64,
            lng: f64,
        }

        match self {
            Location::Named(name) => serializer.serialize_str(name),
            Location::Geocoded { name, point } => Wire {
                name,
                lat: point.lat,
                lng: point.lng,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geo_point_from_value() {
        let point = GeoPoint::from_value(&json!({ "lat": 6.9271, "lng": 79.8612 }));
        assert_eq!(point, Some(GeoPoint::new(6.9271, 79.8612)));
    }

    #[test]
    fn test_geo_point_rejects_non_numeric() {
        assert_eq!(GeoPoint::from_value(&json!({ "lat": "6.9", "lng": 79.8 })), None);
        assert_eq!(GeoPoint::from_value(&json!({ "lat": 6.9 })), None);
        assert_eq!(GeoPoint::from_value(&json!("Colombo")), None);
        assert_eq!(GeoPoint::from_value(&Value::Null), None);
    }

    #[test]
    fn test_location_from_string() {
        let location = Location::from_value(&json!("Ella")).unwrap();
        assert_eq!(location, Location::Named("Ella".to_string()));
        assert_eq!(location.point(), None);
    }

    #[test]
    fn test_location_from_object_with_coordinates() {
        let location =
            Location::from_value(&json!({ "name": "Kandy", "lat": 7.2906, "lng": 80.6337 }))
                .unwrap();
        assert_eq!(location.name(), "Kandy");
        assert_eq!(location.point(), Some(GeoPoint::new(7.2906, 80.6337)));
    }

    #[test]
    fn test_location_object_defaults_name() {
        let location = Location::from_value(&json!({ "lat": 7.0, "lng": 80.0 })).unwrap();
        assert_eq!(location.name(), UNKNOWN_LOCATION);

        let location = Location::from_value(&json!({ "lat": "x" })).unwrap();
        assert_eq!(location, Location::Named(UNKNOWN_LOCATION.to_string()));
    }

    #[test]
    fn test_location_rejects_scalars() {
        assert_eq!(Location::from_value(&json!(42)), None);
        assert_eq!(Location::from_value(&Value::Null), None);
    }

    #[test]
    fn test_location_serializes_to_wire_shape() {
        let named = serde_json::to_value(Location::from("Galle")).unwrap();
        assert_eq!(named, json!("Galle"));

        let geocoded = serde_json::to_value(Location::Geocoded {
            name: "Kandy".to_string(),
            point: GeoPoint::new(7.2906, 80.6337),
        })
        .unwrap();
        assert_eq!(geocoded, json!({ "name": "Kandy", "lat": 7.2906, "lng": 80.6337 }));
    }
}

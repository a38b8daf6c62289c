use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Analysis options
//==============================================================================

/// Which centre-line temperature column of the dispersion table is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureType {
    #[default]
    #[serde(rename = "Vapour", alias = "vapour", alias = "vapor")]
    Vapour,
    #[serde(rename = "Liquid", alias = "liquid")]
    Liquid,
}

impl TemperatureType {
    /// Display name, as shown in reports and accepted in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureType::Vapour => "Vapour",
            TemperatureType::Liquid => "Liquid",
        }
    }

    /// Exact column header carrying this temperature in a PHAST report
    pub fn column_header(&self) -> &'static str {
        match self {
            TemperatureType::Vapour => "C/Line vapour temperature [degC]",
            TemperatureType::Liquid => "C/Line liquid temperature [degC]",
        }
    }
}

impl fmt::Display for TemperatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vapour" | "vapor" => Ok(TemperatureType::Vapour),
            "liquid" => Ok(TemperatureType::Liquid),
            other => Err(format!(
                "unknown temperature type '{}' (expected vapour or liquid)",
                other
            )),
        }
    }
}

/// Interpolation method used to locate the temperature of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMethod {
    #[default]
    #[serde(rename = "Linear", alias = "linear")]
    Linear,
    #[serde(
        rename = "Cubic Spline",
        alias = "cubic",
        alias = "cubic-spline",
        alias = "Cubic"
    )]
    Cubic,
    #[serde(rename = "Quadratic", alias = "quadratic")]
    Quadratic,
    #[serde(
        rename = "Nearest Neighbor",
        alias = "nearest",
        alias = "nearest-neighbor",
        alias = "Nearest"
    )]
    Nearest,
}

impl InterpolationMethod {
    pub const ALL: [InterpolationMethod; 4] = [
        InterpolationMethod::Linear,
        InterpolationMethod::Cubic,
        InterpolationMethod::Quadratic,
        InterpolationMethod::Nearest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterpolationMethod::Linear => "Linear",
            InterpolationMethod::Cubic => "Cubic Spline",
            InterpolationMethod::Quadratic => "Quadratic",
            InterpolationMethod::Nearest => "Nearest Neighbor",
        }
    }

    /// Minimum sample count for the fitted interpolant; below it the
    /// method falls back to linear.
    pub fn min_samples(&self) -> usize {
        match self {
            InterpolationMethod::Cubic => 4,
            InterpolationMethod::Quadratic => 3,
            InterpolationMethod::Linear | InterpolationMethod::Nearest => 2,
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "linear" => Ok(InterpolationMethod::Linear),
            "cubic" | "cubic-spline" => Ok(InterpolationMethod::Cubic),
            "quadratic" => Ok(InterpolationMethod::Quadratic),
            "nearest" | "nearest-neighbor" | "nearest-neighbour" => {
                Ok(InterpolationMethod::Nearest)
            }
            _ => Err(format!(
                "unknown interpolation method '{}' (expected linear, cubic, quadratic or nearest)",
                s.trim()
            )),
        }
    }
}

//==============================================================================
// Records and results
//==============================================================================

/// One temperature/distance curve for an equipment item, scenario and weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionRecord {
    pub equipment_item: String,
    pub scenario: String,
    pub weather: String,
    /// Downwind distance samples [m]
    pub distances: Vec<f64>,
    /// Centre-line temperatures [degC], index-aligned with `distances`
    pub temperatures: Vec<f64>,
}

impl DispersionRecord {
    pub fn len(&self) -> usize {
        self.distances.len().min(self.temperatures.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (min, max) of the sampled temperatures
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        min_max(&self.temperatures)
    }

    /// (min, max) of the sampled distances
    pub fn distance_range(&self) -> Option<(f64, f64)> {
        min_max(&self.distances)
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// One output row of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub subsection: String,
    pub scenario: String,
    pub weather: String,
    pub downwind_distance: f64,
    pub interpolation_method: InterpolationMethod,
    pub temperature_of_interest: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_str_accepts_display_names_and_aliases() {
        assert_eq!(
            "Cubic Spline".parse::<InterpolationMethod>(),
            Ok(InterpolationMethod::Cubic)
        );
        assert_eq!(
            "cubic".parse::<InterpolationMethod>(),
            Ok(InterpolationMethod::Cubic)
        );
        assert_eq!(
            "Nearest Neighbor".parse::<InterpolationMethod>(),
            Ok(InterpolationMethod::Nearest)
        );
        assert_eq!(
            " LINEAR ".parse::<InterpolationMethod>(),
            Ok(InterpolationMethod::Linear)
        );
        assert!("spline".parse::<InterpolationMethod>().is_err());
    }

    #[test]
    fn test_method_display_round_trips_through_from_str() {
        for method in InterpolationMethod::ALL {
            assert_eq!(method.to_string().parse::<InterpolationMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_temperature_type_headers() {
        assert_eq!(
            TemperatureType::Vapour.column_header(),
            "C/Line vapour temperature [degC]"
        );
        assert_eq!(
            TemperatureType::Liquid.column_header(),
            "C/Line liquid temperature [degC]"
        );
        assert_eq!("Vapor".parse::<TemperatureType>(), Ok(TemperatureType::Vapour));
        assert!("gas".parse::<TemperatureType>().is_err());
    }

    #[test]
    fn test_record_ranges() {
        let record = DispersionRecord {
            equipment_item: "E1".to_string(),
            scenario: "S1".to_string(),
            weather: "W1".to_string(),
            distances: vec![10.0, 20.0, 30.0],
            temperatures: vec![5.0, -10.0, -2.0],
        };
        assert_eq!(record.len(), 3);
        assert_eq!(record.temperature_range(), Some((-10.0, 5.0)));
        assert_eq!(record.distance_range(), Some((10.0, 30.0)));
    }

    #[test]
    fn test_serde_aliases() {
        let method: InterpolationMethod = serde_yaml::from_str("cubic").unwrap();
        assert_eq!(method, InterpolationMethod::Cubic);
        let method: InterpolationMethod = serde_yaml::from_str("Nearest Neighbor").unwrap();
        assert_eq!(method, InterpolationMethod::Nearest);
        let kind: TemperatureType = serde_yaml::from_str("liquid").unwrap();
        assert_eq!(kind, TemperatureType::Liquid);
    }
}

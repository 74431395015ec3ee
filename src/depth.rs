//! Depth classification.
//!
//! Maps a hypocenter depth onto one of four fixed, contiguous buckets. The
//! boundaries are absolute kilometres and are never rescaled by the data.

/// Colour token shared by markers and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Color {
    /// CSS colour keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Depth buckets, shallowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DepthCategory {
    /// depth < 10 km
    Shallow,
    /// 10 <= depth < 30 km
    Moderate,
    /// 30 <= depth < 50 km
    Deep,
    /// depth >= 50 km
    VeryDeep,
}

impl DepthCategory {
    /// Classify a depth in kilometres.
    ///
    /// Each threshold belongs to the deeper bucket. NaN fails every
    /// comparison and lands in `VeryDeep`; validated records never carry it.
    #[must_use]
    pub fn classify(depth_km: f64) -> Self {
        if depth_km < 10.0 {
            Self::Shallow
        } else if depth_km < 30.0 {
            Self::Moderate
        } else if depth_km < 50.0 {
            Self::Deep
        } else {
            Self::VeryDeep
        }
    }

    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Shallow => Color::Green,
            Self::Moderate => Color::Yellow,
            Self::Deep => Color::Orange,
            Self::VeryDeep => Color::Red,
        }
    }
}

/// Colour for a depth in kilometres.
#[must_use]
pub fn depth_color(depth_km: f64) -> Color {
    DepthCategory::classify(depth_km).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_interiors() {
        assert_eq!(depth_color(-3.2), Color::Green);
        assert_eq!(depth_color(0.0), Color::Green);
        assert_eq!(depth_color(9.99), Color::Green);
        assert_eq!(depth_color(12.0), Color::Yellow);
        assert_eq!(depth_color(35.5), Color::Orange);
        assert_eq!(depth_color(120.0), Color::Red);
        assert_eq!(depth_color(700.0), Color::Red);
    }

    #[test]
    fn test_boundaries_go_to_deeper_bucket() {
        assert_eq!(depth_color(10.0), Color::Yellow);
        assert_eq!(depth_color(30.0), Color::Orange);
        assert_eq!(depth_color(50.0), Color::Red);
    }

    #[test]
    fn test_infinities_are_classified() {
        assert_eq!(DepthCategory::classify(f64::NEG_INFINITY), DepthCategory::Shallow);
        assert_eq!(DepthCategory::classify(f64::INFINITY), DepthCategory::VeryDeep);
    }

    #[test]
    fn test_categories_are_ordered() {
        let depths = [-5.0, 5.0, 10.0, 29.9, 30.0, 49.0, 50.0, 90.0];
        let categories: Vec<_> = depths.iter().map(|d| DepthCategory::classify(*d)).collect();
        assert!(categories.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_color_keywords() {
        assert_eq!(Color::Green.as_str(), "green");
        assert_eq!(Color::Orange.to_string(), "orange");
    }
}

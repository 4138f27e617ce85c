use crate::domain::{Filter, Metric};

/// One row of the station dataset, validated at parse time.
///
/// Category flags keep the source file's loose semantics: a column missing
/// from the header means the category was never tracked for this dataset
/// (the station stays visible under that filter), while a present-but-zero
/// flag means "not a member".
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub tsr: f64,
    pub total_products: f64,
    pub product_names: String,
    pub core_publisher: Option<f64>,
    pub composer_pro: Option<f64>,
    pub springboard: Option<f64>,
}

impl Station {
    pub const fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Tsr => self.tsr,
            Metric::Products => self.total_products,
        }
    }

    pub const fn category_flag(&self, filter: Filter) -> Option<f64> {
        match filter {
            Filter::All => None,
            Filter::CorePublisher => self.core_publisher,
            Filter::ComposerPro => self.composer_pro,
            Filter::Springboard => self.springboard,
        }
    }

    /// A station is a member unless the flag column is present and zero.
    pub fn is_member(&self, filter: Filter) -> bool {
        self.category_flag(filter).map_or(true, |flag| flag != 0.0)
    }
}

/// Coerces a raw cell the way the source data expects: blank cells count as
/// zero, anything unparseable becomes NaN and drops out of the extents.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(core_publisher: Option<f64>) -> Station {
        Station {
            name: "KQED-FM".to_string(),
            longitude: -122.42,
            latitude: 37.77,
            tsr: 90.0,
            total_products: 1.0,
            product_names: "Core Publisher".to_string(),
            core_publisher,
            composer_pro: Some(0.0),
            springboard: None,
        }
    }

    #[test]
    fn coercion_handles_blank_and_junk_cells() {
        assert!((coerce_number("42") - 42.0).abs() < f64::EPSILON);
        assert!((coerce_number(" 7.5 ") - 7.5).abs() < f64::EPSILON);
        assert!(coerce_number("").abs() < f64::EPSILON);
        assert!(coerce_number("   ").abs() < f64::EPSILON);
        assert!(coerce_number("n/a").is_nan());
    }

    #[test]
    fn membership_follows_flag_semantics() {
        // zero flag hides, nonzero keeps, absent column keeps
        assert!(!station(Some(0.0)).is_member(Filter::CorePublisher));
        assert!(station(Some(1.0)).is_member(Filter::CorePublisher));
        assert!(!station(None).is_member(Filter::ComposerPro));
        assert!(station(None).is_member(Filter::Springboard));
        // the All filter never hides anything
        assert!(station(Some(0.0)).is_member(Filter::All));
    }

    #[test]
    fn metric_values_come_from_the_right_columns() {
        let s = station(Some(1.0));
        assert!((s.metric_value(Metric::Tsr) - 90.0).abs() < f64::EPSILON);
        assert!((s.metric_value(Metric::Products) - 1.0).abs() < f64::EPSILON);
    }
}

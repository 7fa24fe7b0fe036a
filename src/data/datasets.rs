//! Registry of example datasets
//!
//! Symbolic names resolve to files of the public
//! [vega-datasets](https://github.com/vega/vega-datasets) collection.

use crate::{PlotspecError, Result};

const BASE_URL: &str = "https://cdn.jsdelivr.net/npm/vega-datasets@2.8.0/data/";

/// Registered datasets as (name, file) pairs
const DATASETS: &[(&str, &str)] = &[
    ("airports", "airports.csv"),
    ("barley", "barley.json"),
    ("cars", "cars.json"),
    ("co2_concentration", "co2-concentration.csv"),
    ("disasters", "disasters.csv"),
    ("driving", "driving.json"),
    ("flights", "flights-2k.json"),
    ("gapminder", "gapminder.json"),
    ("github", "github.csv"),
    ("iris", "iris.json"),
    ("jobs", "jobs.json"),
    ("movies", "movies.json"),
    ("penguins", "penguins.json"),
    ("population", "population.json"),
    ("seattle_weather", "seattle-weather.csv"),
    ("sp500", "sp500.csv"),
    ("stocks", "stocks.csv"),
    ("unemployment", "unemployment-across-industries.json"),
    ("weather", "weather.csv"),
    ("wheat", "wheat.json"),
];

/// Resolve a dataset name to its URL
pub fn resolve(name: &str) -> Result<String> {
    DATASETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, file)| format!("{}{}", BASE_URL, file))
        .ok_or_else(|| {
            PlotspecError::UnknownDataset(format!(
                "'{}', available datasets: {}",
                name,
                names().join(", ")
            ))
        })
}

/// Whether a dataset with the given name is registered
pub fn is_known(name: &str) -> bool {
    DATASETS.iter().any(|(n, _)| *n == name)
}

/// Names of all registered datasets, sorted
pub fn names() -> Vec<&'static str> {
    DATASETS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_dataset() {
        let url = resolve("iris").unwrap();
        assert!(url.starts_with("https://"));
        assert!(url.ends_with("/iris.json"));
    }

    #[test]
    fn test_resolve_unknown_dataset() {
        let err = resolve("unicorns").unwrap_err();
        assert!(matches!(err, PlotspecError::UnknownDataset(_)));
        assert!(err.to_string().contains("unicorns"));
    }

    #[test]
    fn test_names_are_sorted_and_unique() {
        let names = names();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(is_known("penguins"));
        assert!(!is_known("dragons"));
    }
}

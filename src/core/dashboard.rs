//! Dashboard state: the cached vehicle list and the derived view
//!
//! The cache is replaced wholesale on every fetch. The view is never stored;
//! it is recomputed from the cache and the current [`ViewQuery`] on demand,
//! so it can never drift from the data it was derived from.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::core::client::{ApiError, FleetApi};
use crate::core::vehicle::{Vehicle, VehicleStatus};

/// Status filter applied to the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Maintenance,
    Inactive,
}

impl StatusFilter {
    /// The status to match, or `None` for all
    pub fn status(&self) -> Option<VehicleStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(VehicleStatus::Active),
            StatusFilter::Maintenance => Some(VehicleStatus::Maintenance),
            StatusFilter::Inactive => Some(VehicleStatus::Inactive),
        }
    }

    fn matches(&self, vehicle: &Vehicle) -> bool {
        match self.status() {
            None => true,
            Some(wanted) => vehicle.status == Some(wanted),
        }
    }
}

/// Sort order of the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the order the API returned
    #[default]
    None,
    ModelAsc,
    ModelDesc,
    YearAsc,
    YearDesc,
    PlateAsc,
    PlateDesc,
}

impl SortKey {
    fn compare(&self, a: &Vehicle, b: &Vehicle) -> Ordering {
        match self {
            SortKey::None => Ordering::Equal,
            SortKey::ModelAsc => compare_text(a.model_str(), b.model_str()),
            SortKey::ModelDesc => compare_text(b.model_str(), a.model_str()),
            SortKey::YearAsc => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
            SortKey::YearDesc => b.year.unwrap_or(0).cmp(&a.year.unwrap_or(0)),
            SortKey::PlateAsc => compare_text(a.plate_str(), b.plate_str()),
            SortKey::PlateDesc => compare_text(b.plate_str(), a.plate_str()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        write!(f, "{}", name)
    }
}

/// Case-insensitive comparison with a byte-wise tie-break
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// What the user is currently looking at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

impl ViewQuery {
    pub fn new(search: impl Into<String>, status: StatusFilter, sort: SortKey) -> Self {
        Self {
            search: search.into(),
            status,
            sort,
        }
    }

    /// Normalized search term (lowercased, trimmed)
    fn term(&self) -> String {
        self.search.trim().to_lowercase()
    }

    /// True when nothing narrows or reorders the cache
    pub fn is_identity(&self) -> bool {
        self.term().is_empty() && self.status == StatusFilter::All && self.sort == SortKey::None
    }
}

fn matches_search(vehicle: &Vehicle, term: &str) -> bool {
    term.is_empty()
        || vehicle.model_str().to_lowercase().contains(term)
        || vehicle.plate_str().to_lowercase().contains(term)
}

/// Fleet counters shown in the statistics panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
    pub inactive: usize,
}

/// Client-side state container
#[derive(Debug, Default)]
pub struct Dashboard {
    vehicles: Vec<Vehicle>,
    query: ViewQuery,
}

impl Dashboard {
    pub fn new(query: ViewQuery) -> Self {
        Self {
            vehicles: Vec::new(),
            query,
        }
    }

    /// Replace the cache; the last fetch wins
    pub fn replace(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
    }

    /// Fetch the list from the API and replace the cache
    ///
    /// On failure the previous cache is left untouched.
    pub fn refresh<A: FleetApi + ?Sized>(&mut self, api: &A) -> Result<usize, ApiError> {
        let vehicles = api.list_vehicles()?;
        debug!(count = vehicles.len(), "vehicle cache refreshed");
        self.replace(vehicles);
        Ok(self.vehicles.len())
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    /// The filtered, sorted projection of the cache
    pub fn view(&self) -> Vec<&Vehicle> {
        let term = self.query.term();
        let mut view: Vec<&Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| matches_search(v, &term))
            .filter(|v| self.query.status.matches(v))
            .collect();

        if self.query.sort != SortKey::None {
            let sort = self.query.sort;
            view.sort_by(|a, b| sort.compare(a, b));
        }
        view
    }

    /// Counters over the whole cache, independent of the view
    pub fn stats(&self) -> FleetStats {
        let count = |status| {
            self.vehicles
                .iter()
                .filter(|v| v.status == Some(status))
                .count()
        };
        FleetStats {
            total: self.vehicles.len(),
            active: count(VehicleStatus::Active),
            maintenance: count(VehicleStatus::Maintenance),
            inactive: count(VehicleStatus::Inactive),
        }
    }

    pub fn find(&self, id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Display name for confirmations, falling back to the bare id
    pub fn display_name(&self, id: i64) -> String {
        self.find(id)
            .map(|v| v.display_name())
            .unwrap_or_else(|| format!("vehicle #{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Vehicle> {
        vec![
            Vehicle::new(1, VehicleStatus::Active)
                .with_plate("A123BV77")
                .with_model("GAZelle NEXT")
                .with_year(2019),
            Vehicle::new(2, VehicleStatus::Active)
                .with_plate("B456GD78")
                .with_model("Kamaz 54901")
                .with_year(2022),
            Vehicle::new(3, VehicleStatus::Maintenance)
                .with_plate("E789ZH79")
                .with_model("Volvo FH")
                .with_year(2015),
            Vehicle::new(4, VehicleStatus::Inactive)
                .with_plate("K001KK99")
                .with_model("volvo fmx"),
        ]
    }

    fn dashboard(query: ViewQuery) -> Dashboard {
        let mut d = Dashboard::new(query);
        d.replace(fleet());
        d
    }

    fn ids(view: &[&Vehicle]) -> Vec<i64> {
        view.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_search_by_plate_substring() {
        let d = dashboard(ViewQuery::new("456g", StatusFilter::All, SortKey::None));
        assert_eq!(ids(&d.view()), vec![2]);
    }

    #[test]
    fn test_search_by_model_case_insensitive_and_trimmed() {
        let d = dashboard(ViewQuery::new("  VOLVO ", StatusFilter::All, SortKey::None));
        assert_eq!(ids(&d.view()), vec![3, 4]);
    }

    #[test]
    fn test_empty_search_keeps_everything_in_order() {
        let d = dashboard(ViewQuery::default());
        assert!(d.query().is_identity());
        assert_eq!(ids(&d.view()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_status_filter_narrows_view() {
        let mut d = dashboard(ViewQuery::default());
        d.set_status_filter(StatusFilter::Active);
        let view = d.view();
        assert_eq!(ids(&view), vec![1, 2]);
        assert!(view.iter().all(|v| v.status == Some(VehicleStatus::Active)));
    }

    #[test]
    fn test_search_and_filter_combine() {
        let mut d = dashboard(ViewQuery::default());
        d.set_search("volvo");
        d.set_status_filter(StatusFilter::Inactive);
        assert_eq!(ids(&d.view()), vec![4]);
    }

    #[test]
    fn test_unknown_status_only_under_all() {
        let mut vehicles = fleet();
        vehicles.push(Vehicle {
            status: None,
            ..Vehicle::new(5, VehicleStatus::Active)
        });
        let mut d = Dashboard::default();
        d.replace(vehicles);
        assert_eq!(d.view().len(), 5);
        for filter in [StatusFilter::Active, StatusFilter::Maintenance, StatusFilter::Inactive] {
            d.set_status_filter(filter);
            assert!(d.view().iter().all(|v| v.id != 5));
        }
    }

    #[test]
    fn test_sort_year_ascending_is_numeric() {
        let d = dashboard(ViewQuery::new("", StatusFilter::All, SortKey::YearAsc));
        // Missing year sorts as 0
        assert_eq!(ids(&d.view()), vec![4, 3, 1, 2]);
    }

    #[test]
    fn test_sort_year_descending() {
        let d = dashboard(ViewQuery::new("", StatusFilter::All, SortKey::YearDesc));
        assert_eq!(ids(&d.view()), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_model_ignores_case() {
        let d = dashboard(ViewQuery::new("", StatusFilter::All, SortKey::ModelAsc));
        assert_eq!(ids(&d.view()), vec![1, 2, 3, 4]);
        let d = dashboard(ViewQuery::new("", StatusFilter::All, SortKey::ModelDesc));
        assert_eq!(ids(&d.view()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_sort_plate() {
        let d = dashboard(ViewQuery::new("", StatusFilter::All, SortKey::PlateDesc));
        assert_eq!(ids(&d.view()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_view_is_subset_of_cache() {
        for sort in SortKey::value_variants() {
            for status in StatusFilter::value_variants() {
                let d = dashboard(ViewQuery::new("a", *status, *sort));
                for v in d.view() {
                    assert!(d.vehicles().contains(v));
                }
            }
        }
    }

    #[test]
    fn test_replace_last_fetch_wins() {
        let mut d = dashboard(ViewQuery::default());
        d.replace(vec![Vehicle::new(9, VehicleStatus::Inactive)]);
        assert_eq!(ids(&d.view()), vec![9]);
        assert!(d.find(1).is_none());
    }

    #[test]
    fn test_refresh_failure_keeps_previous_cache() {
        use crate::core::testing::FakeApi;

        let api = FakeApi::default();
        api.vehicles.borrow_mut().extend(fleet());
        let mut d = Dashboard::default();
        assert_eq!(d.refresh(&api).unwrap(), 4);

        let failing = FakeApi {
            fail_with: Some((503, "")),
            ..Default::default()
        };
        assert!(d.refresh(&failing).is_err());
        assert_eq!(d.vehicles().len(), 4);
    }

    #[test]
    fn test_stats_cover_cache_not_view() {
        let mut d = dashboard(ViewQuery::default());
        d.set_search("kamaz");
        let stats = d.stats();
        insta::assert_yaml_snapshot!(stats, @r"
        total: 4
        active: 2
        maintenance: 1
        inactive: 1
        ");
    }

    #[test]
    fn test_display_name_fallback() {
        let d = dashboard(ViewQuery::default());
        assert_eq!(d.display_name(3), "Volvo FH (E789ZH79)");
        assert_eq!(d.display_name(42), "vehicle #42");
    }

    #[test]
    fn test_sort_key_display() {
        assert_eq!(SortKey::YearAsc.to_string(), "year-asc");
        assert_eq!(SortKey::None.to_string(), "none");
    }
}

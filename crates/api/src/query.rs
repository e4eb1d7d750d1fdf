//! Query parameter types for list endpoints.
//!
//! Each struct mirrors the raw query string of one endpoint and converts
//! into the filter its repository expects. Malformed id-list items are
//! dropped rather than rejected.

use railway_core::error::CoreError;
use railway_core::filters::{date_param, id_list_param, IdOrName, StationNameFilter};
use railway_core::pagination::Page;
use railway_db::models::crew::CrewFilter;
use railway_db::models::journey::JourneyFilter;
use railway_db::models::route::RouteFilter;
use railway_db::models::station::StationFilter;
use railway_db::models::train::TrainFilter;
use railway_db::models::train_type::TrainTypeFilter;
use serde::Deserialize;

/// `?limit=&offset=`, clamped by [`Page::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page::new(self.limit, self.offset)
    }
}

/// `GET /stations?name=kyiv,3`
#[derive(Debug, Default, Deserialize)]
pub struct StationListParams {
    pub name: Option<String>,
}

impl StationListParams {
    pub fn filter(&self) -> StationFilter {
        StationFilter {
            name: StationNameFilter::from_param(self.name.as_deref()),
        }
    }
}

/// `GET /routes?source=&destination=`
#[derive(Debug, Default, Deserialize)]
pub struct RouteListParams {
    pub source: Option<String>,
    pub destination: Option<String>,
}

impl RouteListParams {
    pub fn filter(&self) -> RouteFilter {
        RouteFilter {
            source: IdOrName::from_param(self.source.as_deref()),
            destination: IdOrName::from_param(self.destination.as_deref()),
        }
    }
}

/// `GET /train-types?name=1,2` (the name parameter carries ids).
#[derive(Debug, Default, Deserialize)]
pub struct TrainTypeListParams {
    pub name: Option<String>,
}

impl TrainTypeListParams {
    pub fn filter(&self) -> TrainTypeFilter {
        TrainTypeFilter {
            ids: id_list_param(self.name.as_deref()),
        }
    }
}

/// `GET /trains?name=1,2&train_type=3`, both id lists.
#[derive(Debug, Default, Deserialize)]
pub struct TrainListParams {
    pub name: Option<String>,
    pub train_type: Option<String>,
}

impl TrainListParams {
    pub fn filter(&self) -> TrainFilter {
        TrainFilter {
            ids: id_list_param(self.name.as_deref()),
            train_type_ids: id_list_param(self.train_type.as_deref()),
        }
    }
}

/// `GET /journeys?source=&destination=&train_name=&date=&limit=&offset=`
#[derive(Debug, Default, Deserialize)]
pub struct JourneyListParams {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub train_name: Option<String>,
    pub date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl JourneyListParams {
    /// Fails only on a malformed `date`.
    pub fn filter(&self) -> Result<JourneyFilter, CoreError> {
        Ok(JourneyFilter {
            source: IdOrName::from_param(self.source.as_deref()),
            destination: IdOrName::from_param(self.destination.as_deref()),
            train: IdOrName::from_param(self.train_name.as_deref()),
            date: date_param(self.date.as_deref())?,
            page: Page::new(self.limit, self.offset),
        })
    }
}

/// `GET /crews?name=`
#[derive(Debug, Default, Deserialize)]
pub struct CrewListParams {
    pub name: Option<String>,
}

impl CrewListParams {
    pub fn filter(&self) -> CrewFilter {
        CrewFilter {
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

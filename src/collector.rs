use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::client::HolidaySource;
use crate::country::Country;
use crate::date::DateRange;
use crate::holiday::Holiday;
use crate::output;
use crate::query::Query;
use crate::Result;

/// Fetches, filters and writes holidays, one file per country.
pub struct Collector<S> {
    source: S,
    output_dir: PathBuf,
}

impl<S: HolidaySource> Collector<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Collector {
            source,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs the whole job and returns the written paths in country order.
    ///
    /// The output directory is created if missing. Countries without any
    /// matching holiday still get an (empty) file.
    pub fn collect<C>(&self, countries: C, range: &DateRange) -> Result<Vec<PathBuf>>
    where
        C: IntoIterator<Item = Country>,
    {
        std::fs::create_dir_all(&self.output_dir)?;
        info!(start = %range.start(), end = %range.end(), "collecting holidays");

        countries
            .into_iter()
            .map(|country| {
                let holidays = self.country_holidays(country, range)?;
                output::write_results(&self.output_dir, &holidays, country, range)
            })
            .collect()
    }

    /// Every holiday of `country` inside `range`, years ascending.
    pub fn country_holidays(&self, country: Country, range: &DateRange) -> Result<Vec<Holiday>> {
        let mut matched = Vec::new();
        for query in Query::for_range(country, range) {
            let holidays = self.source.holidays(&query)?;
            let fetched = holidays.len();
            let kept = filter_holidays_by_date(holidays, range)?;
            debug!(%query, fetched, kept = kept.len(), "filtered holidays");
            matched.extend(kept);
        }
        Ok(matched)
    }
}

/// Keeps holidays whose `date.iso` lies inside `range`, bounds included.
///
/// Offsets on the holiday dates are ignored; the wall-clock reading is
/// compared against the naive range.
pub fn filter_holidays_by_date(holidays: Vec<Holiday>, range: &DateRange) -> Result<Vec<Holiday>> {
    let mut kept = Vec::with_capacity(holidays.len());
    for holiday in holidays {
        if range.contains(holiday.timestamp()?) {
            kept.push(holiday);
        }
    }
    Ok(kept)
}

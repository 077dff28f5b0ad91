use crate::country::Country;
use crate::date::DateRange;

/// One `/holidays` request: a single country and calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    country: Country,
    year: i32,
}

impl Query {
    pub fn new(country: Country, year: i32) -> Self {
        Query { country, year }
    }

    /// One query per year touched by `range`, ascending.
    pub fn for_range(country: Country, range: &DateRange) -> impl Iterator<Item = Query> {
        range.years().map(move |year| Query::new(country, year))
    }

    #[inline]
    pub fn country(&self) -> Country {
        self.country
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Query string pairs in the order the provider documents them.
    pub(crate) fn params(&self, api_key: &str) -> [(&'static str, String); 3] {
        [
            ("api_key", api_key.to_string()),
            ("country", self.country.code().to_string()),
            ("year", self.year.to_string()),
        ]
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "country={} year={}", self.country, self.year)
    }
}

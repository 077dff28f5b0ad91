use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::country::Country;
use crate::date::DateRange;
use crate::holiday::Holiday;
use crate::Result;

/// `{country}_{d}-{m}-{y}_{d}-{m}-{y}.txt`, no zero padding.
pub fn file_name(country: Country, range: &DateRange) -> String {
    let (start, end) = (range.start(), range.end());
    format!(
        "{}_{}-{}-{}_{}-{}-{}.txt",
        country.code(),
        start.day(),
        start.month(),
        start.year(),
        end.day(),
        end.month(),
        end.year()
    )
}

/// Writes one JSON object per line, replacing any previous file.
pub fn write_results(
    dir: &Path,
    holidays: &[Holiday],
    country: Country,
    range: &DateRange,
) -> Result<PathBuf> {
    let path = dir.join(file_name(country, range));
    let mut out = BufWriter::new(File::create(&path)?);
    for holiday in holidays {
        serde_json::to_writer(&mut out, holiday)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(%country, count = holidays.len(), path = %path.display(), "wrote holidays");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::date::Timestamp;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            Timestamp::from_ymd(start.0, start.1, start.2).unwrap(),
            Timestamp::from_ymd(end.0, end.1, end.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn names_files_without_padding() {
        assert_eq!(
            file_name(Country::UA, &range((1992, 1, 1), (1992, 12, 31))),
            "ua_1-1-1992_31-12-1992.txt"
        );
        assert_eq!(
            file_name(Country::GB, &range((2019, 3, 9), (2020, 10, 5))),
            "gb_9-3-2019_5-10-2020.txt"
        );
    }

    #[test]
    fn overwrites_previous_results() {
        let dir = tempfile::tempdir().unwrap();
        let range = range((1992, 1, 1), (1992, 12, 31));
        let holiday = Holiday::try_from(json!({ "name": "New Year's Day", "date": { "iso": "1992-01-01" } }))
            .unwrap();

        let path = write_results(dir.path(), &[holiday.clone(), holiday.clone()], Country::US, &range)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);

        let again = write_results(dir.path(), &[holiday], Country::US, &range).unwrap();
        assert_eq!(again, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "{\"name\":\"New Year's Day\",\"date\":{\"iso\":\"1992-01-01\"}}\n"
        );
    }

    #[test]
    fn empty_list_leaves_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(dir.path(), &[], Country::GB, &range((1992, 1, 1), (1992, 12, 31)))
            .unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }
}

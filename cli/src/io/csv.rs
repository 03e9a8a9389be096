use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter, Writer, WriterBuilder};

use bgputil::{Error, Route, RouteSink, RouteSource};

/// Route source reading `prefix,as_path` CSV files.
///
/// Column positions are discovered from the header line, case-insensitively;
/// both `as_path` and `aspath` are accepted for the path column. Extra
/// columns are ignored. Rows that fail validation are skipped with a
/// warning, not surfaced as errors.
pub(crate) struct CsvRoutes<R: Read> {
    records: StringRecordsIntoIter<R>,
    prefix_idx: usize,
    as_path_idx: usize,
}

impl CsvRoutes<File> {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> CsvRoutes<R> {
    pub(crate) fn from_reader(input: R) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader
            .headers()
            .map_err(|err| Error::General(err.to_string()))?;
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|column| names.iter().any(|name| column.trim().eq_ignore_ascii_case(name)))
        };
        let prefix_idx = find(&["prefix"]).ok_or("CSV input has no 'prefix' column")?;
        let as_path_idx =
            find(&["as_path", "aspath"]).ok_or("CSV input has no 'as_path' column")?;
        Ok(Self {
            records: reader.into_records(),
            prefix_idx,
            as_path_idx,
        })
    }
}

impl<R: Read> RouteSource for CsvRoutes<R> {
    fn next_route(&mut self) -> Result<Option<Route>, Error> {
        for record in self.records.by_ref() {
            let record = record.map_err(|err| Error::General(err.to_string()))?;
            let prefix = record.get(self.prefix_idx).unwrap_or("");
            let as_path = record.get(self.as_path_idx).unwrap_or("");
            match Route::new(prefix, as_path) {
                Ok(route) => return Ok(Some(route)),
                Err(err) => log::warn!("skipping invalid route: {err}"),
            }
        }
        Ok(None)
    }
}

/// Route sink writing `prefix,as_path` CSV files.
pub(crate) struct CsvRouteWriter<W: Write> {
    writer: Writer<W>,
}

impl CsvRouteWriter<File> {
    pub(crate) fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvRouteWriter<W> {
    pub(crate) fn from_writer(output: W) -> Result<Self, Error> {
        let mut writer = WriterBuilder::new().from_writer(output);
        writer
            .write_record(["prefix", "as_path"])
            .map_err(|err| Error::General(err.to_string()))?;
        Ok(Self { writer })
    }

    pub(crate) fn finish(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RouteSink for CsvRouteWriter<W> {
    fn write_route(&mut self, route: &Route) -> Result<(), Error> {
        self.writer
            .write_record([route.prefix(), route.as_path()])
            .map_err(|err| Error::General(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str) -> Vec<Route> {
        let mut source = CsvRoutes::from_reader(input.as_bytes()).unwrap();
        let mut routes = Vec::new();
        while let Some(route) = source.next_route().unwrap() {
            routes.push(route);
        }
        routes
    }

    #[test]
    fn reads_routes_and_skips_invalid_rows() {
        let routes = read_all(
            "prefix,as_path\n\
             192.0.2.0/24,64500 64501\n\
             not-a-prefix,64500\n\
             10.0.0.0/8,not a path\n\
             2001:db8::/32,64502\n",
        );
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].prefix(), "192.0.2.0/24");
        assert_eq!(routes[1].prefix(), "2001:db8::/32");
    }

    #[test]
    fn header_lookup_is_case_insensitive_and_order_free() {
        let routes = read_all(
            "As_Path,Community,Prefix\n\
             64500,foo:1,192.0.2.0/24\n",
        );
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].as_path(), "64500");
    }

    #[test]
    fn aspath_header_spelling_variant() {
        let routes = read_all("prefix,aspath\n192.0.2.0/24,64500\n");
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn missing_columns_are_an_error() {
        assert!(CsvRoutes::from_reader("prefix\n192.0.2.0/24\n".as_bytes()).is_err());
        assert!(CsvRoutes::from_reader("as_path\n64500\n".as_bytes()).is_err());
    }

    #[test]
    fn quoted_fields() {
        let routes = read_all("prefix,as_path\n\"192.0.2.0/24\",\"64500 64501\"\n");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].as_path(), "64500 64501");
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        {
            let mut writer = CsvRouteWriter::from_writer(&mut buf).unwrap();
            writer
                .write_route(&Route::new("192.0.2.0/24", "64500").unwrap())
                .unwrap();
            writer.finish().unwrap();
        }
        let written = String::from_utf8(buf).unwrap();
        assert_eq!(written, "prefix,as_path\n192.0.2.0/24,64500\n");
    }
}

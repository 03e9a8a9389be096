use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

use bgputil::{Error, Route, RouteSink, RouteSource};

/// Route source reading one CIDR per line.
///
/// Blank lines and lines that are not valid prefixes are skipped with a
/// warning. Plain-text routes carry no AS_PATH.
pub(crate) struct PlainPrefixes<R: BufRead> {
    lines: Lines<R>,
}

impl PlainPrefixes<BufReader<File>> {
    pub(crate) fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> PlainPrefixes<R> {
    pub(crate) fn from_reader(input: R) -> Self {
        Self {
            lines: input.lines(),
        }
    }
}

impl<R: BufRead> RouteSource for PlainPrefixes<R> {
    fn next_route(&mut self) -> Result<Option<Route>, Error> {
        for line in self.lines.by_ref() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Route::prefix_only(line) {
                Ok(route) => return Ok(Some(route)),
                Err(err) => log::warn!("skipping invalid prefix: {err}"),
            }
        }
        Ok(None)
    }
}

/// Route sink writing one prefix per line.
pub(crate) struct PlainPrefixWriter<W: Write> {
    writer: W,
}

impl PlainPrefixWriter<File> {
    pub(crate) fn create<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> PlainPrefixWriter<W> {
    pub(crate) fn from_writer(output: W) -> Self {
        Self { writer: output }
    }

    pub(crate) fn finish(mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RouteSink for PlainPrefixWriter<W> {
    fn write_route(&mut self, route: &Route) -> Result<(), Error> {
        writeln!(self.writer, "{}", route.prefix())?;
        Ok(())
    }
}

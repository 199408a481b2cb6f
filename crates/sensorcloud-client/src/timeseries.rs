//! Lazy, chunked download of time-series data.

use reqwest::StatusCode;

use sensorcloud_types::{Point, TimeRange};

use crate::client::{API_VERSION, Client, XDR_CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::transport::RequestOptions;
use crate::wire;

/// How many points one range query is expected to return at most.
///
/// The service chunks its responses at a few tens of thousands of points per
/// request. That ceiling is a service-side assumption and not part of the
/// protocol; nothing in this client depends on it beyond buffering one chunk
/// at a time.
pub const EXPECTED_CHUNK_POINT_CEILING: usize = 50_000;

/// A lazy sequence of [`Point`]s over an inclusive timestamp range.
///
/// The stream itself is just a description of the query; no data moves until
/// it is iterated. Iteration downloads one bounded chunk at a time and
/// yields its points in stream order, so a large range is never
/// materialized in memory at once.
///
/// A stream is a value: [`TimeSeriesStream::range`] returns a *new* stream
/// over a different range and leaves the original, including any iterator
/// already pulled from it, untouched.
#[derive(Debug, Clone)]
pub struct TimeSeriesStream<'a> {
    client: &'a Client,
    sensor: String,
    channel: String,
    range: TimeRange,
}

impl<'a> TimeSeriesStream<'a> {
    pub(crate) fn new(
        client: &'a Client,
        sensor: impl Into<String>,
        channel: impl Into<String>,
        range: TimeRange,
    ) -> Self {
        Self {
            client,
            sensor: sensor.into(),
            channel: channel.into(),
            range,
        }
    }

    /// Returns the timestamp range this stream covers.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        self.range
    }

    /// Returns a new stream over `range`, leaving this one unaffected.
    #[must_use]
    pub fn range(&self, range: TimeRange) -> Self {
        Self {
            client: self.client,
            sensor: self.sensor.clone(),
            channel: self.channel.clone(),
            range,
        }
    }

    /// Starts iterating over the points in the range.
    #[must_use]
    pub fn points(&self) -> Points<'a> {
        Points {
            client: self.client,
            path: format!(
                "/sensors/{}/channels/{}/streams/timeseries/data/",
                self.sensor, self.channel
            ),
            current_ns: self.range.start_nanoseconds(),
            end_ns: self.range.end_nanoseconds(),
            buffer: Vec::new().into_iter(),
            finished: false,
        }
    }
}

impl<'a> IntoIterator for &TimeSeriesStream<'a> {
    type Item = Result<Point>;
    type IntoIter = Points<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Iterator over the points of a [`TimeSeriesStream`].
///
/// Fetches the next chunk only once the current one is exhausted. The
/// sequence ends when the service returns an empty chunk or the cursor
/// passes the end of the range; an error is terminal and the iterator is
/// fused afterwards.
#[derive(Debug)]
pub struct Points<'a> {
    client: &'a Client,
    path: String,
    current_ns: u64,
    end_ns: u64,
    buffer: std::vec::IntoIter<Point>,
    finished: bool,
}

impl Points<'_> {
    /// Fetches one bounded chunk for `[current_ns, end_ns]`.
    ///
    /// A `404 Not Found` means the range holds no data and comes back as an
    /// empty chunk.
    fn fetch_chunk(&self) -> Result<Vec<Point>> {
        let options = RequestOptions::new()
            .param("version", API_VERSION)
            .param("starttime", self.current_ns)
            .param("endtime", self.end_ns)
            .accept(XDR_CONTENT_TYPE);

        let response = self.client.get(&self.path, options)?;
        match response.status {
            StatusCode::OK => Ok(wire::decode_point_stream(&response.body)),
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            _ => Err(Error::unexpected(
                "download time-series data",
                &response,
            )),
        }
    }
}

impl Iterator for Points<'_> {
    type Item = Result<Point>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(point) = self.buffer.next() {
                return Some(Ok(point));
            }
            if self.finished || self.current_ns > self.end_ns {
                self.finished = true;
                return None;
            }

            match self.fetch_chunk() {
                Ok(points) => {
                    let Some(last) = points.last() else {
                        // An empty chunk means the rest of the range holds
                        // no data; the sequence is exhausted.
                        self.finished = true;
                        return None;
                    };
                    match last.timestamp_nanoseconds().checked_add(1) {
                        Some(next_ns) => self.current_ns = next_ns,
                        None => self.finished = true,
                    }
                    self.buffer = points.into_iter();
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Points<'_> {}

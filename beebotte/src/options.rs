// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;

use beebotte_core::{Error, Result};

/// Where read operations take their records from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Source {
    /// Raw persisted records.
    #[default]
    Raw,
    /// Hourly statistics.
    HourStats,
    /// Daily statistics.
    DayStats,
}

impl Source {
    /// Value sent in the `source` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Raw => "raw",
            Source::HourStats => "hour-stats",
            Source::DayStats => "day-stats",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for read operations.
///
/// Unset fields are omitted from the query, except `limit` and `source`
/// which fall back to the defaults of each operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOptions {
    /// Number of records to return.
    pub limit: Option<u32>,
    /// Read raw records or statistics.
    pub source: Option<Source>,
    /// Time range of the returned records, like `1hour`, `2day` or `today`.
    pub time_range: Option<String>,
    /// Filter applied to the returned records.
    pub filter: Option<String>,
    /// Fraction of records to return, between 0 and 1.
    pub sample_rate: Option<f64>,
}

impl ReadOptions {
    /// Create empty read options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set source
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Set time range
    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }

    /// Set filter
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set sample rate
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Build the query pairs in their wire order, using `default_limit` when
    /// no limit is set.
    pub(crate) fn to_query(&self, default_limit: u32) -> Result<Vec<(&'static str, String)>> {
        let mut query = vec![
            ("limit", self.limit.unwrap_or(default_limit).to_string()),
            ("source", self.source.unwrap_or_default().to_string()),
        ];
        if let Some(v) = &self.time_range {
            query.push(("time-range", v.clone()));
        }
        if let Some(v) = &self.filter {
            query.push(("filter", v.clone()));
        }
        if let Some(v) = self.sample_rate {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::request_invalid(format!(
                    "sample rate must be between 0 and 1, got {v}"
                )));
            }
            query.push(("sample-rate", v.to_string()));
        }

        Ok(query)
    }
}

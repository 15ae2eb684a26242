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

//! Records sent by bulk operations and the request bodies of all writes.

use serde::Serialize;
use serde_json::Value;

/// One record of a bulk write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WriteRecord {
    /// Resource to write to.
    pub resource: String,
    /// Value to persist.
    pub data: Value,
    /// Milliseconds since the unix epoch, defaulted to the call time if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl WriteRecord {
    /// Create a record without timestamp.
    pub fn new(resource: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            resource: resource.into(),
            data: data.into(),
            ts: None,
        }
    }

    /// Set timestamp
    pub fn with_ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }
}

/// One record of a bulk publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishRecord {
    /// Resource to publish to.
    pub resource: String,
    /// Value to publish.
    pub data: Value,
    /// Milliseconds since the unix epoch, defaulted to the call time if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    /// Opaque tag identifying the originator, passed through unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl PublishRecord {
    /// Create a record without timestamp and source.
    pub fn new(resource: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            resource: resource.into(),
            data: data.into(),
            ts: None,
            source: None,
        }
    }

    /// Set timestamp
    pub fn with_ts(mut self, ts: i64) -> Self {
        self.ts = Some(ts);
        self
    }

    /// Set source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Body of a single write or publish.
#[derive(Debug, Serialize)]
pub(crate) struct PointBody<'a> {
    pub data: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    pub ts: i64,
}

/// Body of a bulk write or publish.
#[derive(Debug, Serialize)]
pub(crate) struct BulkBody<'a, T> {
    pub data: &'a [T],
}

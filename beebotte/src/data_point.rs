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

use beebotte_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// DataPoint is one time-stamped sample of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Sample value.
    pub data: Value,
    /// Milliseconds since the unix epoch.
    pub ts: i64,
    /// Channel the sample belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Resource the sample belongs to, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl DataPoint {
    /// Create a data point without channel and resource.
    pub fn new(data: impl Into<Value>, ts: i64) -> Self {
        Self {
            data: data.into(),
            ts,
            channel: None,
            resource: None,
        }
    }

    /// Set channel
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set resource
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Build a data point from a record returned by the service.
    ///
    /// Only `data` and `ts` are taken from the record; any channel or resource
    /// echoed by the service is ignored.
    pub fn from_record(record: &Value) -> Result<Self> {
        let data = record
            .get("data")
            .ok_or_else(|| Error::malformed_response(format!("record without data: {record}")))?;
        let ts = record
            .get("ts")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                Error::malformed_response(format!("record without integer ts: {record}"))
            })?;

        Ok(Self::new(data.clone(), ts))
    }

    /// Serialize into a record, with all of `owner`, `channel`, `resource`,
    /// `data` and `ts` present. Unknown values are `null`.
    pub fn to_record(&self, owner: Option<&str>) -> Value {
        json!({
            "owner": owner,
            "channel": self.channel,
            "resource": self.resource,
            "data": self.data,
            "ts": self.ts,
        })
    }
}

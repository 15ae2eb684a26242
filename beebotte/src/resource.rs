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

use serde_json::Value;

use beebotte_core::{Error, ErrorKind, Result};

use crate::{Client, DataPoint, ReadOptions};

/// ResourceHandle binds a client to one resource of a channel.
///
/// Created by [`Client::resource`].
#[derive(Debug, Clone, Copy)]
pub struct ResourceHandle<'a> {
    client: &'a Client,
    channel: &'a str,
    resource: &'a str,
}

impl<'a> ResourceHandle<'a> {
    pub(crate) fn new(client: &'a Client, channel: &'a str, resource: &'a str) -> Self {
        Self {
            client,
            channel,
            resource,
        }
    }

    /// Channel of this resource.
    pub fn channel(&self) -> &str {
        self.channel
    }

    /// Name of this resource.
    pub fn name(&self) -> &str {
        self.resource
    }

    /// Persist one value, see [`Client::write`].
    pub async fn write(&self, data: impl Into<Value>, ts: Option<i64>) -> Result<Value> {
        self.client
            .write(self.channel, self.resource, data, ts)
            .await
    }

    /// Publish one value, see [`Client::publish`].
    pub async fn publish(
        &self,
        data: impl Into<Value>,
        ts: Option<i64>,
        source: Option<&str>,
    ) -> Result<Value> {
        self.client
            .publish(self.channel, self.resource, data, ts, source)
            .await
    }

    /// Read records of this resource.
    ///
    /// With an `owner` the public records of that owner are read without
    /// signing, otherwise the records of the caller are read.
    pub async fn read(&self, opts: &ReadOptions, owner: Option<&str>) -> Result<Vec<DataPoint>> {
        match owner {
            Some(owner) => {
                self.client
                    .read_public(owner, self.channel, self.resource, opts)
                    .await
            }
            None => self.client.read(self.channel, self.resource, opts).await,
        }
    }

    /// Get the most recent value of this resource.
    ///
    /// Returns a not found error if the resource has no records.
    pub async fn recent_val(&self) -> Result<DataPoint> {
        let opts = ReadOptions::new().with_limit(1);
        let points = self
            .client
            .read(self.channel, self.resource, &opts)
            .await?;

        points
            .into_iter()
            .next()
            .map(|p| p.with_channel(self.channel).with_resource(self.resource))
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!("resource {}.{} has no records", self.channel, self.resource),
                )
            })
    }
}

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

use bytes::Bytes;
use http::Request;
use log::debug;
use serde_json::Value;

use beebotte_core::time::timestamp_millis;
use beebotte_core::{Context, Error, ProvideCredential, Result, Signer};

use crate::build::{Endpoint, RequestBuilder};
use crate::classify::classify;
use crate::constants::*;
use crate::provide_credential::StaticCredentialProvider;
use crate::record::{BulkBody, PointBody};
use crate::{
    ClientAuth, Config, Credential, DataPoint, PublishRecord, ReadOptions, RequestSigner,
    ResourceHandle, WriteRecord,
};

/// Client talks to the beebotte data API.
///
/// Every operation performs exactly one request through the context's
/// [`HttpSend`](beebotte_core::HttpSend). All operations except
/// [`Client::read_public`] are signed with the credential loaded from the
/// provider, which is loaded once and reused while valid.
///
/// ## Example
///
/// ```no_run
/// use beebotte::{Client, Config, Context, StaticCredentialProvider};
///
/// # async fn example(ctx: Context) -> beebotte::Result<()> {
/// let client = Client::new(
///     ctx,
///     Config::new(),
///     StaticCredentialProvider::new("access_key", "secret_key"),
/// );
/// client.write("dev", "temp", 21.5, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    config: Config,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a new client loading its credential from `provider`.
    pub fn new(
        ctx: Context,
        config: Config,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), provider, RequestSigner::new());
        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Create a new client with a static access key and secret key.
    pub fn with_credential(ctx: Context, config: Config, access_key: &str, secret_key: &str) -> Self {
        Self::new(
            ctx,
            config,
            StaticCredentialProvider::new(access_key, secret_key),
        )
    }

    /// Get the config used by this client.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a handle bound to one resource of a channel.
    pub fn resource<'a>(&'a self, channel: &'a str, resource: &'a str) -> ResourceHandle<'a> {
        ResourceHandle::new(self, channel, resource)
    }

    /// Read records of a public resource owned by `owner`.
    ///
    /// The request is not signed. Defaults to the last 750 raw records.
    pub async fn read_public(
        &self,
        owner: &str,
        channel: &str,
        resource: &str,
        opts: &ReadOptions,
    ) -> Result<Vec<DataPoint>> {
        let query = opts.to_query(DEFAULT_PUBLIC_READ_LIMIT)?;
        let req = self.builder().get(
            &Endpoint::PublicRead {
                owner,
                channel,
                resource,
            },
            &query,
            self.ctx.now(),
        )?;

        let value = self.send(req, false).await?;
        parse_points(value)
    }

    /// Read records of a resource.
    ///
    /// Defaults to the last raw record.
    pub async fn read(
        &self,
        channel: &str,
        resource: &str,
        opts: &ReadOptions,
    ) -> Result<Vec<DataPoint>> {
        let query = opts.to_query(DEFAULT_READ_LIMIT)?;
        let req = self.builder().get(
            &Endpoint::Read { channel, resource },
            &query,
            self.ctx.now(),
        )?;

        let value = self.send(req, true).await?;
        parse_points(value)
    }

    /// Persist one value of a resource.
    ///
    /// `ts` is in milliseconds since the unix epoch and defaults to now.
    pub async fn write(
        &self,
        channel: &str,
        resource: &str,
        data: impl Into<Value>,
        ts: Option<i64>,
    ) -> Result<Value> {
        let now = self.ctx.now();
        let data = data.into();
        let body = PointBody {
            data: &data,
            source: None,
            ts: ts.unwrap_or_else(|| timestamp_millis(now)),
        };
        let req = self
            .builder()
            .post(&Endpoint::Write { channel, resource }, &body, now)?;

        self.send(req, true).await
    }

    /// Persist several values of a channel in one request.
    ///
    /// Records are sent in the given order. Records without `ts` get the
    /// current time.
    pub async fn write_bulk(&self, channel: &str, mut records: Vec<WriteRecord>) -> Result<Value> {
        let now = self.ctx.now();
        for record in records.iter_mut() {
            record.ts.get_or_insert_with(|| timestamp_millis(now));
        }
        let req = self.builder().post(
            &Endpoint::WriteBulk { channel },
            &BulkBody { data: &records },
            now,
        )?;

        self.send(req, true).await
    }

    /// Publish one transient value to the subscribers of a resource.
    ///
    /// `ts` defaults to now. `source` is passed through unmodified.
    pub async fn publish(
        &self,
        channel: &str,
        resource: &str,
        data: impl Into<Value>,
        ts: Option<i64>,
        source: Option<&str>,
    ) -> Result<Value> {
        let now = self.ctx.now();
        let data = data.into();
        let body = PointBody {
            data: &data,
            source,
            ts: ts.unwrap_or_else(|| timestamp_millis(now)),
        };
        let req = self
            .builder()
            .post(&Endpoint::Publish { channel, resource }, &body, now)?;

        self.send(req, true).await
    }

    /// Publish several transient values of a channel in one request.
    pub async fn publish_bulk(
        &self,
        channel: &str,
        mut records: Vec<PublishRecord>,
    ) -> Result<Value> {
        let now = self.ctx.now();
        for record in records.iter_mut() {
            record.ts.get_or_insert_with(|| timestamp_millis(now));
        }
        let req = self.builder().post(
            &Endpoint::PublishBulk { channel },
            &BulkBody { data: &records },
            now,
        )?;

        self.send(req, true).await
    }

    /// Sign a client authentication request for the real-time service.
    ///
    /// No request is sent. Returns `<access_key>:<signature>`.
    pub async fn sign_client_auth(&self, auth: &ClientAuth) -> Result<String> {
        let cred = self.signer.credential().await?;
        Ok(auth.sign(&cred))
    }

    fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.config)
    }

    async fn send(&self, req: Request<Bytes>, signed: bool) -> Result<Value> {
        let (mut parts, body) = req.into_parts();
        if signed {
            self.signer.sign(&mut parts).await?;
        }

        debug!("sending request: {} {}", parts.method, parts.uri);
        let resp = self
            .ctx
            .http_send(Request::from_parts(parts, body))
            .await?;
        debug!("received response: {}", resp.status());

        classify(resp.status(), resp.body())
    }
}

/// Convert a read response into data points, keeping the server order.
///
/// Both a bare array of records and a `{"data": [...]}` envelope are
/// accepted.
fn parse_points(value: Value) -> Result<Vec<DataPoint>> {
    let records = match &value {
        Value::Array(records) => records,
        Value::Object(object) => match object.get("data") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(Error::malformed_response(format!(
                    "read response without records: {value}"
                )))
            }
        },
        _ => {
            return Err(Error::malformed_response(format!(
                "read response is not a list of records: {value}"
            )))
        }
    };

    records.iter().map(DataPoint::from_record).collect()
}

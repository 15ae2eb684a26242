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

//! Construction of the unsigned HTTP requests sent to the service.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, DATE};
use http::{Method, Request};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;

use beebotte_core::hash::base64_md5;
use beebotte_core::time::{format_http_date, DateTime};
use beebotte_core::{Error, Result};

use crate::config::Config;
use crate::constants::*;

/// Service endpoints, one variant per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint<'a> {
    PublicRead {
        owner: &'a str,
        channel: &'a str,
        resource: &'a str,
    },
    Read {
        channel: &'a str,
        resource: &'a str,
    },
    Write {
        channel: &'a str,
        resource: &'a str,
    },
    WriteBulk {
        channel: &'a str,
    },
    Publish {
        channel: &'a str,
        resource: &'a str,
    },
    PublishBulk {
        channel: &'a str,
    },
}

impl Endpoint<'_> {
    /// Build the request path, with every segment percent encoded.
    ///
    /// Empty, `.` and `..` segments are rejected, the signed path must be the
    /// path sent on the wire.
    pub(crate) fn path(&self) -> Result<String> {
        let (prefix, segments) = match *self {
            Endpoint::PublicRead {
                owner,
                channel,
                resource,
            } => (PUBLIC_READ_ENDPOINT, vec![owner, channel, resource]),
            Endpoint::Read { channel, resource } => (READ_ENDPOINT, vec![channel, resource]),
            Endpoint::Write { channel, resource } => (WRITE_ENDPOINT, vec![channel, resource]),
            Endpoint::WriteBulk { channel } => (WRITE_ENDPOINT, vec![channel]),
            Endpoint::Publish { channel, resource } => (PUBLISH_ENDPOINT, vec![channel, resource]),
            Endpoint::PublishBulk { channel } => (PUBLISH_ENDPOINT, vec![channel]),
        };

        let mut path = prefix.to_string();
        for segment in segments {
            if matches!(segment, "" | "." | "..") {
                return Err(Error::request_invalid(format!(
                    "invalid path segment {segment:?} in {self:?}"
                )));
            }
            path.push('/');
            path.extend(utf8_percent_encode(segment, PATH_SEGMENT_ENCODE_SET));
        }
        Ok(path)
    }
}

/// RequestBuilder turns endpoints, queries and bodies into ready to sign
/// requests.
///
/// Every request carries `Content-Type` and `Date`. Requests with a body also
/// carry `Content-MD5`, computed over the exact bytes that are sent.
#[derive(Debug, Clone)]
pub(crate) struct RequestBuilder<'a> {
    config: &'a Config,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build a GET request with the query pairs form-urlencoded in the given
    /// order.
    pub(crate) fn get(
        &self,
        endpoint: &Endpoint<'_>,
        query: &[(&str, String)],
        now: DateTime,
    ) -> Result<Request<Bytes>> {
        let mut uri = format!("{}{}", self.config.base_url(), endpoint.path()?);
        if !query.is_empty() {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (k, v) in query {
                serializer.append_pair(k, v);
            }
            uri.push('?');
            uri.push_str(&serializer.finish());
        }

        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(DATE, format_http_date(now))
            .body(Bytes::new())?;
        Ok(req)
    }

    /// Build a POST request with `body` serialized as compact JSON.
    pub(crate) fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint<'_>,
        body: &T,
        now: DateTime,
    ) -> Result<Request<Bytes>> {
        let path = endpoint.path()?;
        let body = serde_json::to_vec(body)
            .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))?;

        let req = Request::builder()
            .method(Method::POST)
            .uri(format!("{}{}", self.config.base_url(), path))
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(CONTENT_MD5, base64_md5(&body))
            .header(DATE, format_http_date(now))
            .body(Bytes::from(body))?;
        Ok(req)
    }
}

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

//! Interpretation of service responses.

use beebotte_core::{Error, ErrorKind, Result};
use http::StatusCode;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: u32,
    message: String,
}

/// Map a status and application error code to its error kind.
///
/// Pairs outside the documented table map to [`ErrorKind::Unexpected`].
pub fn error_kind(status: u16, code: u32) -> ErrorKind {
    match (status, code) {
        (400, 1101) => ErrorKind::Authentication,
        (400, 1401) => ErrorKind::Parameter,
        (400, 1403) => ErrorKind::BadRequest,
        (400, 1404) => ErrorKind::InvalidType,
        (400, 1405) => ErrorKind::BadType,
        (400, 1406) => ErrorKind::PayloadLimit,
        (405, 1102) => ErrorKind::NotAllowed,
        (500, 1201) => ErrorKind::Internal,
        (404, 1301..=1303) => ErrorKind::NotFound,
        (404, 1304..=1306) => ErrorKind::AlreadyExist,
        _ => ErrorKind::Unexpected,
    }
}

/// Turn a response status and body into the parsed JSON body or an error.
///
/// - Statuses below 400 return the parsed body, `Value::Null` for an empty one.
/// - Other statuses return the error described by `error.code` and
///   `error.message` in the body.
/// - Bodies that can't be interpreted return a malformed response error.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Value> {
    if status.as_u16() < 400 {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(body).map_err(|e| {
            Error::malformed_response("response body is not valid json")
                .with_status(status.as_u16())
                .with_source(e)
        });
    }

    let ErrorBody { error } = serde_json::from_slice(body).map_err(|e| {
        Error::malformed_response(format!(
            "error response without error code and message: {}",
            String::from_utf8_lossy(body)
        ))
        .with_status(status.as_u16())
        .with_source(e)
    })?;

    let kind = error_kind(status.as_u16(), error.code);
    warn!(
        "service returned {kind}: status {}, code {}: {}",
        status.as_u16(),
        error.code,
        error.message
    );
    Err(Error::service(
        kind,
        status.as_u16(),
        error.code,
        error.message,
    ))
}

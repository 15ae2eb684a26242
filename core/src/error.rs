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
use thiserror::Error;

/// The error type for beebotte operations.
///
/// Errors returned by the service carry the HTTP status and the application
/// error code next to the message; local failures leave both unset.
#[derive(Error, Debug)]
#[error("{kind}: {}", self.describe())]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    code: Option<u32>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request signature rejected by the service (400/1101).
    Authentication,
    /// Missing or invalid request parameter (400/1401).
    Parameter,
    /// Malformed request (400/1403).
    BadRequest,
    /// Unknown or invalid resource type (400/1404).
    InvalidType,
    /// Value does not match the resource type (400/1405).
    BadType,
    /// Request payload too large (400/1406).
    PayloadLimit,
    /// Operation not allowed for this account (405/1102).
    NotAllowed,
    /// Internal service error (500/1201).
    Internal,
    /// Channel, resource or record not found (404/1301-1303).
    NotFound,
    /// Channel or resource already exists (404/1304-1306).
    AlreadyExist,
    /// Any status and code pair outside the documented table.
    Unexpected,

    /// Response body could not be interpreted.
    MalformedResponse,
    /// The HTTP round trip itself failed.
    Transport,
    /// Credentials are missing or invalid.
    CredentialInvalid,
    /// Request cannot be built (invalid options, header or uri).
    RequestInvalid,
    /// Configuration error (missing fields, invalid values).
    ConfigInvalid,
}

impl ErrorKind {
    /// Check if this kind belongs to the service's application error table.
    pub fn is_service_kind(&self) -> bool {
        matches!(
            self,
            ErrorKind::Authentication
                | ErrorKind::Parameter
                | ErrorKind::BadRequest
                | ErrorKind::InvalidType
                | ErrorKind::BadType
                | ErrorKind::PayloadLimit
                | ErrorKind::NotAllowed
                | ErrorKind::Internal
                | ErrorKind::NotFound
                | ErrorKind::AlreadyExist
                | ErrorKind::Unexpected
        )
    }
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            code: None,
            source: None,
        }
    }

    /// Create an error reported by the service.
    pub fn service(kind: ErrorKind, status: u16, code: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: Some(status),
            code: Some(code),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status of the response that caused this error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    ///
    /// For service errors this is the message returned by the service.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the response, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Application error code returned by the service, if any.
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// Check if this error was reported by the service.
    pub fn is_service_error(&self) -> bool {
        self.code.is_some() && self.kind.is_service_kind()
    }

    fn describe(&self) -> String {
        match (self.status, self.code) {
            (Some(status), Some(code)) => {
                format!("status {status}, code {code}: {}", self.message)
            }
            (Some(status), None) => format!("status {status}: {}", self.message),
            _ => self.message.clone(),
        }
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a malformed response error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Authentication => write!(f, "authentication error"),
            ErrorKind::Parameter => write!(f, "parameter error"),
            ErrorKind::BadRequest => write!(f, "bad request"),
            ErrorKind::InvalidType => write!(f, "invalid type"),
            ErrorKind::BadType => write!(f, "bad type"),
            ErrorKind::PayloadLimit => write!(f, "payload limit exceeded"),
            ErrorKind::NotAllowed => write!(f, "not allowed"),
            ErrorKind::Internal => write!(f, "internal error"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::AlreadyExist => write!(f, "already exists"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_service_error_display() {
        let err = Error::service(ErrorKind::Parameter, 400, 1401, "missing data");
        assert_eq!(
            "parameter error: status 400, code 1401: missing data",
            err.to_string()
        );
        assert_eq!(Some(400), err.status());
        assert_eq!(Some(1401), err.code());
        assert_eq!("missing data", err.message());
        assert!(err.is_service_error());
    }

    #[test]
    fn test_local_conversions_are_not_service_kinds() {
        let errs = [
            Error::from(anyhow::anyhow!("failed to build body")),
            Error::from(std::fmt::Error),
            Error::from(http::HeaderValue::from_bytes(b"\n").unwrap_err()),
        ];
        for err in errs {
            assert_eq!(ErrorKind::RequestInvalid, err.kind());
            assert!(!err.kind().is_service_kind());
            assert!(!err.is_service_error());
        }
    }

    #[test]
    fn test_local_error_display() {
        let err = Error::transport("connection refused");
        assert_eq!("transport error: connection refused", err.to_string());
        assert_eq!(None, err.status());
        assert!(!err.is_service_error());

        let err = Error::malformed_response("body is not json").with_status(502);
        assert_eq!(
            "malformed response: status 502: body is not json",
            err.to_string()
        );
        assert!(!err.is_service_error());
    }
}

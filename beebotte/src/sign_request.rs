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

//! Beebotte request signer.
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::header::DATE;
use http::HeaderName;
use http::HeaderValue;
use log::debug;

use beebotte_core::time::format_http_date;
use beebotte_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements the beebotte API authorization.
///
/// The request must already carry its `Content-Type` and, for requests with
/// a body, its `Content-MD5` header. A `Date` header is added from the
/// context clock if the request doesn't have one yet.
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let k = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        let mut req = SigningRequest::build(parts)?;

        if !req.headers.contains_key(DATE) {
            req.headers.insert(DATE, format_http_date(ctx.now()).parse()?);
        }

        let content_md5 = HeaderName::from_static(CONTENT_MD5);
        let string_to_sign = string_to_sign(
            req.method.as_str(),
            req.header_get_or_default(&content_md5)?,
            req.header_get_or_default(&CONTENT_TYPE)?,
            req.header_get_or_default(&DATE)?,
            &req.path_and_query(),
        );
        debug!("string to sign: {}", &string_to_sign);

        req.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = k.sign(&string_to_sign).parse()?;
            value.set_sensitive(true);

            value
        });

        req.apply(parts)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// URI
/// ```
///
/// `URI` is the path followed by the query string, if any. Empty fields keep
/// their line, so a request without body signs an empty `Content-MD5`.
pub fn string_to_sign(
    method: &str,
    content_md5: &str,
    content_type: &str,
    date: &str,
    uri: &str,
) -> String {
    format!("{method}\n{content_md5}\n{content_type}\n{date}\n{uri}")
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use beebotte_core::time::parse_rfc2822;
    use beebotte_core::{FixedClock, Signer};
    use http::Uri;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::provide_credential::StaticCredentialProvider;

    fn test_context() -> Context {
        let now = parse_rfc2822("Mon, 15 Aug 2022 16:50:12 GMT").unwrap();
        Context::new().with_clock(FixedClock(now))
    }

    #[test]
    fn test_string_to_sign_order() {
        assert_eq!(
            "POST\nabc\napplication/json\nD\n/v1/data/write/c/r",
            string_to_sign("POST", "abc", "application/json", "D", "/v1/data/write/c/r")
        );
    }

    #[tokio::test]
    async fn test_sign_post() -> Result<()> {
        let loader = StaticCredentialProvider::new("access_key", "secret");
        let signer = Signer::new(test_context(), loader, RequestSigner::new());

        let mut req = http::Request::post(Uri::from_str(
            "http://api.beebotte.com:80/v1/data/write/dev/temp",
        )?)
        .body(())?;
        req.headers_mut()
            .insert(CONTENT_MD5, HeaderValue::from_static("IVwEvdITCKIzSF+J5TAgxg=="));
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        let (mut parts, _) = req.into_parts();
        signer.sign(&mut parts).await?;

        assert_eq!("Mon, 15 Aug 2022 16:50:12 GMT", parts.headers[DATE]);
        let auth = &parts.headers[AUTHORIZATION];
        assert!(auth.is_sensitive());
        assert_eq!("access_key:1ZqpVERhsaq0nYtH+yK8LXnIen0=", auth.to_str()?);

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_get_with_query() -> Result<()> {
        let loader = StaticCredentialProvider::new("access_key", "secret");
        let signer = Signer::new(test_context(), loader, RequestSigner::new());

        let mut req = http::Request::get(Uri::from_str(
            "http://api.beebotte.com:80/v1/data/read/dev/temp?limit=1&source=raw",
        )?)
        .body(())?;
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        let (mut parts, _) = req.into_parts();
        signer.sign(&mut parts).await?;

        assert_eq!(
            "access_key:F/mGvYnFNrdd75CzFj2ZkmvRnrM=",
            parts.headers[AUTHORIZATION].to_str()?
        );
        assert!(!parts.headers.contains_key(CONTENT_MD5));
        assert_eq!(
            "http://api.beebotte.com:80/v1/data/read/dev/temp?limit=1&source=raw",
            parts.uri.to_string()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_keeps_existing_date() -> Result<()> {
        let loader = StaticCredentialProvider::new("access_key", "secret");
        // The clock disagrees with the header, the header must win.
        let ctx = Context::new().with_clock(FixedClock(parse_rfc2822(
            "Tue, 16 Aug 2022 00:00:00 GMT",
        )?));
        let signer = Signer::new(ctx, loader, RequestSigner::new());

        let mut req = http::Request::post("http://api.beebotte.com:80/v1/data/write/dev/temp")
            .body(())?;
        req.headers_mut()
            .insert(CONTENT_MD5, HeaderValue::from_static("IVwEvdITCKIzSF+J5TAgxg=="));
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        req.headers_mut()
            .insert(DATE, HeaderValue::from_static("Mon, 15 Aug 2022 16:50:12 GMT"));

        let (mut parts, _) = req.into_parts();
        signer.sign(&mut parts).await?;

        assert_eq!(
            "access_key:1ZqpVERhsaq0nYtH+yK8LXnIen0=",
            parts.headers[AUTHORIZATION].to_str()?
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_without_credential() -> Result<()> {
        let (mut parts, _) = http::Request::get("http://api.beebotte.com:80/v1/data/read/c/r")
            .body(())?
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&test_context(), &mut parts, None)
            .await
            .unwrap_err();
        assert_eq!(beebotte_core::ErrorKind::CredentialInvalid, err.kind());
        Ok(())
    }
}

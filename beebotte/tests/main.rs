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

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::{Method, Request, Response, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use beebotte::{
    Client, ClientAuth, Config, Context, DataPoint, ErrorKind, FixedClock, HttpSend,
    ProvideCredentialChain, PublishRecord, ReadOptions, Result, Source, WriteRecord,
};
use beebotte_core::time::parse_rfc2822;

const NOW: &str = "Mon, 15 Aug 2022 16:50:12 GMT";
const NOW_MILLIS: i64 = 1660582212000;

/// MockHttpSend records every request and answers with a canned response.
#[derive(Debug, Clone)]
struct MockHttpSend {
    requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    status: StatusCode,
    body: Bytes,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &str) -> Self {
        Self {
            requests: Arc::default(),
            status,
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    fn take(&self) -> Vec<Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        self.requests.lock().unwrap().push(req);

        Ok(Response::builder()
            .status(self.status)
            .body(self.body.clone())?)
    }
}

fn init(status: StatusCode, body: &str) -> (Client, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::new(status, body);
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_clock(FixedClock(parse_rfc2822(NOW).unwrap()));
    let client = Client::with_credential(ctx, Config::new(), "access_key", "secret");

    (client, http)
}

fn body_json(req: &Request<Bytes>) -> Value {
    serde_json::from_slice(req.body()).unwrap()
}

#[tokio::test]
async fn test_write_defaults_timestamp_to_now() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "true");

    let resp = client.write("dev", "temp", 21.5, None).await?;
    assert_eq!(Value::Bool(true), resp);

    let reqs = http.take();
    assert_eq!(1, reqs.len());
    let req = &reqs[0];
    assert_eq!(Method::POST, req.method());
    assert_eq!(
        "http://api.beebotte.com:80/v1/data/write/dev/temp",
        req.uri().to_string()
    );
    assert_eq!(
        r#"{"data":21.5,"ts":1660582212000}"#,
        std::str::from_utf8(req.body()).unwrap()
    );
    assert_eq!("IVwEvdITCKIzSF+J5TAgxg==", req.headers()["content-md5"]);
    assert_eq!("application/json", req.headers()[CONTENT_TYPE]);
    assert_eq!(NOW, req.headers()[DATE]);
    assert_eq!(
        "access_key:1ZqpVERhsaq0nYtH+yK8LXnIen0=",
        req.headers()[AUTHORIZATION]
    );
    Ok(())
}

#[tokio::test]
async fn test_write_keeps_explicit_timestamp() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "true");

    client
        .write("dev", "position", json!({"lat": 48.85, "lon": 2.35}), Some(42))
        .await?;

    let reqs = http.take();
    assert_eq!(
        json!({"data": {"lat": 48.85, "lon": 2.35}, "ts": 42}),
        body_json(&reqs[0])
    );
    Ok(())
}

#[tokio::test]
async fn test_write_bulk_preserves_order() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "true");

    client
        .write_bulk(
            "dev",
            vec![
                WriteRecord::new("temp", 20),
                WriteRecord::new("humidity", 40).with_ts(5),
                WriteRecord::new("pressure", 1013),
            ],
        )
        .await?;

    let reqs = http.take();
    let req = &reqs[0];
    assert_eq!(
        "http://api.beebotte.com:80/v1/data/write/dev",
        req.uri().to_string()
    );
    assert_eq!(
        json!({"data": [
            {"resource": "temp", "data": 20, "ts": NOW_MILLIS},
            {"resource": "humidity", "data": 40, "ts": 5},
            {"resource": "pressure", "data": 1013, "ts": NOW_MILLIS},
        ]}),
        body_json(req)
    );
    assert!(req.headers().contains_key(AUTHORIZATION));
    Ok(())
}

#[tokio::test]
async fn test_publish_passes_source_through() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "true");

    client
        .publish("presence:chat", "msg", "hello", None, Some("sensor-1"))
        .await?;
    client.publish("dev", "msg", "again", Some(7), None).await?;

    let reqs = http.take();
    assert_eq!(
        "http://api.beebotte.com:80/v1/data/publish/presence:chat/msg",
        reqs[0].uri().to_string()
    );
    assert_eq!(
        json!({"data": "hello", "source": "sensor-1", "ts": NOW_MILLIS}),
        body_json(&reqs[0])
    );
    assert_eq!(json!({"data": "again", "ts": 7}), body_json(&reqs[1]));
    Ok(())
}

#[tokio::test]
async fn test_publish_bulk() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "");

    let resp = client
        .publish_bulk(
            "dev",
            vec![
                PublishRecord::new("temp", 20).with_source("s1"),
                PublishRecord::new("humidity", 40).with_ts(5),
            ],
        )
        .await?;
    assert_eq!(Value::Null, resp);

    let reqs = http.take();
    assert_eq!(
        "http://api.beebotte.com:80/v1/data/publish/dev",
        reqs[0].uri().to_string()
    );
    assert_eq!(
        json!({"data": [
            {"resource": "temp", "data": 20, "ts": NOW_MILLIS, "source": "s1"},
            {"resource": "humidity", "data": 40, "ts": 5},
        ]}),
        body_json(&reqs[0])
    );
    Ok(())
}

#[tokio::test]
async fn test_read_signs_request_with_query() -> Result<()> {
    let (client, http) = init(
        StatusCode::OK,
        r#"[{"data":21.5,"ts":1660582212000,"channel":"dev","resource":"temp"}]"#,
    );

    let points = client.read("dev", "temp", &ReadOptions::new()).await?;
    assert_eq!(vec![DataPoint::new(21.5, NOW_MILLIS)], points);

    let reqs = http.take();
    let req = &reqs[0];
    assert_eq!(Method::GET, req.method());
    assert_eq!(
        "http://api.beebotte.com:80/v1/data/read/dev/temp?limit=1&source=raw",
        req.uri().to_string()
    );
    assert_eq!(
        "access_key:F/mGvYnFNrdd75CzFj2ZkmvRnrM=",
        req.headers()[AUTHORIZATION]
    );
    assert!(!req.headers().contains_key("content-md5"));
    assert!(req.body().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_read_public_is_not_signed() -> Result<()> {
    let (client, http) = init(
        StatusCode::OK,
        r#"{"data":[{"data":1,"ts":10},{"data":2,"ts":20}]}"#,
    );

    let opts = ReadOptions::new()
        .with_source(Source::DayStats)
        .with_time_range("2day");
    let points = client.read_public("alice", "dev", "temp", &opts).await?;
    assert_eq!(
        vec![DataPoint::new(1, 10), DataPoint::new(2, 20)],
        points
    );

    let reqs = http.take();
    let req = &reqs[0];
    assert_eq!(
        "http://api.beebotte.com:80/vi/public/data/read/alice/dev/temp?limit=750&source=day-stats&time-range=2day",
        req.uri().to_string()
    );
    assert!(!req.headers().contains_key(AUTHORIZATION));
    assert_eq!(NOW, req.headers()[DATE]);
    Ok(())
}

#[tokio::test]
async fn test_invalid_sample_rate_sends_nothing() {
    let (client, http) = init(StatusCode::OK, "[]");

    let opts = ReadOptions::new().with_sample_rate(2.0);
    let err = client.read("dev", "temp", &opts).await.unwrap_err();

    assert_eq!(ErrorKind::RequestInvalid, err.kind());
    assert!(http.take().is_empty());
}

#[tokio::test]
async fn test_dot_and_empty_names_send_nothing() {
    let (client, http) = init(StatusCode::OK, "true");

    let err = client.write("dev", "..", 1, None).await.unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    let err = client
        .read("dev", ".", &ReadOptions::new())
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    let err = client
        .read_public("", "dev", "temp", &ReadOptions::new())
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    let err = client
        .write_bulk("..", vec![WriteRecord::new("temp", 1)])
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    let err = client
        .resource("", "light")
        .publish("on", None, None)
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::RequestInvalid, err.kind());

    assert!(http.take().is_empty());
}

#[tokio::test]
async fn test_service_errors_are_classified() {
    let cases = [
        (400, 1401, ErrorKind::Parameter),
        (404, 1305, ErrorKind::AlreadyExist),
        (400, 9999, ErrorKind::Unexpected),
        (400, 1101, ErrorKind::Authentication),
    ];

    for (status, code, kind) in cases {
        let body = json!({"error": {"code": code, "message": "rejected"}}).to_string();
        let (client, _) = init(StatusCode::from_u16(status).unwrap(), &body);

        let err = client.write("dev", "temp", 1, None).await.unwrap_err();
        assert_eq!(kind, err.kind());
        assert_eq!(Some(status), err.status());
        assert_eq!(Some(code), err.code());
        assert_eq!("rejected", err.message());
        assert!(err.is_service_error());
    }
}

#[tokio::test]
async fn test_malformed_error_response() {
    let (client, _) = init(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");

    let err = client
        .read_public("alice", "dev", "temp", &ReadOptions::new())
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::MalformedResponse, err.kind());
    assert_eq!(Some(502), err.status());
}

#[tokio::test]
async fn test_missing_credential() {
    let http = MockHttpSend::new(StatusCode::OK, "true");
    let ctx = Context::new().with_http_send(http.clone());
    let client = Client::new(ctx, Config::new(), ProvideCredentialChain::new());

    let err = client.write("dev", "temp", 1, None).await.unwrap_err();
    assert_eq!(ErrorKind::CredentialInvalid, err.kind());
    assert!(http.take().is_empty());

    let err = client
        .sign_client_auth(&ClientAuth::new("sid1", "presence:chat"))
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::CredentialInvalid, err.kind());
}

#[tokio::test]
async fn test_sign_client_auth() -> Result<()> {
    let (client, http) = init(StatusCode::OK, "true");

    let auth = ClientAuth::new("sid1", "presence:chat")
        .with_ttl(60)
        .with_read(true);
    assert_eq!(
        "access_key:GigtxwpsnIzEHYAoGRWSeDhkZww=",
        client.sign_client_auth(&auth).await?
    );
    assert!(http.take().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_resource_handle() -> Result<()> {
    let (client, http) = init(StatusCode::OK, r#"[{"data":"on","ts":42}]"#);
    let light = client.resource("home", "light");

    light.write("on", None).await?;
    light.publish("on", Some(1), None).await?;
    let point = light.recent_val().await?;
    assert_eq!(
        DataPoint::new("on", 42)
            .with_channel("home")
            .with_resource("light"),
        point
    );
    light.read(&ReadOptions::new(), Some("bob")).await?;

    let uris: Vec<String> = http.take().iter().map(|r| r.uri().to_string()).collect();
    assert_eq!(
        vec![
            "http://api.beebotte.com:80/v1/data/write/home/light",
            "http://api.beebotte.com:80/v1/data/publish/home/light",
            "http://api.beebotte.com:80/v1/data/read/home/light?limit=1&source=raw",
            "http://api.beebotte.com:80/vi/public/data/read/bob/home/light?limit=750&source=raw",
        ],
        uris
    );
    Ok(())
}

#[tokio::test]
async fn test_recent_val_without_records() {
    let (client, _) = init(StatusCode::OK, "[]");

    let err = client
        .resource("home", "light")
        .recent_val()
        .await
        .unwrap_err();
    assert_eq!(ErrorKind::NotFound, err.kind());
    assert!(!err.is_service_error());
}

#[tokio::test]
async fn test_data_point_record_round_trip() -> Result<()> {
    let (client, _) = init(StatusCode::OK, r#"[{"data":[1,2,3],"ts":99}]"#);

    let point = client.resource("dev", "series").recent_val().await?;
    let record = point.to_record(Some("alice"));
    assert_eq!(
        json!({"owner": "alice", "channel": "dev", "resource": "series", "data": [1, 2, 3], "ts": 99}),
        record
    );

    let back = DataPoint::from_record(&record)?;
    assert_eq!(point.data, back.data);
    assert_eq!(point.ts, back.ts);
    Ok(())
}

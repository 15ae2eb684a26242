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

//! Client for the beebotte IoT data API.
//!
//! The client persists (`write`), broadcasts (`publish`) and reads
//! time-stamped values of resources grouped in channels. Every request except
//! public reads is signed with HMAC-SHA1 over the method, body digest,
//! content type, date and URI.
//!
//! ## Example
//!
//! ```no_run
//! use beebotte::{Client, Config, ReadOptions, StaticCredentialProvider};
//!
//! # #[tokio::main]
//! # async fn main() -> beebotte::Result<()> {
//! let client = Client::new(
//!     beebotte::default_context(),
//!     Config::new(),
//!     StaticCredentialProvider::new("access_key", "secret_key"),
//! );
//!
//! client.write("dev", "temp", 21.5, None).await?;
//!
//! let points = client
//!     .read("dev", "temp", &ReadOptions::new().with_limit(10))
//!     .await?;
//! for point in points {
//!     println!("{}: {}", point.ts, point.data);
//! }
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub use beebotte_core::{
    Clock, Context, Env, Error, ErrorKind, FixedClock, HttpSend, OsEnv, ProvideCredential,
    ProvideCredentialChain, Result, StaticEnv, SystemClock,
};

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{string_to_sign, RequestSigner};

mod build;

mod classify;
pub use classify::{classify, error_kind};

mod options;
pub use options::{ReadOptions, Source};

mod data_point;
pub use data_point::DataPoint;

mod record;
pub use record::{PublishRecord, WriteRecord};

mod client_auth;
pub use client_auth::ClientAuth;

mod client;
pub use client::Client;

mod resource;
pub use resource::ResourceHandle;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_client, default_context};

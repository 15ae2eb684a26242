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

use beebotte_core::{Context, Error, Result};

use crate::constants::*;

/// Config carries the connection parameters of a [`Client`](crate::Client).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `hostname` will be loaded from
    ///
    /// - env value: [`BEEBOTTE_HOSTNAME`] when calling [`Config::from_env`]
    /// - this field otherwise, defaults to `api.beebotte.com`
    pub hostname: String,
    /// `port` will be loaded from
    ///
    /// - env value: [`BEEBOTTE_PORT`] when calling [`Config::from_env`]
    /// - this field otherwise, defaults to `80`
    pub port: u16,
    /// `use_tls` will be loaded from
    ///
    /// - env value: [`BEEBOTTE_USE_TLS`] when calling [`Config::from_env`]
    /// - this field otherwise, defaults to `false`
    pub use_tls: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            use_tls: false,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set hostname
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set whether to use TLS
    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Load config from env, overriding fields that have a value set.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(BEEBOTTE_HOSTNAME) {
            self.hostname = v;
        }
        if let Some(v) = ctx.env_var(BEEBOTTE_PORT) {
            self.port = v.trim().parse().map_err(|e| {
                Error::config_invalid(format!("{BEEBOTTE_PORT} is not a valid port: {v}"))
                    .with_source(e)
            })?;
        }
        if let Some(v) = ctx.env_var(BEEBOTTE_USE_TLS) {
            self.use_tls = parse_bool(&v).ok_or_else(|| {
                Error::config_invalid(format!("{BEEBOTTE_USE_TLS} is not a valid boolean: {v}"))
            })?;
        }

        Ok(self)
    }

    /// Base url of the service, like `http://api.beebotte.com:80`.
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.hostname, self.port)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

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

use beebotte_core::{Context, OsEnv, Result};
use beebotte_http_send_reqwest::ReqwestHttpSend;

use crate::{Client, Config, DefaultCredentialProvider};

/// Create a context with a reqwest HTTP client, the OS environment and the
/// system clock.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

/// Create a client on the [`default_context`].
///
/// This function creates a client with:
/// - Config loaded from `BEEBOTTE_HOSTNAME`, `BEEBOTTE_PORT` and `BEEBOTTE_USE_TLS`
/// - Default credential provider (reads `BEEBOTTE_ACCESS_KEY` and `BEEBOTTE_SECRET_KEY`)
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> beebotte::Result<()> {
/// let client = beebotte::default_client()?;
/// let point = client.resource("dev", "temp").recent_val().await?;
/// println!("{}: {}", point.ts, point.data);
/// # Ok(())
/// # }
/// ```
pub fn default_client() -> Result<Client> {
    let ctx = default_context();
    let config = Config::new().from_env(&ctx)?;

    Ok(Client::new(ctx, config, DefaultCredentialProvider::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use beebotte_core::ErrorKind;

    #[test]
    fn test_default_client_from_env() {
        temp_env::with_vars(
            [
                (BEEBOTTE_HOSTNAME, Some("bbt.local")),
                (BEEBOTTE_PORT, Some("8080")),
                (BEEBOTTE_USE_TLS, None),
            ],
            || {
                let client = default_client().unwrap();
                assert_eq!("http://bbt.local:8080", client.config().base_url());
            },
        );
    }

    #[test]
    fn test_default_client_with_invalid_port() {
        temp_env::with_vars([(BEEBOTTE_PORT, Some("http"))], || {
            let err = default_client().unwrap_err();
            assert_eq!(ErrorKind::ConfigInvalid, err.kind());
        });
    }
}

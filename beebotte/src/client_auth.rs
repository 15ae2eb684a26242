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

use crate::Credential;

/// ClientAuth describes the access a real-time subscriber asks for.
///
/// Signing it yields a capability token granting scoped, time-limited access
/// to a channel and resource. Presence channels start with `presence:` and
/// private channels with `private:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAuth {
    /// Session id of the subscribing client.
    pub sid: String,
    /// Channel name.
    pub channel: String,
    /// Resource name, `*` for all resources of the channel.
    pub resource: String,
    /// Seconds the token stays valid.
    pub ttl: u64,
    /// Grant read access.
    pub read: bool,
    /// Grant write access.
    pub write: bool,
}

impl ClientAuth {
    /// Create a request for all resources of `channel`, without ttl, read or
    /// write access.
    pub fn new(sid: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            channel: channel.into(),
            resource: "*".to_string(),
            ttl: 0,
            read: false,
            write: false,
        }
    }

    /// Set resource
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Set ttl in seconds
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set read access
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Set write access
    pub fn with_write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Construct string to sign
    ///
    /// ```text
    /// <sid>:<channel>.<resource>.:ttl=<ttl>:read=<true|false>:write=<true|false>
    /// ```
    pub fn string_to_sign(&self) -> String {
        format!(
            "{}:{}.{}.:ttl={}:read={}:write={}",
            self.sid, self.channel, self.resource, self.ttl, self.read, self.write
        )
    }

    /// Sign with the given credential.
    pub fn sign(&self, cred: &Credential) -> String {
        cred.sign(&self.string_to_sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_to_sign() {
        let auth = ClientAuth::new("sid1", "presence:chat")
            .with_ttl(60)
            .with_read(true);
        assert_eq!(
            "sid1:presence:chat.*.:ttl=60:read=true:write=false",
            auth.string_to_sign()
        );

        let auth = ClientAuth::new("sid2", "private:home")
            .with_resource("light")
            .with_write(true);
        assert_eq!(
            "sid2:private:home.light.:ttl=0:read=false:write=true",
            auth.string_to_sign()
        );
    }

    #[test]
    fn test_sign() {
        let auth = ClientAuth::new("sid1", "presence:chat")
            .with_ttl(60)
            .with_read(true);
        let cred = Credential::new("access_key", "secret");

        assert_eq!("access_key:GigtxwpsnIzEHYAoGRWSeDhkZww=", auth.sign(&cred));
    }
}

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

use percent_encoding::{AsciiSet, CONTROLS};

// Env values used in beebotte client.
pub const BEEBOTTE_ACCESS_KEY: &str = "BEEBOTTE_ACCESS_KEY";
pub const BEEBOTTE_SECRET_KEY: &str = "BEEBOTTE_SECRET_KEY";
pub const BEEBOTTE_HOSTNAME: &str = "BEEBOTTE_HOSTNAME";
pub const BEEBOTTE_PORT: &str = "BEEBOTTE_PORT";
pub const BEEBOTTE_USE_TLS: &str = "BEEBOTTE_USE_TLS";

pub const DEFAULT_HOSTNAME: &str = "api.beebotte.com";
pub const DEFAULT_PORT: u16 = 80;

// Endpoint prefixes.
pub const PUBLIC_READ_ENDPOINT: &str = "/vi/public/data/read";
pub const READ_ENDPOINT: &str = "/v1/data/read";
pub const WRITE_ENDPOINT: &str = "/v1/data/write";
pub const PUBLISH_ENDPOINT: &str = "/v1/data/publish";

// Headers used in beebotte client.
pub const CONTENT_MD5: &str = "content-md5";
pub const APPLICATION_JSON: &str = "application/json";

// Default read limits.
pub const DEFAULT_PUBLIC_READ_LIMIT: u32 = 750;
pub const DEFAULT_READ_LIMIT: u32 = 1;

/// Characters escaped inside a single path segment.
///
/// `:` and `*` stay literal since channel names like `presence:chat` are
/// sent as is.
pub static PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

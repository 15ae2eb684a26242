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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential};
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential is loaded on first use and reused while it stays valid.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Load the credential, reusing the cached one while it is valid.
    ///
    /// Returns a credential invalid error if no provider yields a valid
    /// credential.
    pub async fn credential(&self) -> Result<K> {
        let cached = self.credential.lock().expect("lock poisoned").clone();
        if let Some(cred) = cached.filter(|c| c.is_valid()) {
            return Ok(cred);
        }

        let loaded = self.loader.provide_credential(&self.ctx).await?;
        match loaded {
            Some(cred) if cred.is_valid() => {
                *self.credential.lock().expect("lock poisoned") = Some(cred.clone());
                Ok(cred)
            }
            Some(_) => Err(Error::credential_invalid("loaded credential is not valid")),
            None => Err(Error::credential_invalid("no credential found")),
        }
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut http::request::Parts) -> Result<()> {
        let cred = self.credential().await?;

        self.builder
            .sign_request(&self.ctx, req, Some(&cred))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug)]
    struct TestCredential(String);

    impl SigningCredential for TestCredential {
        fn is_valid(&self) -> bool {
            !self.0.is_empty()
        }
    }

    #[derive(Debug)]
    struct TestLoader {
        value: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProvideCredential for TestLoader {
        type Credential = TestCredential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<TestCredential>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(TestCredential(self.value.to_string())))
        }
    }

    #[derive(Debug)]
    struct TestBuilder;

    #[async_trait]
    impl SignRequest for TestBuilder {
        type Credential = TestCredential;

        async fn sign_request(
            &self,
            _: &Context,
            req: &mut http::request::Parts,
            credential: Option<&TestCredential>,
        ) -> Result<()> {
            let cred = credential.ok_or_else(|| Error::credential_invalid("missing"))?;
            req.headers.insert("x-test", cred.0.parse()?);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_signer_caches_credential() -> Result<()> {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            TestLoader {
                value: "key",
                calls: calls.clone(),
            },
            TestBuilder,
        );

        for _ in 0..3 {
            let mut parts = http::Request::get("http://localhost/").body(())?.into_parts().0;
            signer.sign(&mut parts).await?;
            assert_eq!("key", parts.headers["x-test"]);
        }
        assert_eq!(1, calls.load(Ordering::SeqCst));
        Ok(())
    }

    #[tokio::test]
    async fn test_signer_rejects_invalid_credential() {
        let calls = Arc::new(AtomicUsize::new(0));
        let signer = Signer::new(
            Context::new(),
            TestLoader {
                value: "",
                calls: calls.clone(),
            },
            TestBuilder,
        );

        let err = signer.credential().await.unwrap_err();
        assert_eq!(ErrorKind::CredentialInvalid, err.kind());

        // Invalid credentials are never cached.
        let _ = signer.credential().await;
        assert_eq!(2, calls.load(Ordering::SeqCst));
    }
}

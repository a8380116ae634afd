use oidc_conformance::signer::Signer;
use std::sync::LazyLock;

/// Default [Signer] to use in tests. Key generation is slow, so it is shared.
pub static TEST_SIGNER: LazyLock<Signer, fn() -> Signer> =
    LazyLock::new(|| Signer::generate().unwrap());

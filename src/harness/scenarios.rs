use crate::harness::*;
use crate::signer::*;
use crate::subprocess::Status;
use rsa::rand_core::{OsRng, RngCore};

/// Login hint used by most scenarios.
const EMAIL: &str = "john@example.com";

/// An issuer and audience no client should trust.
const EVE: &str = "http://eve.invalid";

/// A named step of the conformance run.
pub struct Scenario {
    /// Name printed in the log and matched by the `skip` setting.
    pub name: &'static str,

    /// Body of the scenario. Returns an error only for harness faults.
    pub run: fn(&mut TestContext<'_>) -> Result<(), HarnessError>,
}

/// All scenarios in execution order. Later scenarios rely on the client ID established by the
/// first one.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "basic auth",
        run: basic_auth,
    },
    Scenario {
        name: "invalid issuer",
        run: invalid_issuer,
    },
    Scenario {
        name: "invalid audience",
        run: invalid_audience,
    },
    Scenario {
        name: "expired token",
        run: expired_token,
    },
    Scenario {
        name: "expired token, but within leeway",
        run: expired_token_within_leeway,
    },
    Scenario {
        name: "future issue time",
        run: future_issue_time,
    },
    Scenario {
        name: "floating point exp",
        run: floating_point_exp,
    },
    Scenario {
        name: "floating point iat",
        run: floating_point_iat,
    },
    Scenario {
        name: "future issue time, but within leeway",
        run: future_issue_time_within_leeway,
    },
    Scenario {
        name: "unexpected email transform",
        run: unexpected_email_transform,
    },
    Scenario {
        name: "unexpected email_original transform",
        run: unexpected_email_original_transform,
    },
    Scenario {
        name: "server normalization",
        run: server_normalization,
    },
    Scenario {
        name: "custom server normalization",
        run: custom_server_normalization,
    },
    Scenario {
        name: "invalid nonce",
        run: invalid_nonce,
    },
    Scenario {
        name: "nonce reuse",
        run: nonce_reuse,
    },
    Scenario {
        name: "invalid key ID",
        run: invalid_key_id,
    },
    Scenario {
        name: "bad signature",
        run: bad_signature,
    },
    Scenario {
        name: "token cannot change alg from jwk",
        run: alg_change,
    },
    Scenario {
        name: "caching",
        run: caching,
    },
];

/// Full authentication request checks, then a valid token. Establishes the client ID.
fn basic_auth(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let state = random_state();

    ctx.send(&["auth", EMAIL, &state])?;
    let Some(auth_url) = ctx.expect(Status::Ok, "start authentication request")? else {
        return Ok(());
    };

    let authorization_endpoint = ctx.provider().discovery().authorization_endpoint.as_str();
    ctx.assert(
        auth_url.starts_with(&format!("{authorization_endpoint}?")),
        "auth URL points to the server auth endpoint",
    );
    let Some(request) = ctx.assert_ok(AuthRequest::parse(&auth_url), "auth URL is a valid URL")
    else {
        return Ok(());
    };

    ctx.assert_eq(request.param("login_hint"), EMAIL, "login_hint is correct");
    ctx.assert_eq(request.param("scope"), "openid email", "scope is correct");
    ctx.assert_eq(request.param("response_type"), "id_token", "response_type is correct");
    ctx.assert_eq(request.param("state"), state.as_str(), "state matches input");

    let Some(redirect_uri) = ctx.assert_ok(
        url::Url::parse(request.param("redirect_uri")),
        "redirect_uri is a valid URL",
    ) else {
        return Ok(());
    };
    if !ctx.assert(redirect_uri.has_host(), "redirect_uri is an absolute URL") {
        return Ok(());
    }

    ctx.set_client_id(origin_of(request.param("redirect_uri")));
    let client_id = ctx.client_id().to_owned();
    ctx.assert_eq(
        request.param("client_id"),
        client_id.as_str(),
        "client_id is the origin of redirect_uri",
    );

    let nonce = request.param("nonce");
    ctx.assert(!nonce.is_empty(), "nonce is not empty");

    let token = ctx.signer().simple(&ctx.valid_claims(EMAIL, nonce))?;
    ctx.verify(&token)?;
    let verified = ctx.expect(Status::Ok, "verify token request")?;
    ctx.assert_eq(verified.as_deref(), Some(EMAIL), "verified email matches input");

    Ok(())
}

fn invalid_issuer(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_rejected(ctx, |claims| claims.iss = Some(EVE.into()))
}

fn invalid_audience(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_rejected(ctx, |claims| claims.aud = Some(EVE.into()))
}

fn expired_token(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let now = now();
    expect_rejected(ctx, |claims| {
        claims.exp = Some(now - 10000);
        claims.iat = Some(now - 10020);
    })
}

fn expired_token_within_leeway(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let now = now();
    expect_accepted(ctx, |claims| {
        claims.exp = Some(now - 30);
        claims.iat = Some(now - 50);
    })
}

fn future_issue_time(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let now = now();
    expect_rejected(ctx, |claims| {
        claims.exp = Some(now + 10020);
        claims.iat = Some(now + 10000);
    })
}

fn floating_point_exp(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(EMAIL)? else {
        return Ok(());
    };

    let payload = Payload::new(ctx.valid_claims(EMAIL, &nonce))
        .with_override("exp", now() as f64 + 5.5);
    ctx.verify(&ctx.signer().simple(&payload)?)?;
    ctx.expect(Status::Ok, "accepts token")?;

    Ok(())
}

fn floating_point_iat(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(EMAIL)? else {
        return Ok(());
    };

    let payload = Payload::new(ctx.valid_claims(EMAIL, &nonce))
        .with_override("iat", now() as f64 - 0.5);
    ctx.verify(&ctx.signer().simple(&payload)?)?;
    ctx.expect(Status::Ok, "accepts token")?;

    Ok(())
}

fn future_issue_time_within_leeway(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let now = now();
    expect_accepted(ctx, |claims| {
        claims.exp = Some(now + 50);
        claims.iat = Some(now + 30);
    })
}

fn unexpected_email_transform(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_rejected(ctx, |claims| claims.email = Some("jane@example.com".into()))
}

fn unexpected_email_original_transform(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_rejected(ctx, |claims| {
        claims.email_original = Some("jane@example.com".into())
    })
}

fn server_normalization(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_normalized(ctx, "İⅢ@İⅢ.example", "i̇ⅲ@xn--iiii-qwc.example")
}

fn custom_server_normalization(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_normalized(ctx, EMAIL, "jane@example.com")
}

fn invalid_nonce(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    expect_rejected(ctx, |claims| {
        claims.nonce = Some("definitely not something the client generates".into())
    })
}

fn nonce_reuse(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(EMAIL)? else {
        return Ok(());
    };

    let token = ctx.signer().simple(&ctx.valid_claims(EMAIL, &nonce))?;
    ctx.verify(&token)?;
    ctx.expect(Status::Ok, "accepts token")?;

    let token = ctx.signer().simple(&ctx.valid_claims(EMAIL, &nonce))?;
    ctx.verify(&token)?;
    ctx.expect(Status::Err, "rejects token")?;

    Ok(())
}

fn invalid_key_id(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let signer = ctx.signer();
    expect_rejected_token(ctx, |claims| {
        signer.sign(signer.real_key(), &TokenHeader::new("bad key", ALGORITHM), claims)
    })
}

fn bad_signature(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let signer = ctx.signer();
    expect_rejected_token(ctx, |claims| {
        signer.sign(signer.impostor_key(), &TokenHeader::new(KEY_ID, ALGORITHM), claims)
    })
}

fn alg_change(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let signer = ctx.signer();
    expect_rejected_token(ctx, |claims| {
        signer.sign(
            signer.real_key(),
            &TokenHeader::new(KEY_ID, SigningAlgorithm::RS384),
            claims,
        )
    })
}

/// Discovery and keys must each have been fetched exactly once over the whole run.
fn caching(ctx: &mut TestContext<'_>) -> Result<(), HarnessError> {
    let counters = ctx.provider().counters();
    ctx.assert_eq(counters.discovery(), 1, "discovery requested just once");
    ctx.assert_eq(counters.keys(), 1, "keys requested just once");

    Ok(())
}

/// Authenticates as [EMAIL], signs the valid claims adjusted by `adjust` and expects `ok`.
fn expect_accepted(
    ctx: &mut TestContext<'_>,
    adjust: impl FnOnce(&mut Claims),
) -> Result<(), HarnessError> {
    verify_adjusted(ctx, adjust, Status::Ok, "accepts token")
}

/// Authenticates as [EMAIL], signs the valid claims adjusted by `adjust` and expects `err`.
fn expect_rejected(
    ctx: &mut TestContext<'_>,
    adjust: impl FnOnce(&mut Claims),
) -> Result<(), HarnessError> {
    verify_adjusted(ctx, adjust, Status::Err, "rejects token")
}

fn verify_adjusted(
    ctx: &mut TestContext<'_>,
    adjust: impl FnOnce(&mut Claims),
    status: Status,
    descr: &str,
) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(EMAIL)? else {
        return Ok(());
    };

    let mut claims = ctx.valid_claims(EMAIL, &nonce);
    adjust(&mut claims);

    ctx.verify(&ctx.signer().simple(&claims)?)?;
    ctx.expect(status, descr)?;

    Ok(())
}

/// Authenticates as [EMAIL], builds a token from the valid claims with `token_fn` and expects
/// `err`.
fn expect_rejected_token(
    ctx: &mut TestContext<'_>,
    token_fn: impl FnOnce(&Claims) -> Result<String, SignerError>,
) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(EMAIL)? else {
        return Ok(());
    };

    let token = token_fn(&ctx.valid_claims(EMAIL, &nonce))?;
    ctx.verify(&token)?;
    ctx.expect(Status::Err, "rejects token")?;

    Ok(())
}

/// Authenticates as `email` while the provider reports `normalized` as the verified address.
fn expect_normalized(
    ctx: &mut TestContext<'_>,
    email: &str,
    normalized: &str,
) -> Result<(), HarnessError> {
    let Some(nonce) = ctx.quick_start(email)? else {
        return Ok(());
    };

    let mut claims = ctx.valid_claims(normalized, &nonce);
    claims.email_original = Some(email.into());

    ctx.verify(&ctx.signer().simple(&claims)?)?;
    if let Some(verified) = ctx.expect(Status::Ok, "verify token request")? {
        ctx.assert_eq(verified.as_str(), normalized, "verified email is normalized input");
    }

    Ok(())
}

/// Random anti-forgery `state` value, 8 hex digits.
fn random_state() -> String {
    format!("{:08x}", OsRng.next_u32())
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

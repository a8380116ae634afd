use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Answers every line with the same wrong `echo` token.
const DESYNCING_CLIENT: &str = r#"#!/bin/sh
while IFS= read -r line; do
  printf 'ok\twrong\n'
done
"#;

/// Speaks the protocol correctly but accepts every token it is given.
const PERMISSIVE_CLIENT: &str = r#"#!/bin/sh
tab=$(printf '\t')
while IFS= read -r line; do
  command=${line%%"$tab"*}
  rest=${line#*"$tab"}
  case "$command" in
    echo)
      printf 'ok\t%s\n' "$rest"
      ;;
    auth)
      hint=${rest%%"$tab"*}
      state=${rest#*"$tab"}
      [ "$state" = "$rest" ] && state=0
      printf 'ok\thttp://imaginary-server.test/fake-auth-route?client_id=http://permissive-client.test&redirect_uri=http://permissive-client.test/callback&response_type=id_token&scope=openid%%20email&login_hint=%s&state=%s&nonce=n\n' "$hint" "$state"
      ;;
    verify)
      printf 'ok\tjohn@example.com\n'
      ;;
    *)
      printf 'err\tunknown command\n'
      ;;
  esac
done
"#;

/// Script client fixtures, written once per test binary before any of them is spawned.
pub struct TestClients {
    /// See [DESYNCING_CLIENT].
    pub desyncing: PathBuf,

    /// See [PERMISSIVE_CLIENT].
    pub permissive: PathBuf,
}

/// Shared [TestClients].
pub static TEST_CLIENTS: LazyLock<TestClients, fn() -> TestClients> = LazyLock::new(|| {
    let dir = std::env::temp_dir().join(format!("oidc-conformance-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    TestClients {
        desyncing: write_script(&dir, "desyncing-client.sh", DESYNCING_CLIENT),
        permissive: write_script(&dir, "permissive-client.sh", PERMISSIVE_CLIENT),
    }
});

fn write_script(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

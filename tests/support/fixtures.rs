//! Test fixtures and constants.

/// Roster signer trusted by default.
pub const ADMIN: &str = "AD00000000000000000000000000000000000000";

/// Signer nobody trusts.
pub const MALLORY: &str = "BADBADBADBADBADBADBADBADBADBADBADBADBAD0";

pub const ALICE: &str = "A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1";
pub const BOB: &str = "B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0B0";
pub const CAROL: &str = "C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4";

/// Standard roster: three users, two groups, one nested.
pub const ROSTER: &str = "\
# ops team
alice = A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1A1
bob = b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0
carol = C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4C4

@admins = alice
@ops = @admins, bob
";

/// A stand-in for gpg.
///
/// Signing is a `SIGNED-BY <fingerprint>` first line, verified with
/// matching status lines. Encryption wraps the plaintext in PGP armor
/// with a recipients line. Keys listed in `$FAKE_GPG_KEYS` exist.
pub const FAKE_GPG: &str = r#"#!/bin/sh
mode=""
status=""
recipients=""
last=""
while [ $# -gt 0 ]; do
  case "$1" in
    --status-fd) status=1; shift ;;
    --decrypt) mode=decrypt ;;
    --encrypt) mode=encrypt ;;
    --recipient) shift; recipients="$recipients $1" ;;
    --list-keys) mode=list ;;
    --import) mode=import ;;
    --recv-keys) mode=recv ;;
    --keyserver|--trust-model) shift ;;
    *) last="$1" ;;
  esac
  shift
done

case "$mode" in
  decrypt)
    if [ -n "$status" ]; then
      input=$(cat)
      signer=$(printf '%s\n' "$input" | head -n 1 | sed -n 's/^SIGNED-BY //p')
      if [ -z "$signer" ]; then
        echo "[GNUPG:] NODATA 1" >&2
        exit 2
      fi
      echo "[GNUPG:] NEWSIG" >&2
      echo "[GNUPG:] GOODSIG $signer fake" >&2
      echo "[GNUPG:] VALIDSIG $signer 2024-01-01 1704067200 0 4 0 22 10 01 $signer" >&2
      printf '%s\n' "$input" | tail -n +2
    else
      sed -e '1,2d' -e '$d'
    fi
    ;;
  encrypt)
    echo "-----BEGIN PGP MESSAGE-----"
    echo "for:$recipients"
    cat
    echo "-----END PGP MESSAGE-----"
    ;;
  list)
    case " $FAKE_GPG_KEYS " in
      *" $last "*)
        echo "pub:u:255:22:0000000000000000:1704067200:::u:::scESC:::::ed25519:::0:"
        echo "fpr:::::::::$last:"
        echo "uid:u::::1704067200::HASH::Test <test@example.com>::::::::::0:"
        ;;
      *)
        echo "gpg: error reading key: No public key" >&2
        exit 2
        ;;
    esac
    ;;
  import)
    [ -n "$(cat)" ] || exit 2
    ;;
  recv)
    ;;
  *)
    echo "fake gpg: unsupported invocation" >&2
    exit 2
    ;;
esac
"#;

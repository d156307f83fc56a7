//! Parsing of gpg `--status-fd` output into per-signature results.
//!
//! For each signature gpg emits `NEWSIG`, then one verdict
//! (`GOODSIG`, `BADSIG`, `EXPSIG`, `EXPKEYSIG`, `REVKEYSIG`, `ERRSIG`), and
//! for cryptographically sound signatures a `VALIDSIG` carrying the
//! fingerprints. Older versions omit `NEWSIG`, so a second verdict also
//! starts a new signature.

use super::SignatureCheck;

const STATUS_PREFIX: &str = "[GNUPG:] ";

#[derive(Default)]
struct Pending {
    verdict: Option<bool>,
    signer: Option<String>,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.verdict.is_none() && self.signer.is_none()
    }

    fn finish(self) -> Option<SignatureCheck> {
        let signer = self.signer?;
        Some(SignatureCheck {
            valid: self.verdict == Some(true),
            signer,
        })
    }
}

/// Collect one `SignatureCheck` per signature from gpg status output.
///
/// Lines not carrying the status prefix are ignored, so stderr can be
/// passed in as is.
pub fn parse_signatures(output: &str) -> Vec<SignatureCheck> {
    let mut checks = Vec::new();
    let mut current = Pending::default();

    for line in output.lines() {
        let Some(status) = line.strip_prefix(STATUS_PREFIX) else {
            continue;
        };
        let mut fields = status.split(' ');
        let keyword = fields.next().unwrap_or_default();
        let args: Vec<&str> = fields.collect();

        match keyword {
            "NEWSIG" => {
                checks.extend(std::mem::take(&mut current).finish());
            }
            "GOODSIG" | "BADSIG" | "EXPSIG" | "EXPKEYSIG" | "REVKEYSIG" | "ERRSIG" => {
                if current.verdict.is_some() {
                    checks.extend(std::mem::take(&mut current).finish());
                }
                current.verdict = Some(keyword == "GOODSIG");
                if current.signer.is_none() {
                    current.signer = args.first().map(|id| id.to_string());
                }
            }
            "VALIDSIG" => {
                // Field 10 is the primary key fingerprint; field 1 the
                // (sub)key that made the signature.
                let primary = args.get(9).or_else(|| args.first());
                if let Some(fpr) = primary {
                    current.signer = Some(fpr.to_string());
                }
                if current.verdict.is_none() {
                    current.verdict = Some(false);
                }
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        checks.extend(current.finish());
    }
    checks
}

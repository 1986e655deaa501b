//! Static role-configuration export
//!
//! Administrators without a manager role can download a pre-configured role
//! document and import it into their access manager. The document is fixed
//! and versioned; it has nothing to do with the runtime [`Settings`](crate::settings::Settings).

use crate::config::PolicyConfig;
use crate::guard::require_administrator;
use crate::rbac::Actor;
use crate::{Error, Result};

/// Action name the download token is bound to
pub const EXPORT_ACTION: &str = "download_manager_role";

/// Suggested download file name
pub const EXPORT_FILE_NAME: &str = "aam-manager-role-export.json";

pub const EXPORT_CONTENT_TYPE: &str = "application/json";

const EXPORT_DOCUMENT: &str = include_str!("../assets/aam-manager-role-export.json");

const ACCESS_DENIED: &str = "Access denied";

/// Host anti-replay token check
pub trait TokenVerifier {
    /// True if `token` is valid for `action` right now
    fn verify(&self, token: &str, action: &str) -> bool;
}

/// Accepts one configured shared token; rejects everything when unset
#[derive(Clone)]
pub struct StaticTokenVerifier {
    token: Option<String>,
}

impl StaticTokenVerifier {
    pub fn new(token: Option<String>) -> Self {
        Self { token: token.filter(|t| !t.is_empty()) }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new(config.export_token.clone())
    }
}

impl std::fmt::Debug for StaticTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenVerifier")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl TokenVerifier for StaticTokenVerifier {
    fn verify(&self, token: &str, action: &str) -> bool {
        if action != EXPORT_ACTION {
            return false;
        }
        match &self.token {
            Some(expected) => constant_time_eq(expected.as_bytes(), token.as_bytes()),
            None => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// A downloadable role export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleExport {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: &'static str,
}

impl RoleExport {
    /// The embedded export document
    pub fn document() -> Self {
        Self { file_name: EXPORT_FILE_NAME, content_type: EXPORT_CONTENT_TYPE, body: EXPORT_DOCUMENT }
    }

    /// Document format version, as recorded in the document itself
    pub fn version(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(self.body).ok()?;
        value.get("version")?.as_str().map(str::to_string)
    }

    /// Response headers for a file download
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Description", "File Transfer".to_string()),
            ("Content-Type", self.content_type.to_string()),
            ("Content-Disposition", format!("attachment; filename=\"{}\"", self.file_name)),
            ("Content-Length", self.body.len().to_string()),
            ("Pragma", "public".to_string()),
            ("Cache-Control", "must-revalidate, post-check=0, pre-check=0".to_string()),
        ]
    }
}

/// Hand out the role export to an administrator holding a valid token
pub fn export_role(actor: &Actor, token: &str, verifier: &dyn TokenVerifier) -> Result<RoleExport> {
    require_administrator(actor, ACCESS_DENIED)?;

    if !verifier.verify(token, EXPORT_ACTION) {
        log::warn!("Rejected role export for actor {}: invalid token", actor.id);
        return Err(Error::Unauthorized(ACCESS_DENIED.to_string()));
    }

    log::info!("Role export downloaded by actor {}", actor.id);
    Ok(RoleExport::document())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::ADMINISTRATOR_ROLE;

    fn verifier() -> StaticTokenVerifier {
        StaticTokenVerifier::new(Some("nonce-123".to_string()))
    }

    #[test]
    fn test_admin_with_valid_token() {
        let admin = Actor::new("1", [ADMINISTRATOR_ROLE]);
        let export = export_role(&admin, "nonce-123", &verifier()).unwrap();

        assert_eq!(export.file_name, "aam-manager-role-export.json");
        assert_eq!(export.content_type, "application/json");
        assert!(export.version().is_some());
        assert!(export
            .headers()
            .contains(&("Content-Length", export.body.len().to_string())));
    }

    #[test]
    fn test_rejections() {
        let admin = Actor::new("1", [ADMINISTRATOR_ROLE]);
        let manager = Actor::new("2", ["admin_manager"]);

        for (actor, token) in [(&admin, "wrong"), (&manager, "nonce-123"), (&admin, "")] {
            match export_role(actor, token, &verifier()) {
                Err(Error::Unauthorized(msg)) => assert_eq!(msg, "Access denied"),
                other => panic!("expected Unauthorized, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unconfigured_verifier_rejects_everything() {
        let verifier = StaticTokenVerifier::new(None);
        assert!(!verifier.verify("", EXPORT_ACTION));
        assert!(!verifier.verify("anything", EXPORT_ACTION));
        assert!(!StaticTokenVerifier::new(Some(String::new())).verify("", EXPORT_ACTION));
    }

    #[test]
    fn test_token_bound_to_action() {
        assert!(verifier().verify("nonce-123", EXPORT_ACTION));
        assert!(!verifier().verify("nonce-123", "delete_everything"));
    }

    #[test]
    fn test_document_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(RoleExport::document().body).unwrap();
        assert!(value["dataset"]["roles"].is_object());
    }
}

//! Submission payloads.
//!
//! Every order contributes `service_id` and `comments`; the variant adds its
//! own field; `additional` is merged last and wins on collisions.

use std::path::{Component, Path, PathBuf};
use tracing::warn;

use super::models::{Order, OrderVariant};
use crate::config::MissingUploadPolicy;
use crate::error::{ClientError, ClientResult};
use crate::transport::{FormValue, Payload};

/// Where file orders find their uploads
#[derive(Debug, Clone)]
pub struct UploadContext {
    pub dir: PathBuf,
    pub missing_file: MissingUploadPolicy,
}

impl UploadContext {
    pub fn new(dir: impl Into<PathBuf>, missing_file: MissingUploadPolicy) -> Self {
        Self {
            dir: dir.into(),
            missing_file,
        }
    }

    /// Path of `filename` under the uploads directory. Only plain relative
    /// names are accepted: no root, prefix, `.` or `..` components.
    pub fn resolve(&self, filename: &str) -> ClientResult<PathBuf> {
        let name = Path::new(filename);
        let contained = name.components().next().is_some()
            && name.components().all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(ClientError::UnsafeUploadPath(name.to_path_buf()));
        }
        Ok(self.dir.join(name))
    }
}

impl OrderVariant {
    /// Add this variant's fields to `payload`.
    pub fn contribute(&self, uploads: &UploadContext, payload: &mut Payload) -> ClientResult<()> {
        match self {
            Self::Imei { device } => payload.insert("device", device.as_str()),
            Self::Server { quantity } => payload.insert("quantity", quantity.to_string()),
            Self::File { device } => payload.insert("device", upload_field(uploads, device)?),
        }
        Ok(())
    }
}

fn upload_field(uploads: &UploadContext, filename: &str) -> ClientResult<FormValue> {
    let path = uploads.resolve(filename)?;
    if path.is_file() {
        return Ok(FormValue::File(path));
    }

    match uploads.missing_file {
        MissingUploadPolicy::Reject => Err(ClientError::MissingUploadFile(path)),
        MissingUploadPolicy::SubmitNull => {
            warn!(path = %path.display(), "upload not found, submitting without file");
            Ok(FormValue::Null)
        }
    }
}

/// Full submission payload for `order`, without the `username` the client
/// adds to every call.
pub fn build_payload(order: &Order, uploads: &UploadContext) -> ClientResult<Payload> {
    let mut payload = Payload::new();
    payload.insert("service_id", order.service_id.as_str());
    payload.insert("comments", order.comments.as_str());

    order.variant.contribute(uploads, &mut payload)?;

    payload.merge_json(&order.additional);
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn uploads(policy: MissingUploadPolicy) -> (tempfile::TempDir, UploadContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = UploadContext::new(dir.path(), policy);
        (dir, ctx)
    }

    #[test]
    fn test_imei_payload() {
        let (_dir, ctx) = uploads(MissingUploadPolicy::Reject);
        let order = Order::imei("12", "356938035643809").with_comments("first");

        let payload = build_payload(&order, &ctx).unwrap();

        assert_eq!(payload.get("service_id"), Some(&FormValue::from("12")));
        assert_eq!(payload.get("comments"), Some(&FormValue::from("first")));
        assert_eq!(payload.get("device"), Some(&FormValue::from("356938035643809")));
        assert_eq!(payload.get("quantity"), None);
    }

    #[test]
    fn test_server_payload() {
        let (_dir, ctx) = uploads(MissingUploadPolicy::Reject);
        let order = Order::server("30", 5);

        let payload = build_payload(&order, &ctx).unwrap();

        assert_eq!(payload.get("quantity"), Some(&FormValue::from("5")));
        assert_eq!(payload.get("device"), None);
    }

    #[test]
    fn test_file_payload_attaches_existing_upload() {
        let (dir, ctx) = uploads(MissingUploadPolicy::Reject);
        fs::write(dir.path().join("backup.zip"), b"PK").unwrap();
        let order = Order::file("40", "backup.zip");

        let payload = build_payload(&order, &ctx).unwrap();

        assert_eq!(
            payload.get("device"),
            Some(&FormValue::File(dir.path().join("backup.zip")))
        );
    }

    #[test]
    fn test_missing_upload_rejected_by_default() {
        let (dir, ctx) = uploads(MissingUploadPolicy::default());
        let order = Order::file("40", "missing.zip");

        let result = build_payload(&order, &ctx);

        assert!(
            matches!(result, Err(ClientError::MissingUploadFile(path)) if path == dir.path().join("missing.zip"))
        );
    }

    #[test]
    fn test_missing_upload_submitted_as_null() {
        let (_dir, ctx) = uploads(MissingUploadPolicy::SubmitNull);
        let order = Order::file("40", "missing.zip");

        let payload = build_payload(&order, &ctx).unwrap();

        assert_eq!(payload.get("device"), Some(&FormValue::Null));
    }

    #[test]
    fn test_upload_outside_dir_is_rejected() {
        let (_dir, ctx) = uploads(MissingUploadPolicy::SubmitNull);
        let outside = tempfile::tempdir().unwrap();
        let secret = outside.path().join("secret.txt");
        fs::write(&secret, b"key").unwrap();

        for device in [secret.to_string_lossy().into_owned(), "../secret.txt".to_string()] {
            let result = build_payload(&Order::file("40", device.as_str()), &ctx);
            assert!(
                matches!(result, Err(ClientError::UnsafeUploadPath(_))),
                "{} was accepted",
                device
            );
        }
    }

    #[test]
    fn test_resolve_accepts_nested_relative_names() {
        let ctx = UploadContext::new("uploads", MissingUploadPolicy::Reject);

        assert_eq!(
            ctx.resolve("batch/backup.zip").unwrap(),
            PathBuf::from("uploads/batch/backup.zip")
        );
        assert!(ctx.resolve("batch/../../etc/passwd").is_err());
        assert!(ctx.resolve("./backup.zip").is_err());
        assert!(ctx.resolve("").is_err());
    }

    #[test]
    fn test_additional_fields_merged_last() {
        let (_dir, ctx) = uploads(MissingUploadPolicy::Reject);
        let order = Order::imei("12", "356938035643809")
            .with_additional("comments", json!("from extension"))
            .with_additional("network", json!({"country": "US", "carrier": "AT&T"}));

        let payload = build_payload(&order, &ctx).unwrap();

        assert_eq!(payload.get("comments"), Some(&FormValue::from("from extension")));
        assert_eq!(payload.get("network[country]"), Some(&FormValue::from("US")));
        assert_eq!(payload.get("network[carrier]"), Some(&FormValue::from("AT&T")));
    }
}

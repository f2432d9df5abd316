use agri_publish::{Alert, PublishError};

/// Turn an alert into the error reported at the process boundary.
pub fn into_error(alert: &Alert) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", alert.title, alert.message)
}

pub fn publish_error(error: &PublishError) -> anyhow::Error {
    into_error(&Alert::from(error))
}

#[cfg(test)]
mod tests {
    use agri_publish::ValidationError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn validation_failure_reads_like_the_form_alert() {
        let err = publish_error(&PublishError::Validation(ValidationError::ImageRequired));
        assert_eq!(
            err.to_string(),
            "Validation Error: At least one image is required"
        );
    }

    #[test]
    fn upload_failure_uses_generic_title() {
        let err = publish_error(&PublishError::Upload(agri_storage::StorageError::Network(
            "connection reset".into(),
        )));
        assert_eq!(err.to_string(), "Error: network error: connection reset");
    }
}

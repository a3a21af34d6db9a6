//! Error types and handling for kcm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The taxonomy follows the pipeline stages: graph/resolution errors abort a
//! run before any side effect, while download and install errors are captured
//! per component in the run report.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for kcm operations
#[derive(Error, Diagnostic, Debug)]
pub enum KcmError {
    // Graph errors
    #[error("Failed to load graph snapshot: {path}: {reason}")]
    #[diagnostic(code(kcm::graph::load_failed))]
    GraphLoadFailed { path: String, reason: String },

    #[error("Component '{id}' not found in the knowledge store")]
    #[diagnostic(
        code(kcm::graph::component_not_found),
        help("Check the component identifier against the graph snapshot")
    )]
    ComponentNotFound { id: String },

    #[error("Component '{id}' has no downloadable classification")]
    #[diagnostic(
        code(kcm::graph::class_not_found),
        help("A component must be classified as a repository or a reusable component specification")
    )]
    ClassNotFound { id: String },

    // Resolution errors
    #[error("Cyclic dependency detected: {chain}")]
    #[diagnostic(
        code(kcm::resolve::cyclic_dependency),
        help("Remove the dependency cycle from the component specifications")
    )]
    CyclicDependency { chain: String },

    // Address errors
    #[error("Component '{id}' has no alternative addresses set")]
    #[diagnostic(code(kcm::address::no_alternative_addresses))]
    NoAlternativeAddresses { id: String },

    #[error("Alternative addresses set of component '{id}' is empty")]
    #[diagnostic(code(kcm::address::empty_alternative_set))]
    EmptyAlternativeSet { id: String },

    #[error("No address found for repository '{id}'")]
    #[diagnostic(code(kcm::address::no_repository_address))]
    NoRepositoryAddress { id: String },

    #[error("No address links found for component '{id}'")]
    #[diagnostic(
        code(kcm::address::no_address_links),
        help("The selected address node carries no literal URL links")
    )]
    NoAddressLinks { id: String },

    #[error("Unsupported hosting scheme '{scheme}' for component '{id}'")]
    #[diagnostic(
        code(kcm::address::unsupported_hosting_scheme),
        help("Supported schemes are the ones registered with the downloader registry")
    )]
    UnsupportedHostingScheme { id: String, scheme: String },

    // Download errors
    #[error("Failed to create directory '{path}': {reason}")]
    #[diagnostic(code(kcm::download::directory_create_failed))]
    DirectoryCreateFailed { path: String, reason: String },

    #[error("Failed to download '{url}': {reason}")]
    #[diagnostic(
        code(kcm::download::failed),
        help("Check that the URL is correct and the remote host is reachable")
    )]
    DownloadFailed { url: String, reason: String },

    // Install errors
    #[error("Component '{id}' is not a reusable component")]
    #[diagnostic(
        code(kcm::install::not_reusable),
        help("Only components classified as reusable can be installed")
    )]
    NotReusable { id: String },

    #[error("Component '{id}' has no valid installation method")]
    #[diagnostic(code(kcm::install::invalid_installation_method))]
    InvalidInstallationMethod { id: String },

    #[error("Install script {index} of component '{id}' failed: {script}: {reason}")]
    #[diagnostic(
        code(kcm::install::script_failed),
        help("Scripts after the failing one were not executed; no rollback is performed")
    )]
    InstallScriptFailed {
        id: String,
        index: usize,
        script: String,
        reason: String,
    },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(kcm::fs::io_error))]
    IoError { message: String },
}

impl KcmError {
    pub fn graph_load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        KcmError::GraphLoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn download_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        KcmError::DownloadFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn directory_create_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        KcmError::DirectoryCreateFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for KcmError {
    fn from(err: std::io::Error) -> Self {
        KcmError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, KcmError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = KcmError::ComponentNotFound {
            id: "kb-web".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Component 'kb-web' not found in the knowledge store"
        );
    }

    #[test]
    fn test_error_code() {
        let err = KcmError::CyclicDependency {
            chain: "a -> b -> a".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("kcm::resolve::cyclic_dependency".to_string())
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let kcm_err: KcmError = io_err.into();
        assert!(matches!(kcm_err, KcmError::IoError { .. }));
    }

    test_error_contains!(
        test_class_not_found_error,
        KcmError::ClassNotFound {
            id: "nn-module".to_string()
        },
        "no downloadable classification",
        "nn-module",
    );

    test_error_contains!(
        test_no_alternative_addresses_error,
        KcmError::NoAlternativeAddresses {
            id: "kb-web".to_string()
        },
        "no alternative addresses set",
    );

    test_error_contains!(
        test_empty_alternative_set_error,
        KcmError::EmptyAlternativeSet {
            id: "kb-web".to_string()
        },
        "is empty",
    );

    test_error_contains!(
        test_unsupported_hosting_scheme_error,
        KcmError::UnsupportedHostingScheme {
            id: "kb-web".to_string(),
            scheme: "ftp_url".to_string()
        },
        "Unsupported hosting scheme",
        "ftp_url",
    );

    test_error_contains!(
        test_install_script_failed_error,
        KcmError::InstallScriptFailed {
            id: "kb-web".to_string(),
            index: 1,
            script: "./setup.sh".to_string(),
            reason: "exit status 1".to_string()
        },
        "Install script 1",
        "./setup.sh",
        "exit status 1",
    );

    test_error_contains!(
        test_graph_load_failed_error,
        KcmError::graph_load_failed("store.yaml", "missing field `kind`"),
        "store.yaml",
        "missing field `kind`",
    );

    test_error_contains!(
        test_directory_create_failed_error,
        KcmError::directory_create_failed("/opt/components/kb-web", "Permission denied"),
        "/opt/components/kb-web",
        "Permission denied",
    );

    test_error_contains!(
        test_not_reusable_error,
        KcmError::NotReusable {
            id: "scratch".to_string()
        },
        "not a reusable component",
    );
}

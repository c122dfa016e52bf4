#![cfg(test)]

use std::path::PathBuf;

use crate::component::ComponentError;
use crate::config::error::ConfigError;
use crate::dispatch::error::DispatchError;
use crate::kernel::constants;
use crate::kernel::error::Error;

#[test]
fn test_subsystem_errors_convert_into_kernel_error() {
    let err: Error = DispatchError::NoRuntime.into();
    assert!(matches!(err, Error::Dispatch(DispatchError::NoRuntime)));
    assert!(format!("{}", err).starts_with("Dispatch error: "));

    let err: Error = ComponentError::from("boom").into();
    assert_eq!(format!("{}", err), "Component error: Component error: boom");

    let err: Error = ConfigError::UnsupportedFormat { path: PathBuf::from("hive.ini") }.into();
    assert_eq!(
        format!("{}", err),
        "Configuration error: Unsupported configuration format for path: hive.ini"
    );
}

#[test]
fn test_string_conversions() {
    let err: Error = "plain".into();
    assert_eq!(format!("{}", err), "Error: plain");

    let err: Error = String::from("owned").into();
    assert!(matches!(err, Error::Other(ref m) if m == "owned"));
}

#[test]
fn test_default_timeout_constant() {
    assert_eq!(constants::DEFAULT_DISPATCH_TIMEOUT_MS, 30_000);
}

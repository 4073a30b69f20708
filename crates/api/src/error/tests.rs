use super::*;

#[test]
fn test_with_context_keeps_payload() {
    let err = Error::BufferTooShort {
        context: "inner",
        expected: 32,
        actual: 8,
    };

    match err.with_context("outer") {
        Error::BufferTooShort {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "outer");
            assert_eq!(expected, 32);
            assert_eq!(actual, 8);
        }
        other => panic!("unexpected variant: {:?}", other),
    }
}

#[test]
fn test_result_ext_with_context() {
    let result: core::result::Result<(), Error> = Err(Error::ForgedOrCorrupted { context: "poly1305" });
    let err = result.with_context("secretbox open").unwrap_err();

    assert!(err.is_forged());
    assert_eq!(err, Error::ForgedOrCorrupted { context: "secretbox open" });
}

#[test]
fn test_wrap_err() {
    let result: core::result::Result<u8, ()> = Err(());
    let err = result
        .wrap_err(|| Error::InvalidState { context: "stream" })
        .unwrap_err();

    assert_eq!(err, Error::InvalidState { context: "stream" });
}

#[test]
fn test_try_from_slice_conversion() {
    let short = [0u8; 3];
    let converted: Result<[u8; 4]> = <[u8; 4]>::try_from(&short[..]).map_err(Error::from);

    assert!(matches!(converted, Err(Error::InvalidLength { .. })));
}

#[cfg(feature = "std")]
#[test]
fn test_display_never_empty() {
    let errors = [
        Error::ForgedOrCorrupted { context: "open" },
        Error::InvalidPoint { context: "kx" },
        Error::CipherTooShort {
            context: "open",
            minimum: 16,
            actual: 3,
        },
        Error::InvalidParameter {
            context: "hchacha20",
            message: "custom constants are not supported",
        },
        Error::RandomGenerationError { context: "fill" },
        Error::Other { context: "misc" },
    ];

    for err in errors.iter() {
        let text = err.to_string();
        assert!(!text.is_empty());
    }

    let text = Error::CipherTooShort {
        context: "open",
        minimum: 16,
        actual: 3,
    }
    .to_string();
    assert!(text.contains("16"));
    assert!(text.contains('3'));
}

#[cfg(feature = "std")]
#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
    let err: Error = io.into();

    assert_eq!(
        err,
        Error::Io {
            context: "I/O operation",
            kind: std::io::ErrorKind::UnexpectedEof,
        }
    );
}

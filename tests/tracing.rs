#![cfg(feature = "tracing")]

use std::{
    io,
    sync::{Arc, Mutex},
};

use vessel::{AnyValue, Variant};

/// Writer appending everything to a shared buffer.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        let buffer = self.0.lock().unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    captured.contents()
}

#[test]
fn test_failed_accesses_are_traced() {
    let output = capture(|| {
        let value = AnyValue::new(1u8);
        assert!(value.get::<u16>().is_err());

        let variant: Variant<(i32, String)> = Variant::new(1i32);
        assert!(variant.get::<String, _>().is_err());
    });

    assert!(output.contains("any value access failed"));
    assert!(output.contains("requested=\"u16\""));
    assert!(output.contains("variant access failed"));
    assert!(output.contains("requested=1"));
}

#[test]
fn test_stores_are_traced() {
    let output = capture(|| {
        let mut variant: Variant<(i32, String)> = Variant::new(1i32);
        variant.set(String::from("x"));
        let _any = AnyValue::new('c');
    });

    assert!(output.contains("variant alternative stored"));
    assert!(output.contains("index=1 previous=0"));
    assert!(output.contains("any value stored"));
}

#[test]
fn test_successful_access_is_silent() {
    let output = capture(|| {
        let value = AnyValue::new(1u8);
        assert_eq!(value.get::<u8>(), Ok(1));
    });

    assert!(!output.contains("access failed"));
}

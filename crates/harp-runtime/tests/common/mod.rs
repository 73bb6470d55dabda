//! Shared helpers for Harp integration tests

#![allow(dead_code)]

use harp_runtime::{Harp, RuntimeResult, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub use pretty_assertions::{assert_eq, assert_ne};

/// Clonable in-memory sink so tests can read what `print` wrote
#[derive(Clone, Default)]
pub struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Evaluate `source` on a fresh runtime, returning the result and printed output
pub fn run(source: &str) -> (RuntimeResult<Value>, String) {
    let out = OutputBuffer::default();
    let runtime = Harp::with_output(out.clone());
    let result = runtime.eval(source);
    (result, out.contents())
}

/// Printed output of a program that must succeed
pub fn output_of(source: &str) -> String {
    let (result, output) = run(source);
    if let Err(diags) = result {
        panic!("program failed: {:#?}", diags);
    }
    output
}

pub fn eval_ok(source: &str) -> Value {
    match run(source).0 {
        Ok(value) => value,
        Err(diags) => panic!("expected success for {:?}, got {:#?}", source, diags),
    }
}

pub fn assert_eval_int(source: &str, expected: i64) {
    match eval_ok(source) {
        Value::Int(n) => assert_eq!(n, expected, "for {:?}", source),
        other => panic!("Expected Int({}), got {:?}", expected, other),
    }
}

pub fn assert_eval_double(source: &str, expected: f64) {
    match eval_ok(source) {
        Value::Double(n) => assert_eq!(n, expected, "for {:?}", source),
        other => panic!("Expected Double({}), got {:?}", expected, other),
    }
}

pub fn assert_eval_bool(source: &str, expected: bool) {
    match eval_ok(source) {
        Value::Bool(b) => assert_eq!(b, expected, "for {:?}", source),
        other => panic!("Expected Bool({}), got {:?}", expected, other),
    }
}

pub fn assert_eval_null(source: &str) {
    match eval_ok(source) {
        Value::Null => {}
        other => panic!("Expected Null, got {:?}", other),
    }
}

/// Assert that the first diagnostic carries `expected_code`
pub fn assert_error_code(source: &str, expected_code: &str) {
    match run(source).0 {
        Err(diags) => {
            assert!(!diags.is_empty(), "Expected error, got success");
            assert_eq!(
                diags[0].code, expected_code,
                "Expected error code {}, got {}: {}",
                expected_code, diags[0].code, diags[0].message
            );
        }
        Ok(value) => panic!("Expected error {}, got success: {:?}", expected_code, value),
    }
}
